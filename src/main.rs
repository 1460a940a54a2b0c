//! Folio - backend of a personal portfolio site

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{
    api::{self, AppState},
    config::Config,
    db::Store,
};

/// Environment variable naming the configuration file
const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folio...");

    // Load configuration
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.yml"));
    let config = Config::load_with_env(&config_path)?;
    tracing::info!("Configuration loaded from {}", config_path.display());

    if !config.upload.enabled {
        tracing::info!("File uploads are disabled");
    }

    // Initialize the in-memory store and the admin account
    let store = Store::in_memory(&config.session);
    store.seed_admin(&config.admin).await?;
    tracing::info!("Store initialized (data is kept in memory only)");

    let state = AppState::new(&store, &config)?;
    let app = api::build_router(state, &config)?;

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Serving site from {}", config.site.root.display());

    axum::serve(listener, app).await?;

    Ok(())
}
