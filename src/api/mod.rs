//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints of the Folio site:
//! - Auth endpoints (login, logout, check-login)
//! - Blog, gallery and guestbook endpoints
//! - HTML fragment endpoints
//! - Static file serving for the site, uploads and the admin dashboard

pub mod auth;
pub mod blog;
pub mod fragments;
pub mod gallery;
pub mod messages;
pub mod middleware;
pub mod responses;
pub mod static_files;
pub mod upload;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Room for multipart framing and text fields on top of the file itself
const BODY_LIMIT_SLACK: u64 = 1024 * 1024;

/// Build the `/api` router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need a live session)
    let protected_routes = Router::new()
        .merge(blog::protected_router())
        .merge(gallery::protected_router())
        .merge(messages::protected_router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .merge(auth::router())
        .merge(blog::public_router())
        .merge(gallery::public_router())
        .merge(messages::public_router())
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let cors = cors_layer(&config.server.cors_origin)?;
    let body_limit = (config.upload.max_file_size + BODY_LIMIT_SLACK) as usize;

    Ok(Router::new()
        .nest("/api", build_api_router(state.clone()))
        .nest("/fragments", fragments::router())
        .fallback(static_files::serve_static)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// CORS configuration.
///
/// `*` allows any origin without credentials; a concrete origin is allowed
/// to send the session cookie.
fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE]);

    if origin == "*" {
        return Ok(cors.allow_origin(Any));
    }

    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
    Ok(cors.allow_origin(origin).allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_wildcard_and_origin() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("https://example.com").is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer("bad\norigin").is_err());
    }

    #[tokio::test]
    async fn test_gated_route_without_session_is_unauthorized() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let config = Config::default();
        let store = crate::db::Store::in_memory(&config.session);
        let state = AppState::new(&store, &config).unwrap();
        let app = build_router(state, &config).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/messages/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
