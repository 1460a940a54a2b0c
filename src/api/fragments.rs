//! HTML fragment endpoints
//!
//! `GET /fragments/{blog,gallery,messages}` render the current records
//! server-side for injection into the static pages.

use axum::{extract::State, response::Html, routing::get, Router};

use crate::api::middleware::{ApiError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog", get(blog_fragment))
        .route("/gallery", get(gallery_fragment))
        .route("/messages", get(messages_fragment))
}

fn render_failed(e: anyhow::Error) -> ApiError {
    tracing::error!("Fragment rendering failed: {:#}", e);
    ApiError::internal_error("Failed to render fragment")
}

async fn blog_fragment(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let posts = state.blog_service.list().await?;
    state.fragments.blog(&posts).map(Html).map_err(render_failed)
}

async fn gallery_fragment(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let images = state.gallery_service.list().await?;
    state.fragments.gallery(&images).map(Html).map_err(render_failed)
}

async fn messages_fragment(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let messages = state.message_service.list().await?;
    state.fragments.messages(&messages).map(Html).map_err(render_failed)
}
