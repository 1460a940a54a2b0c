//! Gallery API endpoints
//!
//! - GET /api/gallery, GET /api/gallery/{id} - public
//! - POST /api/gallery (multipart, `image` + optional `caption`),
//!   DELETE /api/gallery/{id} - session required

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::responses::{record_id, CreatedResponse, MessageResponse};
use crate::api::upload::ContentForm;
use crate::models::{CreateGalleryImageInput, GalleryImage};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/gallery", get(list_images))
        .route("/gallery/{id}", get(get_image))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/gallery", post(upload_image))
        .route("/gallery/{id}", delete(delete_image))
}

async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<GalleryImage>>, ApiError> {
    Ok(Json(state.gallery_service.list().await?))
}

async fn get_image(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<GalleryImage>, ApiError> {
    let id = record_id(path, "Gallery image")?;
    Ok(Json(state.gallery_service.get(id).await?))
}

async fn upload_image(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    mut form: ContentForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let input = CreateGalleryImageInput {
        caption: form.take("caption"),
    };

    let image = state.gallery_service.create(input, form.file.take()).await?;
    Ok(Json(CreatedResponse::new(image.id, "Image uploaded successfully")))
}

async fn delete_image(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = record_id(path, "Gallery image")?;
    state.gallery_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Image deleted successfully")))
}
