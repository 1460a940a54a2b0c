//! Blog API endpoints
//!
//! - GET /api/blog, GET /api/blog/{id} - public
//! - POST /api/blog, PUT /api/blog/{id}, DELETE /api/blog/{id} - session required

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::responses::{record_id, CreatedResponse, MessageResponse};
use crate::api::upload::ContentForm;
use crate::models::{BlogPost, CreateBlogPostInput, UpdateBlogPostInput};

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/blog", get(list_posts))
        .route("/blog/{id}", get(get_post))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/blog", axum::routing::post(create_post))
        .route("/blog/{id}", axum::routing::put(update_post).delete(delete_post))
}

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    Ok(Json(state.blog_service.list().await?))
}

async fn get_post(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = record_id(path, "Blog post")?;
    Ok(Json(state.blog_service.get(id).await?))
}

async fn create_post(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    mut form: ContentForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let input = CreateBlogPostInput {
        title: form.require("title")?,
        content: form.require("content")?,
    };

    let post = state.blog_service.create(input, form.file.take()).await?;
    Ok(Json(CreatedResponse::new(post.id, "Blog post created successfully")))
}

async fn update_post(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
    mut form: ContentForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = record_id(path, "Blog post")?;
    let input = UpdateBlogPostInput {
        title: form.take("title"),
        content: form.take("content"),
    };

    state.blog_service.update(id, input, form.file.take()).await?;
    Ok(Json(MessageResponse::new("Blog post updated successfully")))
}

async fn delete_post(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = record_id(path, "Blog post")?;
    state.blog_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Blog post deleted successfully")))
}
