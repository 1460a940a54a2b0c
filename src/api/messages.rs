//! Guestbook API endpoints
//!
//! Anyone may read and post; deleting needs a session.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::responses::{record_id, CreatedResponse, MessageResponse};
use crate::models::{CreateMessageInput, Message};

pub fn public_router() -> Router<AppState> {
    Router::new().route("/messages", get(list_messages).post(create_message))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/messages/{id}", delete(delete_message))
}

async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.message_service.list().await?))
}

async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageInput>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let message = state.message_service.create(input).await?;
    Ok(Json(CreatedResponse::new(message.id, "Message sent successfully")))
}

async fn delete_message(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = record_id(path, "Message")?;
    state.message_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Message deleted successfully")))
}
