//! Authentication API endpoints
//!
//! - POST /api/login - Login, sets the `session` cookie
//! - GET|POST /api/logout - Destroy the session and expire the cookie
//! - GET /api/check-login - Report whether the caller has a live session

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::api::middleware::{current_user, extract_session_token, ApiError, AppState};
use crate::models::User;
use crate::services::user::LoginInput;

/// Response for check-login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Build the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout).post(logout))
        .route("/check-login", get(check_login))
}

/// POST /api/login - User login
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let session = state.user_service.login(input).await?;

    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        session.id,
        state.user_service.session_ttl().num_seconds()
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::internal_error(format!("Invalid cookie: {}", e)))?,
    );

    Ok((headers, Json(json!({ "message": "Login successful" }))))
}

/// GET|POST /api/logout - User logout
///
/// Succeeds without a session too; the cookie is expired either way.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = extract_session_token(&headers) {
        state.user_service.logout(&token).await?;
    }

    let clear_cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";
    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::SET_COOKIE, HeaderValue::from_static(clear_cookie));

    Ok((response_headers, Json(json!({ "message": "Logout successful" }))))
}

/// GET /api/check-login
async fn check_login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginStatus>, ApiError> {
    let user = current_user(&state, &headers).await?;

    Ok(Json(LoginStatus {
        logged_in: user.is_some(),
        user,
    }))
}
