//! API middleware
//!
//! Contains:
//! - Shared application state
//! - The JSON error type every handler returns
//! - Authentication (session token validation) for gated routes

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::models::User;
use crate::services::{
    BlogService, ContentError, FragmentRenderer, GalleryService, MessageService, UploadStore,
    UserService, UserServiceError,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub blog_service: Arc<BlogService>,
    pub gallery_service: Arc<GalleryService>,
    pub message_service: Arc<MessageService>,
    pub fragments: Arc<FragmentRenderer>,
    pub uploads: Arc<UploadStore>,
    /// Directory of the static site
    pub site_root: Arc<PathBuf>,
}

impl AppState {
    /// Wire every service against the given store
    pub fn new(store: &Store, config: &Config) -> anyhow::Result<Self> {
        let uploads = Arc::new(UploadStore::new(config.upload.clone()));

        Ok(Self {
            user_service: Arc::new(UserService::new(
                store.users.clone(),
                store.sessions.clone(),
                store.session_ttl,
            )),
            blog_service: Arc::new(BlogService::new(store.blog_posts.clone(), uploads.clone())),
            gallery_service: Arc::new(GalleryService::new(
                store.gallery_images.clone(),
                uploads.clone(),
            )),
            message_service: Arc::new(MessageService::new(store.messages.clone())),
            fragments: Arc::new(FragmentRenderer::new()?),
            uploads,
            site_root: Arc::new(config.site.root.clone()),
        })
    }
}

/// Authenticated user extracted from request
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::NotFound(what) => Self::not_found(format!("{} not found", what)),
            ContentError::Validation(msg) => Self::validation_error(msg),
            ContentError::Internal(e) => {
                tracing::error!("Record operation failed: {:#}", e);
                Self::internal_error(e.to_string())
            }
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::AuthenticationError(msg) => Self::unauthorized(msg),
            UserServiceError::ValidationError(msg) => Self::validation_error(msg),
            UserServiceError::InternalError(e) => {
                tracing::error!("Authentication failed internally: {:#}", e);
                Self::internal_error(e.to_string())
            }
        }
    }
}

/// Extract session token from request headers.
///
/// A `Bearer` authorization header wins over the `session` cookie.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    for cookie_header in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("session=") {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    None
}

/// Resolve the request's session to its user, if any
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, ApiError> {
    match extract_session_token(headers) {
        Some(token) => Ok(state.user_service.validate_session(&token).await?),
        None => Ok(None),
    }
}

/// Authentication middleware
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    let user = state
        .user_service
        .validate_session(&token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired session"))?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

// Extractor for AuthenticatedUser from request extensions
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_extract_session_token_from_bearer() {
        let headers = headers_with_auth("test-token-123");
        assert_eq!(extract_session_token(&headers), Some("test-token-123".to_string()));
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        let headers = headers_with_cookie("theme=dark; session=test-token-456");
        assert_eq!(extract_session_token(&headers), Some("test-token-456".to_string()));
    }

    #[test]
    fn test_extract_session_token_bearer_priority() {
        let mut headers = headers_with_cookie("session=cookie-token");
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer bearer-token"));
        assert_eq!(extract_session_token(&headers), Some("bearer-token".to_string()));
    }

    #[test]
    fn test_extract_session_token_none() {
        assert!(extract_session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_session_token_invalid_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic invalid"));
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_cleared_cookie_is_no_token() {
        let headers = headers_with_cookie("session=");
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::validation_error("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::internal_error("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_serializes_flat() {
        let json = serde_json::to_value(ApiError::not_found("Blog post 3 not found")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Blog post 3 not found");
    }

    #[test]
    fn test_content_error_mapping() {
        let not_found: ApiError = ContentError::not_found("Message", 2).into();
        let invalid: ApiError = ContentError::Validation("name is required".to_string()).into();
        let internal: ApiError = ContentError::Internal(anyhow::anyhow!("disk")).into();

        assert_eq!(not_found.code, "NOT_FOUND");
        assert_eq!(not_found.message, "Message 2 not found");
        assert_eq!(invalid.code, "VALIDATION_ERROR");
        assert_eq!(internal.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_user_service_error_mapping() {
        let err: ApiError = UserServiceError::AuthenticationError("bad".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
