//! User service
//!
//! Authentication for the single admin account:
//! - Login verifies the submitted password against the stored bcrypt hash
//!   and opens a session
//! - Logout destroys the session
//! - Session validation resolves a token back to its user, dropping it once
//!   it has expired

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{Session, User};
use crate::services::password::verify_password;
use anyhow::Context;
use chrono::Duration;
use serde::Deserialize;
use std::sync::Arc;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for authentication and session state
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_ttl: Duration,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_ttl,
        }
    }

    /// How long a freshly created session stays valid
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Login with credentials
    ///
    /// An unknown username and a wrong password produce the same
    /// `AuthenticationError`, and neither creates a session.
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username and password are required".to_string(),
            ));
        }

        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to get user by username")?;

        let Some(user) = user else {
            tracing::info!("Login rejected for unknown user '{}'", input.username);
            return Err(invalid_credentials());
        };

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            tracing::info!("Login rejected for '{}': wrong password", user.username);
            return Err(invalid_credentials());
        }

        let session = Session::new(user.id, self.session_ttl);
        let created = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        tracing::info!("User '{}' logged in", user.username);
        Ok(created)
    }

    /// Logout (invalidate session)
    ///
    /// Unknown tokens are accepted silently.
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(session_id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Validate session token and return the associated user
    ///
    /// Returns `None` if the session doesn't exist or is expired. Expired
    /// sessions are removed on the way out.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            if let Err(e) = self.session_repo.delete(token).await {
                tracing::warn!("Failed to drop expired session: {}", e);
            }
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }
}

fn invalid_credentials() -> UserServiceError {
    UserServiceError::AuthenticationError("Invalid username or password".to_string())
}

/// Input for user login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdminConfig, SessionConfig};
    use crate::db::Store;

    async fn setup_test_service() -> (Store, UserService) {
        let store = Store::in_memory(&SessionConfig::default());
        store
            .seed_admin(&AdminConfig {
                bcrypt_cost: 4,
                ..AdminConfig::default()
            })
            .await
            .expect("Failed to seed admin");

        let service = UserService::new(
            store.users.clone(),
            store.sessions.clone(),
            store.session_ttl,
        );
        (store, service)
    }

    #[tokio::test]
    async fn test_login_success() {
        let (_store, service) = setup_test_service().await;

        let session = service
            .login(LoginInput::new("admin", "admin123"))
            .await
            .expect("Failed to login");

        assert_eq!(session.user_id, 1);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (store, service) = setup_test_service().await;

        let result = service.login(LoginInput::new("admin", "wrong")).await;

        assert!(matches!(result, Err(UserServiceError::AuthenticationError(_))));
        assert_eq!(store.users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (_store, service) = setup_test_service().await;

        let result = service.login(LoginInput::new("mallory", "admin123")).await;

        assert!(matches!(result, Err(UserServiceError::AuthenticationError(_))));
    }

    #[tokio::test]
    async fn test_login_empty_fields() {
        let (_store, service) = setup_test_service().await;

        let result = service.login(LoginInput::new("", "")).await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_validate_session_returns_user() {
        let (_store, service) = setup_test_service().await;
        let session = service.login(LoginInput::new("admin", "admin123")).await.unwrap();

        let user = service.validate_session(&session.id).await.unwrap();

        assert_eq!(user.map(|u| u.username), Some("admin".to_string()));
    }

    #[tokio::test]
    async fn test_validate_unknown_session() {
        let (_store, service) = setup_test_service().await;

        assert!(service.validate_session("not-a-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let (store, service) = setup_test_service().await;
        let expired = Session::new(1, Duration::hours(-1));
        store.sessions.create(&expired).await.unwrap();

        assert!(service.validate_session(&expired.id).await.unwrap().is_none());
        assert!(store.sessions.get_by_id(&expired.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let (_store, service) = setup_test_service().await;
        let session = service.login(LoginInput::new("admin", "admin123")).await.unwrap();

        service.logout(&session.id).await.unwrap();

        assert!(service.validate_session(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_unknown_session_is_ok() {
        let (_store, service) = setup_test_service().await;
        assert!(service.logout("nothing-here").await.is_ok());
    }
}
