//! User model
//!
//! The site has exactly one account, seeded from configuration at startup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Password hash (bcrypt)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User.
    ///
    /// Note: The password should already be hashed before calling this function.
    /// Use `services::password::hash_password()` to hash the password.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0, // Assigned by the repository
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
