//! Shared API response types
//!
//! Response structures used by every record endpoint, so creates, updates
//! and deletes answer with the same shapes.

use axum::extract::{rejection::PathRejection, Path};
use serde::{Deserialize, Serialize};

use crate::api::middleware::ApiError;

/// Answer to a successful create
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// Answer to a successful update or delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turn the `{id}` path segment into a record id.
///
/// A segment that is not an integer cannot name any record, so it is
/// reported as not found.
pub fn record_id(
    path: Result<Path<i64>, PathRejection>,
    what: &str,
) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(ApiError::not_found(format!("{} not found", what))),
    }
}
