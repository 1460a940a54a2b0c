//! Guestbook message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Guestbook message left by a visitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: i64, input: CreateMessageInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            content: input.content,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a message
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMessageInput {
    pub name: String,
    pub email: String,
    pub content: String,
}
