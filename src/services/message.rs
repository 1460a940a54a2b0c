//! Guestbook service

use anyhow::Context;
use std::sync::Arc;

use crate::db::repositories::MessageRepository;
use crate::models::{CreateMessageInput, Message};
use crate::services::content::{require, ContentError};

pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Message>, ContentError> {
        Ok(self.repo.list().await.context("Failed to list messages")?)
    }

    /// Open to every visitor; all three fields must be non-blank.
    pub async fn create(&self, input: CreateMessageInput) -> Result<Message, ContentError> {
        require("name", &input.name)?;
        require("email", &input.email)?;
        require("content", &input.content)?;

        let message = self
            .repo
            .create(input)
            .await
            .context("Failed to create message")?;

        tracing::info!("New guestbook message {} from '{}'", message.id, message.name);
        Ok(message)
    }

    pub async fn delete(&self, id: i64) -> Result<Message, ContentError> {
        let message = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete message")?
            .ok_or_else(|| ContentError::not_found("Message", id))?;

        tracing::info!("Deleted guestbook message {}", id);
        Ok(message)
    }
}
