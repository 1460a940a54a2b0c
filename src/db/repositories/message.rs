//! Guestbook message repository

use crate::db::collection::{MemoryCollection, Record};
use crate::models::{CreateMessageInput, Message};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Message repository trait
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Message>>;

    async fn create(&self, input: CreateMessageInput) -> Result<Message>;

    /// Delete a message, returning it if it existed
    async fn delete(&self, id: i64) -> Result<Option<Message>>;
}

impl Record for Message {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory message repository
#[derive(Default)]
pub struct MemoryMessageRepository {
    messages: MemoryCollection<Message>,
}

impl MemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Arc<dyn MessageRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl MessageRepository for MemoryMessageRepository {
    async fn list(&self) -> Result<Vec<Message>> {
        Ok(self.messages.list().await)
    }

    async fn create(&self, input: CreateMessageInput) -> Result<Message> {
        Ok(self
            .messages
            .insert_with(|id| Message::new(id, input))
            .await)
    }

    async fn delete(&self, id: i64) -> Result<Option<Message>> {
        Ok(self.messages.remove(id).await)
    }
}
