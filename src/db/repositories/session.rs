//! Session repository
//!
//! This module provides:
//! - `SessionRepository` trait defining the interface for session data access
//! - `MemorySessionRepository` keeping sessions in a moka cache whose
//!   time-to-live matches the configured session lifetime

use crate::models::Session;
use anyhow::Result;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on concurrently live sessions
const MAX_SESSIONS: u64 = 10_000;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    async fn create(&self, session: &Session) -> Result<Session>;

    /// Get session by ID (token)
    async fn get_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Delete a session
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Session store backed by an in-process TTL cache
pub struct MemorySessionRepository {
    sessions: Cache<String, Session>,
}

impl std::fmt::Debug for MemorySessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySessionRepository")
            .field("entry_count", &self.sessions.entry_count())
            .finish()
    }
}

impl MemorySessionRepository {
    /// Create a session store whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_live(ttl)
            .build();
        Self { sessions }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(ttl: Duration) -> Arc<dyn SessionRepository> {
        Arc::new(Self::new(ttl))
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, session: &Session) -> Result<Session> {
        self.sessions
            .insert(session.id.clone(), session.clone())
            .await;
        Ok(session.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).await)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.invalidate(id).await;
        Ok(())
    }
}
