//! User repository
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for user data access
//! - `MemoryUserRepository` holding the seeded account in memory

use crate::db::collection::{MemoryCollection, Record};
use crate::models::User;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Count total users
    async fn count(&self) -> Result<i64>;
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory user repository
#[derive(Default)]
pub struct MemoryUserRepository {
    users: MemoryCollection<User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn UserRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        if self.get_by_username(&user.username).await?.is_some() {
            anyhow::bail!("User '{}' already exists", user.username);
        }
        let template = user.clone();
        Ok(self
            .users
            .insert_with(|id| User { id, ..template })
            .await)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.get(id).await)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.find(|u| u.username == username).await)
    }

    async fn count(&self) -> Result<i64> {
        i64::try_from(self.users.len().await).context("User count overflow")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup_by_username() {
        let repo = MemoryUserRepository::new();
        let created = repo
            .create(&User::new("admin".to_string(), "hash".to_string()))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        let found = repo.get_by_username("admin").await.unwrap().expect("user");
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = MemoryUserRepository::new();
        let user = User::new("admin".to_string(), "hash".to_string());
        repo.create(&user).await.unwrap();

        assert!(repo.create(&user).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
