//! Storage layer
//!
//! This module provides the record store for the Folio site. Everything is
//! held in process memory; a restart discards all data.
//!
//! # Architecture
//!
//! Each record type has a repository trait (`BlogPostRepository`,
//! `GalleryImageRepository`, ...) and an in-memory implementation built on
//! [`collection::MemoryCollection`]. [`Store`] bundles one of each so the
//! application can be wired against the traits only.
//!
//! # Usage
//!
//! ```ignore
//! use folio::config::Config;
//! use folio::db::Store;
//!
//! let config = Config::default();
//! let store = Store::in_memory(&config.session);
//! store.seed_admin(&config.admin).await?;
//! ```

pub mod collection;
pub mod repositories;

use anyhow::{Context, Result};
use chrono::Duration;
use std::sync::Arc;

use crate::config::{AdminConfig, SessionConfig};
use crate::models::User;
use crate::services::password::hash_password_with_cost;
use repositories::{
    BlogPostRepository, GalleryImageRepository, MemoryBlogPostRepository,
    MemoryGalleryImageRepository, MemoryMessageRepository, MemorySessionRepository,
    MemoryUserRepository, MessageRepository, SessionRepository, UserRepository,
};

/// The set of repositories the application runs against
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub blog_posts: Arc<dyn BlogPostRepository>,
    pub gallery_images: Arc<dyn GalleryImageRepository>,
    pub messages: Arc<dyn MessageRepository>,
    /// Session lifetime, shared with the cookie Max-Age
    pub session_ttl: Duration,
}

impl Store {
    /// Create an empty in-memory store
    pub fn in_memory(session: &SessionConfig) -> Self {
        let ttl = session.ttl();
        Self {
            users: MemoryUserRepository::boxed(),
            sessions: MemorySessionRepository::boxed(ttl),
            blog_posts: MemoryBlogPostRepository::boxed(),
            gallery_images: MemoryGalleryImageRepository::boxed(),
            messages: MemoryMessageRepository::boxed(),
            session_ttl: Duration::hours(session.capped_ttl_hours() as i64),
        }
    }

    /// Create the admin account described by the configuration.
    ///
    /// Uses `password_hash` verbatim when present, otherwise hashes
    /// `password` with bcrypt at the configured cost.
    pub async fn seed_admin(&self, admin: &AdminConfig) -> Result<User> {
        let password_hash = match &admin.password_hash {
            Some(hash) => hash.clone(),
            None => hash_password_with_cost(&admin.password, admin.bcrypt_cost)
                .context("Failed to hash admin password")?,
        };

        let user = User::new(admin.username.clone(), password_hash);
        let user = self
            .users
            .create(&user)
            .await
            .context("Failed to seed admin user")?;

        tracing::info!("Seeded admin account '{}'", user.username);
        Ok(user)
    }
}
