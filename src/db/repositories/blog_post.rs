//! Blog post repository
//!
//! This module provides:
//! - `BlogPostRepository` trait defining the interface for blog post access
//! - `MemoryBlogPostRepository` keeping posts in process memory

use crate::db::collection::{MemoryCollection, Record};
use crate::models::{BlogPost, CreateBlogPostInput};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Blog post repository trait
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// List all posts in insertion order
    async fn list(&self) -> Result<Vec<BlogPost>>;

    /// Get post by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>>;

    /// Create a post, assigning the next id
    async fn create(&self, input: CreateBlogPostInput, image: Option<String>) -> Result<BlogPost>;

    /// Store an updated post. Returns `None` if it no longer exists.
    async fn update(&self, post: &BlogPost) -> Result<Option<BlogPost>>;

    /// Delete a post, returning it if it existed
    async fn delete(&self, id: i64) -> Result<Option<BlogPost>>;
}

impl Record for BlogPost {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory blog post repository
#[derive(Default)]
pub struct MemoryBlogPostRepository {
    posts: MemoryCollection<BlogPost>,
}

impl MemoryBlogPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed() -> Arc<dyn BlogPostRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl BlogPostRepository for MemoryBlogPostRepository {
    async fn list(&self) -> Result<Vec<BlogPost>> {
        Ok(self.posts.list().await)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<BlogPost>> {
        Ok(self.posts.get(id).await)
    }

    async fn create(&self, input: CreateBlogPostInput, image: Option<String>) -> Result<BlogPost> {
        Ok(self
            .posts
            .insert_with(|id| BlogPost::new(id, input, image))
            .await)
    }

    async fn update(&self, post: &BlogPost) -> Result<Option<BlogPost>> {
        Ok(self.posts.replace(post.clone()).await)
    }

    async fn delete(&self, id: i64) -> Result<Option<BlogPost>> {
        Ok(self.posts.remove(id).await)
    }
}
