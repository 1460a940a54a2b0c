//! Gallery image repository

use crate::db::collection::{MemoryCollection, Record};
use crate::models::{CreateGalleryImageInput, GalleryImage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Gallery image repository trait
#[async_trait]
pub trait GalleryImageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<GalleryImage>>;

    async fn get_by_id(&self, id: i64) -> Result<Option<GalleryImage>>;

    async fn create(&self, filename: String, input: CreateGalleryImageInput) -> Result<GalleryImage>;

    /// Delete an image record, returning it if it existed
    async fn delete(&self, id: i64) -> Result<Option<GalleryImage>>;
}

impl Record for GalleryImage {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory gallery image repository
#[derive(Default)]
pub struct MemoryGalleryImageRepository {
    images: MemoryCollection<GalleryImage>,
}

impl MemoryGalleryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed() -> Arc<dyn GalleryImageRepository> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl GalleryImageRepository for MemoryGalleryImageRepository {
    async fn list(&self) -> Result<Vec<GalleryImage>> {
        Ok(self.images.list().await)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<GalleryImage>> {
        Ok(self.images.get(id).await)
    }

    async fn create(&self, filename: String, input: CreateGalleryImageInput) -> Result<GalleryImage> {
        Ok(self
            .images
            .insert_with(|id| GalleryImage::new(id, filename, input))
            .await)
    }

    async fn delete(&self, id: i64) -> Result<Option<GalleryImage>> {
        Ok(self.images.remove(id).await)
    }
}
