//! Gallery service
//!
//! Every gallery image owns exactly one uploaded file, so creation is only
//! possible while uploads are enabled.

use anyhow::Context;
use std::sync::Arc;

use crate::db::repositories::GalleryImageRepository;
use crate::models::{CreateGalleryImageInput, GalleryImage};
use crate::services::content::ContentError;
use crate::services::upload::{UploadStore, UploadedFile};

pub struct GalleryService {
    repo: Arc<dyn GalleryImageRepository>,
    uploads: Arc<UploadStore>,
}

impl GalleryService {
    pub fn new(repo: Arc<dyn GalleryImageRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { repo, uploads }
    }

    pub async fn list(&self) -> Result<Vec<GalleryImage>, ContentError> {
        Ok(self.repo.list().await.context("Failed to list gallery images")?)
    }

    pub async fn get(&self, id: i64) -> Result<GalleryImage, ContentError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get gallery image")?
            .ok_or_else(|| ContentError::not_found("Gallery image", id))
    }

    /// Store the file, then record it.
    ///
    /// Fails with a validation error when no file was sent or uploads are
    /// disabled; in both cases nothing is written.
    pub async fn create(
        &self,
        input: CreateGalleryImageInput,
        image: Option<UploadedFile>,
    ) -> Result<GalleryImage, ContentError> {
        if !self.uploads.enabled() {
            return Err(ContentError::Validation(
                "File uploads are disabled".to_string(),
            ));
        }
        let file = image
            .ok_or_else(|| ContentError::Validation("An image file is required".to_string()))?;
        let filename = self.uploads.save(file).await?;

        let input = CreateGalleryImageInput {
            caption: input.caption.filter(|c| !c.trim().is_empty()),
        };

        match self.repo.create(filename.clone(), input).await {
            Ok(image) => {
                tracing::info!("Created gallery image {} ({})", image.id, image.filename);
                Ok(image)
            }
            Err(e) => {
                self.uploads.remove(&filename).await;
                Err(ContentError::Internal(e.context("Failed to create gallery image")))
            }
        }
    }

    /// Delete the record and its file
    pub async fn delete(&self, id: i64) -> Result<GalleryImage, ContentError> {
        let image = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete gallery image")?
            .ok_or_else(|| ContentError::not_found("Gallery image", id))?;

        self.uploads.remove(&image.filename).await;

        tracing::info!("Deleted gallery image {}", id);
        Ok(image)
    }
}
