//! Blog service
//!
//! CRUD over blog posts. A post may carry one cover image stored through
//! [`UploadStore`]; the image file follows the post's lifecycle.

use anyhow::Context;
use std::sync::Arc;

use crate::db::repositories::BlogPostRepository;
use crate::models::{BlogPost, CreateBlogPostInput, UpdateBlogPostInput};
use crate::services::content::{require, ContentError};
use crate::services::upload::{UploadStore, UploadedFile};

pub struct BlogService {
    repo: Arc<dyn BlogPostRepository>,
    uploads: Arc<UploadStore>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogPostRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { repo, uploads }
    }

    /// All posts in creation order
    pub async fn list(&self) -> Result<Vec<BlogPost>, ContentError> {
        Ok(self.repo.list().await.context("Failed to list blog posts")?)
    }

    pub async fn get(&self, id: i64) -> Result<BlogPost, ContentError> {
        self.repo
            .get_by_id(id)
            .await
            .context("Failed to get blog post")?
            .ok_or_else(|| ContentError::not_found("Blog post", id))
    }

    /// Create a post, storing `image` first when one was sent.
    pub async fn create(
        &self,
        input: CreateBlogPostInput,
        image: Option<UploadedFile>,
    ) -> Result<BlogPost, ContentError> {
        require("title", &input.title)?;
        require("content", &input.content)?;

        let image = self.store_image(image).await?;
        let post = self
            .repo
            .create(input, image)
            .await
            .context("Failed to create blog post")?;

        tracing::info!("Created blog post {} '{}'", post.id, post.title);
        Ok(post)
    }

    /// Overwrite the provided fields of an existing post.
    ///
    /// A new image replaces the old one and the old file is removed. When
    /// the post does not exist the freshly stored file is discarded.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateBlogPostInput,
        image: Option<UploadedFile>,
    ) -> Result<BlogPost, ContentError> {
        let image = self.store_image(image).await?;

        let existing = match self.repo.get_by_id(id).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                self.discard(image).await;
                return Err(ContentError::not_found("Blog post", id));
            }
            Err(e) => {
                self.discard(image).await;
                return Err(ContentError::Internal(e.context("Failed to get blog post")));
            }
        };

        let mut post = existing;
        let replaced = post.apply(input, image.clone());

        let saved = match self.repo.update(&post).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                // Deleted between the read and the write
                self.discard(image).await;
                return Err(ContentError::not_found("Blog post", id));
            }
            Err(e) => {
                self.discard(image).await;
                return Err(ContentError::Internal(e.context("Failed to update blog post")));
            }
        };

        if let Some(old) = replaced {
            self.uploads.remove(&old).await;
        }

        tracing::info!("Updated blog post {}", saved.id);
        Ok(saved)
    }

    /// Delete a post and its image file
    pub async fn delete(&self, id: i64) -> Result<BlogPost, ContentError> {
        let post = self
            .repo
            .delete(id)
            .await
            .context("Failed to delete blog post")?
            .ok_or_else(|| ContentError::not_found("Blog post", id))?;

        if let Some(image) = &post.image {
            self.uploads.remove(image).await;
        }

        tracing::info!("Deleted blog post {}", id);
        Ok(post)
    }

    /// Store the cover image if uploads are on; with uploads off it is dropped.
    async fn store_image(&self, image: Option<UploadedFile>) -> Result<Option<String>, ContentError> {
        match image {
            Some(file) if self.uploads.enabled() => Ok(Some(self.uploads.save(file).await?)),
            Some(file) => {
                tracing::debug!("Uploads disabled, ignoring blog image '{}'", file.file_name);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn discard(&self, image: Option<String>) {
        if let Some(name) = image {
            self.uploads.remove(&name).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::db::repositories::MemoryBlogPostRepository;
    use tempfile::TempDir;

    fn service(dir: &TempDir, enabled: bool) -> BlogService {
        let uploads = UploadStore::new(UploadConfig {
            enabled,
            path: dir.path().to_path_buf(),
            ..UploadConfig::default()
        });
        BlogService::new(MemoryBlogPostRepository::boxed(), Arc::new(uploads))
    }

    fn input(title: &str) -> CreateBlogPostInput {
        CreateBlogPostInput {
            title: title.to_string(),
            content: "Body".to_string(),
        }
    }

    fn png() -> UploadedFile {
        UploadedFile {
            file_name: "cover.png".to_string(),
            content_type: "image/png".to_string(),
            data: b"png".to_vec(),
        }
    }

    fn file_count(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);

        let first = service.create(input("One"), None).await.unwrap();
        let second = service.create(input("Two"), None).await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        let titles: Vec<String> = service.list().await.unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);

        let result = service.create(input(""), Some(png())).await;

        assert!(matches!(result, Err(ContentError::Validation(_))));
        assert_eq!(file_count(&dir), 0);
    }

    #[tokio::test]
    async fn test_create_with_image_stores_file() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);

        let post = service.create(input("Pic"), Some(png())).await.unwrap();

        let image = post.image.expect("image");
        assert!(dir.path().join(image).exists());
    }

    #[tokio::test]
    async fn test_create_with_uploads_disabled_ignores_image() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, false);

        let post = service.create(input("Pic"), Some(png())).await.unwrap();

        assert!(post.image.is_none());
        assert_eq!(file_count(&dir), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_given_fields() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);
        let post = service.create(input("Old"), None).await.unwrap();

        let updated = service
            .update(
                post.id,
                UpdateBlogPostInput {
                    title: Some("New".to_string()),
                    content: None,
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, "Body");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn test_update_replaces_image_file() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);
        let post = service.create(input("Pic"), Some(png())).await.unwrap();
        let old = post.image.clone().unwrap();

        let updated = service
            .update(post.id, UpdateBlogPostInput::default(), Some(png()))
            .await
            .unwrap();

        let new = updated.image.unwrap();
        assert_ne!(old, new);
        assert!(!dir.path().join(old).exists());
        assert!(dir.path().join(new).exists());
    }

    #[tokio::test]
    async fn test_update_missing_post_discards_upload() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);

        let result = service
            .update(99, UpdateBlogPostInput::default(), Some(png()))
            .await;

        assert!(matches!(result, Err(ContentError::NotFound(_))));
        assert_eq!(file_count(&dir), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_image() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);
        let post = service.create(input("Pic"), Some(png())).await.unwrap();

        service.delete(post.id).await.unwrap();

        assert_eq!(file_count(&dir), 0);
        assert!(matches!(service.get(post.id).await, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_with_missing_file_succeeds() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);
        let post = service.create(input("Pic"), Some(png())).await.unwrap();
        std::fs::remove_file(dir.path().join(post.image.unwrap())).unwrap();

        assert!(service.delete(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, true);
        service.create(input("Keep"), None).await.unwrap();

        assert!(matches!(service.delete(5).await, Err(ContentError::NotFound(_))));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
