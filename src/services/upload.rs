//! Upload storage
//!
//! Writes uploaded images into the configured upload directory under a
//! random name, and removes them again when their record goes away.
//! When uploads are disabled nothing is ever written.

use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::services::content::ContentError;

/// A file received from a client, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client gave the file
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Disk-backed store for uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    config: UploadConfig,
}

impl UploadStore {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Whether files may be written at all
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Directory uploaded files are written to and served from
    pub fn dir(&self) -> &Path {
        &self.config.path
    }

    /// Full path of a stored file
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.config.path.join(filename)
    }

    /// Validate and store a file, returning its new name.
    pub async fn save(&self, file: UploadedFile) -> Result<String, ContentError> {
        if !self.config.enabled {
            return Err(ContentError::Validation(
                "File uploads are disabled".to_string(),
            ));
        }

        if !self.config.is_type_allowed(&file.content_type) {
            return Err(ContentError::Validation(format!(
                "Invalid file type: {}. Allowed types: {:?}",
                file.content_type, self.config.allowed_types
            )));
        }

        if file.data.len() as u64 > self.config.max_file_size {
            return Err(ContentError::Validation(format!(
                "File too large. Maximum size: {} bytes ({} MB)",
                self.config.max_file_size,
                self.config.max_file_size / 1024 / 1024
            )));
        }

        ensure_upload_dir(&self.config.path).await?;

        let ext = get_extension(&file.file_name, &file.content_type);
        let new_filename = format!("{}.{}", Uuid::new_v4(), ext);

        fs::write(self.path_of(&new_filename), &file.data)
            .await
            .with_context(|| format!("Failed to save file {}", new_filename))?;

        tracing::info!(
            "Stored upload '{}' as {} ({} bytes)",
            file.file_name,
            new_filename,
            file.data.len()
        );
        Ok(new_filename)
    }

    /// Delete a stored file, best-effort.
    ///
    /// A file that is already gone is ignored; other failures are logged
    /// and swallowed.
    pub async fn remove(&self, filename: &str) {
        let suspicious = filename.is_empty()
            || filename.contains("..")
            || filename.contains(|c: char| c == '/' || c == '\\');
        if suspicious {
            tracing::warn!("Refusing to remove suspicious upload name '{}'", filename);
            return;
        }

        match fs::remove_file(self.path_of(filename)).await {
            Ok(()) => tracing::info!("Removed upload {}", filename),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Upload {} already gone", filename)
            }
            Err(e) => tracing::warn!("Failed to remove upload {}: {}", filename, e),
        }
    }
}

/// Ensure upload directory exists
async fn ensure_upload_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create upload dir {}", path.display()))?;
    }
    Ok(())
}

/// Get file extension from filename or content type
fn get_extension(filename: &str, content_type: &str) -> String {
    let from_name = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() < 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext.to_lowercase();
    }

    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir, enabled: bool) -> UploadStore {
        UploadStore::new(UploadConfig {
            enabled,
            path: dir.path().join("uploads"),
            ..UploadConfig::default()
        })
    }

    fn png(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension("photo.JPG", "image/jpeg"), "jpg");
        assert_eq!(get_extension("noext", "image/png"), "png");
        assert_eq!(get_extension("weird.p/g", "image/gif"), "gif");
        assert_eq!(get_extension("", "application/octet-stream"), "bin");
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, true);

        let name = store.save(png("cat.png")).await.unwrap();

        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(store.path_of(&name)).unwrap(), png("cat.png").data);
    }

    #[tokio::test]
    async fn test_save_rejects_disallowed_type() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, true);
        let file = UploadedFile {
            content_type: "text/plain".to_string(),
            ..png("notes.txt")
        };

        let result = store.save(file).await;

        assert!(matches!(result, Err(ContentError::Validation(_))));
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_file() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(UploadConfig {
            path: dir.path().to_path_buf(),
            max_file_size: 2,
            ..UploadConfig::default()
        });

        assert!(matches!(
            store.save(png("big.png")).await,
            Err(ContentError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_store_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, false);

        let result = store.save(png("cat.png")).await;

        assert!(matches!(result, Err(ContentError::Validation(_))));
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, true);
        let name = store.save(png("cat.png")).await.unwrap();

        store.remove(&name).await;

        assert!(!store.path_of(&name).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, true);

        store.remove("never-existed.png").await;
        store.remove("../escape.png").await;
    }
}
