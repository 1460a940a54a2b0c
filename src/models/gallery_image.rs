//! Gallery image model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gallery image entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    /// Stored filename, relative to the upload directory
    pub filename: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    pub fn new(id: i64, filename: String, input: CreateGalleryImageInput) -> Self {
        Self {
            id,
            filename,
            caption: input.caption,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a gallery image (the file travels separately)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGalleryImageInput {
    pub caption: Option<String>,
}
