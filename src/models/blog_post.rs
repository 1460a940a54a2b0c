//! Blog post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Stored filename of the cover image, relative to the upload directory
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn new(id: i64, input: CreateBlogPostInput, image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: input.title,
            content: input.content,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the provided fields and refresh `updated_at`.
    ///
    /// Returns the image filename that was replaced, if any.
    pub fn apply(&mut self, input: UpdateBlogPostInput, image: Option<String>) -> Option<String> {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(content) = input.content {
            self.content = content;
        }
        let replaced = match image {
            Some(new_image) => self.image.replace(new_image),
            None => None,
        };
        self.updated_at = Utc::now();
        replaced
    }
}

/// Input for creating a blog post
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPostInput {
    pub title: String,
    pub content: String,
}

/// Input for updating a blog post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlogPostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> BlogPost {
        BlogPost::new(
            1,
            CreateBlogPostInput {
                title: "Hello".to_string(),
                content: "First post".to_string(),
            },
            Some("cover.png".to_string()),
        )
    }

    #[test]
    fn test_new_sets_both_timestamps() {
        let post = post();
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.image.as_deref(), Some("cover.png"));
    }

    #[test]
    fn test_apply_overwrites_only_provided_fields() {
        let mut post = post();
        let before = post.updated_at;

        let replaced = post.apply(
            UpdateBlogPostInput {
                title: Some("Renamed".to_string()),
                content: None,
            },
            None,
        );

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.content, "First post");
        assert_eq!(post.image.as_deref(), Some("cover.png"));
        assert!(replaced.is_none());
        assert!(post.updated_at >= before);
    }

    #[test]
    fn test_apply_returns_replaced_image() {
        let mut post = post();
        let replaced = post.apply(UpdateBlogPostInput::default(), Some("new.png".to_string()));

        assert_eq!(replaced.as_deref(), Some("cover.png"));
        assert_eq!(post.image.as_deref(), Some("new.png"));
    }
}
