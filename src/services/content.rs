//! Errors shared by the blog, gallery and message services

/// Error types for record operations
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No record with the requested id
    #[error("{0} not found")]
    NotFound(String),

    /// Missing or rejected input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage or filesystem failure
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ContentError {
    pub fn not_found(what: &str, id: i64) -> Self {
        Self::NotFound(format!("{} {}", what, id))
    }
}

/// Reject a required text field that is empty after trimming
pub(crate) fn require(field: &str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_blank() {
        assert!(matches!(require("title", "  "), Err(ContentError::Validation(_))));
        assert!(require("title", "Hello").is_ok());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ContentError::not_found("Blog post", 7).to_string(), "Blog post 7 not found");
    }
}
