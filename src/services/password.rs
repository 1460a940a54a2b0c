//! Password hashing module
//!
//! Passwords are hashed with bcrypt. Each hash embeds its own random salt
//! and cost factor, so verification needs nothing but the stored string.

use anyhow::{Context, Result};

/// Cost used when no explicit cost is configured
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a password using bcrypt with the default cost.
///
/// # Example
///
/// ```ignore
/// use folio::services::password::hash_password;
///
/// let hash = hash_password("my_secure_password")?;
/// assert!(hash.starts_with("$2b$"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hash a password using bcrypt with an explicit cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
        .context("Password hashing failed")
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(false)` for a wrong password and an error when the stored
/// hash is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| anyhow::anyhow!("Password verification failed: {}", e))
        .context("Password verification error")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_produces_bcrypt_hash() {
        let hash = hash_password_with_cost("test_password_123", TEST_COST).expect("hash");
        assert!(hash.starts_with("$2b$04$"), "Hash should use bcrypt: {}", hash);
    }

    #[test]
    fn test_hash_password_produces_different_hashes() {
        let hash1 = hash_password_with_cost("same_password", TEST_COST).expect("hash");
        let hash2 = hash_password_with_cost("same_password", TEST_COST).expect("hash");

        assert_ne!(hash1, hash2, "Random salt should produce different hashes");
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password_with_cost("correct_password", TEST_COST).expect("hash");
        assert!(verify_password("correct_password", &hash).expect("verify"));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password_with_cost("correct_password", TEST_COST).expect("hash");
        assert!(!verify_password("wrong_password", &hash).expect("verify"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "invalid_hash_format").is_err());
    }

    #[test]
    fn test_hash_password_unicode() {
        let password = "密码测试🔐";
        let hash = hash_password_with_cost(password, TEST_COST).expect("hash");
        assert!(verify_password(password, &hash).expect("verify"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        assert!(hash_password_with_cost("pw", 2).is_err());
    }
}
