//! Configuration management
//!
//! This module handles loading and parsing configuration for the Folio site.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload configuration
    #[serde(default)]
    pub upload: UploadConfig,
    /// Seeded admin account
    #[serde(default)]
    pub admin: AdminConfig,
    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Static site configuration
    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin. `*` allows any origin without credentials.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Whether uploaded files are written to disk at all.
    /// Disable on read-only deployments.
    #[serde(default = "default_upload_enabled")]
    pub enabled: bool,
    /// Upload directory path
    #[serde(default = "default_upload_path")]
    pub path: PathBuf,
    /// Maximum file size in bytes (default: 10MB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed image MIME types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            enabled: default_upload_enabled(),
            path: default_upload_path(),
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_upload_enabled() -> bool {
    true
}

fn default_upload_path() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
        "image/svg+xml".to_string(),
    ]
}

impl UploadConfig {
    /// Check if a MIME type is allowed
    pub fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }
}

/// Credentials of the single admin account seeded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Plaintext password, hashed once at startup.
    /// Ignored when `password_hash` is set.
    #[serde(default = "default_admin_password")]
    pub password: String,
    /// Pre-computed bcrypt hash
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
            password_hash: None,
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in hours
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

impl SessionConfig {
    /// Session lifetime, capped at [`MAX_SESSION_TTL_HOURS`]
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.capped_ttl_hours() * 60 * 60)
    }

    /// `ttl_hours` clamped into the range the session store accepts
    pub fn capped_ttl_hours(&self) -> u64 {
        self.ttl_hours.min(MAX_SESSION_TTL_HOURS)
    }
}

/// Static site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the static pages (index.html, admin/, js/, ...)
    #[serde(default = "default_site_root")]
    pub root: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_site_root(),
        }
    }
}

fn default_site_root() -> PathBuf {
    PathBuf::from("public")
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - FOLIO_SERVER_HOST
    /// - FOLIO_SERVER_PORT
    /// - FOLIO_SERVER_CORS_ORIGIN
    /// - FOLIO_UPLOAD_ENABLED
    /// - FOLIO_UPLOAD_PATH
    /// - FOLIO_ADMIN_USERNAME
    /// - FOLIO_ADMIN_PASSWORD
    /// - FOLIO_SESSION_TTL_HOURS
    /// - FOLIO_SITE_ROOT
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.ttl_hours == 0 {
            return Err(ConfigError::ValidationError(
                "session.ttl_hours must be greater than zero".to_string(),
            ));
        }
        if self.session.ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "session.ttl_hours must be at most {}",
                MAX_SESSION_TTL_HOURS
            )));
        }
        if self.upload.max_file_size == 0 {
            return Err(ConfigError::ValidationError(
                "upload.max_file_size must be greater than zero".to_string(),
            ));
        }
        if self.server.cors_origin != "*"
            && self.server.cors_origin.parse::<HeaderValue>().is_err()
        {
            return Err(ConfigError::ValidationError(format!(
                "server.cors_origin is not a valid origin: {}",
                self.server.cors_origin
            )));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("FOLIO_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("FOLIO_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("FOLIO_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Upload configuration
        if let Ok(enabled) = std::env::var("FOLIO_UPLOAD_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.upload.enabled = true,
                "false" | "0" | "no" => self.upload.enabled = false,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(path) = std::env::var("FOLIO_UPLOAD_PATH") {
            self.upload.path = PathBuf::from(path);
        }

        // Admin account
        if let Ok(username) = std::env::var("FOLIO_ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Ok(password) = std::env::var("FOLIO_ADMIN_PASSWORD") {
            self.admin.password = password;
            self.admin.password_hash = None;
        }

        // Session configuration
        if let Ok(ttl) = std::env::var("FOLIO_SESSION_TTL_HOURS") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.session.ttl_hours = ttl;
            }
        }

        // Site configuration
        if let Ok(root) = std::env::var("FOLIO_SITE_ROOT") {
            self.site.root = PathBuf::from(root);
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
