//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LEAFPRESS_API_URL` - Base URL of the storefront backend
//!   (default: `http://localhost:5000`)
//! - `LEAFPRESS_MAX_IMAGE_BYTES` - Per-file size limit for staged product
//!   images (default: 5 MiB)

use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default per-file staged image limit: 5 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin toolkit configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the storefront REST backend (without the `/api` prefix)
    pub api_base_url: Url,
    /// Per-file size limit for staged product images, in bytes
    pub max_image_bytes: u64,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("LEAFPRESS_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LEAFPRESS_API_URL".to_string(), e.to_string())
            })?;

        let max_image_bytes = match get_optional_env("LEAFPRESS_MAX_IMAGE_BYTES") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("LEAFPRESS_MAX_IMAGE_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_MAX_IMAGE_BYTES,
        };

        Ok(Self {
            api_base_url,
            max_image_bytes,
        })
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default URL is valid"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = "not a url".parse::<Url>();
        assert!(result.is_err());
    }
}
