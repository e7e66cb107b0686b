//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run against a local backend.
//!
//! - `MERCH_BACKEND_URL` - Base URL of the catalog/order backend
//!   (default: `http://localhost:8000`)
//! - `MERCH_HOST` - Bind address (default: 127.0.0.1)
//! - `MERCH_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Default backend base URL for local development.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct MerchConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the catalog/order backend
    pub backend_base_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl MerchConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid. Absent
    /// variables fall back to local-development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MERCH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MERCH_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MERCH_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MERCH_PORT".to_string(), e.to_string()))?;
        let backend_base_url = validate_backend_url(&get_env_or_default(
            "MERCH_BACKEND_URL",
            DEFAULT_BACKEND_URL,
        ))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            backend_base_url,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate the backend base URL and normalize away a trailing slash.
fn validate_backend_url(value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::InvalidEnvVar("MERCH_BACKEND_URL".to_string(), e.to_string())
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            "MERCH_BACKEND_URL".to_string(),
            format!("unsupported scheme \"{}\"", url.scheme()),
        ));
    }

    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_backend_url_accepts_default() {
        assert_eq!(
            validate_backend_url(DEFAULT_BACKEND_URL).unwrap(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_validate_backend_url_strips_trailing_slash() {
        assert_eq!(
            validate_backend_url("https://merch.example.com/").unwrap(),
            "https://merch.example.com"
        );
    }

    #[test]
    fn test_validate_backend_url_rejects_garbage() {
        assert!(validate_backend_url("not a url").is_err());
    }

    #[test]
    fn test_validate_backend_url_rejects_non_http_scheme() {
        let err = validate_backend_url("ftp://merch.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_socket_addr() {
        let config = MerchConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
