//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKET_API_URL` - Base URL of the marketplace backend API
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: development)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Marketplace backend API configuration
    pub market: MarketApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: String,
}

/// Marketplace backend API configuration.
#[derive(Debug, Clone)]
pub struct MarketApiConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_validated_url("STOREFRONT_BASE_URL")?;

        let market = MarketApiConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_env_or_default("SENTRY_ENVIRONMENT", "development");

        Ok(Self {
            host,
            port,
            base_url,
            market,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl MarketApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_validated_url("MARKET_API_URL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable that must parse as an http(s) URL.
///
/// Returns the value with any trailing slash removed, so callers can append
/// paths with plain string formatting.
fn get_validated_url(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    let url = Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an http(s) URL, got scheme '{}'", url.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, unsafe_code)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            market: MarketApiConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: "development".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_validated_url_strips_trailing_slash() {
        // Safety: test-only env mutation, key is unique to this test
        unsafe { std::env::set_var("TEST_VALIDATED_URL_TRAILING", "http://127.0.0.1:5000/") };
        let value = get_validated_url("TEST_VALIDATED_URL_TRAILING").unwrap();
        assert_eq!(value, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_validated_url_rejects_garbage() {
        unsafe { std::env::set_var("TEST_VALIDATED_URL_GARBAGE", "not a url") };
        let result = get_validated_url("TEST_VALIDATED_URL_GARBAGE");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validated_url_rejects_non_http_scheme() {
        unsafe { std::env::set_var("TEST_VALIDATED_URL_SCHEME", "ftp://example.com") };
        let result = get_validated_url("TEST_VALIDATED_URL_SCHEME");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_missing_required_env() {
        let result = get_required_env("TEST_DEFINITELY_UNSET_VARIABLE");
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }
}
