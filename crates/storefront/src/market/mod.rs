//! Marketplace backend API client.
//!
//! # Architecture
//!
//! - Plain REST JSON endpoints, no API tokens
//! - The backend is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for the product catalog (5 minute TTL)
//!
//! The backend wraps every body in a `{success, ...}` envelope and reports
//! failures as `success: false` with a `message`, sometimes riding on a 4xx
//! status. The client folds both shapes into [`MarketError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use marigold_storefront::market::MarketClient;
//!
//! let client = MarketClient::new(&config.market);
//!
//! // Fetch the catalog (cached)
//! let products = client.catalog().await?;
//!
//! // Authenticate a user
//! let user_id = client.login(&LoginRequest {
//!     username: "ada".to_string(),
//!     password: "hunter2-but-longer".to_string(),
//! }).await?;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::MarketClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the market API.
#[derive(Debug, Error)]
pub enum MarketError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status with no readable envelope.
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A response field was missing or unusable.
    #[error("Malformed response: missing or invalid '{0}'")]
    Malformed(&'static str),

    /// The backend refused the request (`success: false`), with its message.
    #[error("Request rejected: {0}")]
    Rejected(String),
}
