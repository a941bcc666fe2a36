//! Market API client implementation.
//!
//! Plain REST JSON over `reqwest` 0.13. The product catalog is cached with
//! `moka` (5-minute TTL); auth calls are never cached.

use std::sync::Arc;
use std::time::Duration;

use marigold_core::UserId;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::MarketApiConfig;

use super::MarketError;
use super::conversions::{CatalogResponse, LoginResponse, SignupResponse, convert_product};
use super::types::{LoginRequest, Product, SignupRequest};

const CATALOG_CACHE_KEY: &str = "catalog";

// =============================================================================
// MarketClient
// =============================================================================

/// Client for the marketplace backend API.
///
/// Cheaply cloneable; all clones share one connection pool and one catalog
/// cache.
#[derive(Clone)]
pub struct MarketClient {
    inner: Arc<MarketClientInner>,
}

struct MarketClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog_cache: Cache<String, Arc<Vec<Product>>>,
}

impl MarketClient {
    /// Create a new market API client.
    #[must_use]
    pub fn new(config: &MarketApiConfig) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(MarketClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                catalog_cache,
            }),
        }
    }

    /// Send a GET request and read the envelope.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MarketError> {
        let response = self
            .inner
            .client
            .get(format!("{}{path}", self.inner.base_url))
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    /// Send a POST request with a JSON body and read the envelope.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, MarketError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(format!("{}{path}", self.inner.base_url))
            .json(body)
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    /// Decode a response body into an envelope type.
    ///
    /// The backend reports failures as `success: false` envelopes, sometimes
    /// on a 4xx status, so the body is tried first and the status is only
    /// surfaced when no envelope can be read from it.
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MarketError> {
        let status = response.status();
        let response_text = response.text().await?;

        match serde_json::from_str(&response_text) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                tracing::error!(
                    status = %status,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Market API returned non-success status"
                );
                Err(MarketError::Status(status))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse market API response"
                );
                Err(MarketError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the product catalog (the backend caps this at its first 20
    /// products).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is unusable.
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> Result<Arc<Vec<Product>>, MarketError> {
        if let Some(products) = self.inner.catalog_cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let envelope: CatalogResponse = self.get_json("/api/product/all").await?;

        if !envelope.success {
            return Err(MarketError::Rejected(rejection_message(envelope.message)));
        }

        let records = envelope.products.ok_or(MarketError::Malformed("products"))?;
        let products: Arc<Vec<Product>> = Arc::new(
            records
                .into_iter()
                .map(convert_product)
                .collect::<Result<_, _>>()?,
        );

        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY.to_string(), Arc::clone(&products))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Auth Methods (not cached)
    // =========================================================================

    /// Authenticate a user.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Rejected`] with the backend's own message when
    /// the credentials are refused, or a transport error otherwise.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserId, MarketError> {
        let envelope: LoginResponse = self.post_json("/login", credentials).await?;

        if !envelope.success {
            return Err(MarketError::Rejected(rejection_message(envelope.message)));
        }

        envelope
            .user_id
            .map(UserId::from)
            .ok_or(MarketError::Malformed("userId"))
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Rejected`] with the backend's own message when
    /// the registration is refused, or a transport error otherwise.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn signup(&self, form: &SignupRequest) -> Result<(), MarketError> {
        let envelope: SignupResponse = self.post_json("/signup", form).await?;

        if envelope.success {
            Ok(())
        } else {
            Err(MarketError::Rejected(rejection_message(envelope.message)))
        }
    }
}

fn rejection_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| "Request rejected".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_fallback() {
        assert_eq!(rejection_message(None), "Request rejected");
        assert_eq!(
            rejection_message(Some("Wrong password.".to_string())),
            "Wrong password."
        );
    }
}
