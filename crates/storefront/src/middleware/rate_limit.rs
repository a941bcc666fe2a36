//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Provides the rate limiter for authentication endpoints (~10/min per IP),
//! which is the only surface where blind retries are worth throttling.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

// =============================================================================
// IP Key Extractor
// =============================================================================

/// Key extractor that checks standard proxy headers first, then falls back
/// to the peer address.
///
/// The storefront runs behind a reverse proxy in production, so the real
/// client IP arrives in `X-Forwarded-For` or `X-Real-IP`. When neither is
/// present (local development), the socket peer address is used instead.
#[derive(Clone, Copy)]
pub struct ForwardedIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ForwardedIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // Try X-Forwarded-For (first IP in the chain)
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try X-Real-IP
        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Fall back to the peer address (requires connect info on the server)
        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return Ok(addr.ip());
        }

        Err(GovernorError::UnableToExtractKey)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ForwardedIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
/// This prevents brute force attacks on login/signup endpoints.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(6)` and `burst_size(5)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ForwardedIpKeyExtractor)
        .per_second(6) // Replenish 1 token every 6 seconds (~10/minute)
        .burst_size(5) // Allow burst of 5 requests
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn request_with_header(name: &'static str, value: &str) -> Request<Body> {
        Request::builder()
            .uri("/auth/login")
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extracts_first_forwarded_ip() {
        let req = request_with_header("x-forwarded-for", "203.0.113.9, 10.0.0.1");
        let key = ForwardedIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(key, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_falls_back_to_real_ip_header() {
        let req = request_with_header("x-real-ip", "198.51.100.4");
        let key = ForwardedIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(key, "198.51.100.4".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_rejects_request_without_client_ip() {
        let req = Request::builder()
            .uri("/auth/login")
            .body(Body::empty())
            .unwrap();
        assert!(ForwardedIpKeyExtractor.extract(&req).is_err());
    }
}
