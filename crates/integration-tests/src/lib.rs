//! In-process integration tests for the Marigold Market storefront.
//!
//! Tests build the real application router with the market client pointed at
//! a local `wiremock` server, then drive requests through
//! `tower::ServiceExt::oneshot`. No listener is bound and no live backend is
//! needed.
//!
//! The router is `Clone`, and clones share the session store, the catalog
//! cache, and the rate limiter state, so multi-request flows (log in, then
//! visit the account page) behave the way they do against a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marigold_storefront::config::{MarketApiConfig, StorefrontConfig};
use marigold_storefront::middleware::session::SESSION_COOKIE_NAME;
use marigold_storefront::routes::build_router;
use marigold_storefront::state::AppState;

/// Client IP stamped on every test request.
///
/// The auth rate limiter keys on the forwarded address and refuses requests
/// without one, so every builder here sets it.
pub const TEST_CLIENT_IP: &str = "203.0.113.7";

// =============================================================================
// Router Setup
// =============================================================================

/// Start a mock market backend and build a storefront router against it.
pub async fn test_router() -> (Router, MockServer) {
    let server = MockServer::start().await;
    let router = router_for(&server.uri());
    (router, server)
}

/// Build a storefront router for the given market API base URL.
#[must_use]
pub fn router_for(market_url: &str) -> Router {
    let config = StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        market: MarketApiConfig {
            base_url: market_url.trim_end_matches('/').to_string(),
        },
        sentry_dsn: None,
        sentry_environment: "test".to_string(),
    };

    build_router(AppState::new(config))
}

// =============================================================================
// Backend Fixtures
// =============================================================================

/// Catalog envelope with two products.
///
/// `p1` ("Velvet Scarf") carries two reviews, one from a deleted account;
/// `p2` ("Circuit Kit") has none, and a price whose cents need zero padding
/// when displayed.
#[must_use]
pub fn catalog_body() -> Value {
    json!({
        "success": true,
        "products": [
            {
                "id": "p1",
                "name": "Velvet Scarf",
                "price": 19.99,
                "desc": "Hand-dyed velvet scarf.",
                "qty": 12,
                "img": "https://img.example.com/p1.jpg",
                "category": "Fashion & Accessories",
                "user": {"userId": "u9", "username": "mira"},
                "reviews": [
                    {"id": "r1", "rating": 5, "comment": "Gorgeous color.", "user": "beth"},
                    {"id": "r2", "rating": 2, "comment": "Arrived late.", "user": "Deleted User"}
                ]
            },
            {
                "id": "p2",
                "name": "Circuit Kit",
                "price": 54.5,
                "desc": "Beginner electronics kit.",
                "qty": 3,
                "img": "https://img.example.com/p2.jpg",
                "category": "Electronics",
                "user": {"userId": "u4", "username": "theo"},
                "reviews": []
            }
        ]
    })
}

/// Mount the standard two-product catalog on the mock backend.
pub async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/product/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(server)
        .await;
}

// =============================================================================
// Request Builders
// =============================================================================

fn builder(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", TEST_CLIENT_IP)
}

/// Build a GET request.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    builder(Method::GET, uri)
        .body(Body::empty())
        .expect("request is well formed")
}

/// Build a GET request carrying a session cookie.
#[must_use]
pub fn get_with_session(uri: &str, cookie: &str) -> Request<Body> {
    builder(Method::GET, uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request is well formed")
}

/// Build a form POST with an urlencoded body.
#[must_use]
pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    builder(Method::POST, uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request is well formed")
}

/// Build a form POST carrying a session cookie.
#[must_use]
pub fn form_post_with_session(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    builder(Method::POST, uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .expect("request is well formed")
}

// =============================================================================
// Response Readers
// =============================================================================

/// Collect a response body into text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// The session cookie set by a response, as a `Cookie` header value.
///
/// Returns `None` when the response did not establish a session.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let prefix = format!("{SESSION_COOKIE_NAME}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&prefix))
        .and_then(|value| value.split(';').next())
        .map(ToString::to_string)
}
