//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Catalog grid (optional ?category= filter)
//! GET  /health            - Health check
//!
//! # Products
//! GET  /products/{id}     - Product detail with reviews
//!
//! # Auth
//! GET  /auth/login        - Login page
//! POST /auth/login        - Login action
//! GET  /auth/signup       - Signup page
//! POST /auth/signup       - Signup action
//! POST /auth/logout       - Logout action
//!
//! # Account (requires auth)
//! GET  /account           - Cart/purchases tab panes
//! ```

pub mod account;
pub mod auth;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{auth_rate_limiter, create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the auth routes router.
///
/// Form POSTs carry the per-IP rate limiter; the form pages do not.
pub fn auth_routes() -> Router<AppState> {
    let pages = Router::new()
        .route("/login", get(auth::login_page))
        .route("/signup", get(auth::signup_page));

    let actions = Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route_layer(auth_rate_limiter());

    pages.merge(actions)
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Account page
        .route("/account", get(account::index))
        // Auth routes
        .nest("/auth", auth_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Build the complete application router.
///
/// Assembles the routes, the session layer, request IDs, request tracing,
/// and the Sentry layers. Integration tests drive this router in-process.
pub fn build_router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
