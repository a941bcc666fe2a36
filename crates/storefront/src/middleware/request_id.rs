//! Request ID middleware for request tracing and correlation.
//!
//! Every request gets an identifier that shows up in the request span, in
//! Sentry tags, and in the response headers, so one value links a user
//! report, the log line, and the captured error.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Reuse the proxy-assigned request ID, or mint a UUID v4.
fn request_id_for(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request carries a request ID.
///
/// The span this records into must declare an empty `request_id` field;
/// recording into an undeclared field is silently dropped.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_for(&request);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Echo back so clients can quote the ID in bug reports
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
