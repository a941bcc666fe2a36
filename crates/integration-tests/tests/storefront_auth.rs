//! Integration tests for login, signup, logout, and the account page.
//!
//! Each test builds the full storefront router against a `wiremock` market
//! backend and drives it in-process. See the crate docs for the helpers.

use axum::Router;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marigold_integration_tests::{
    body_text, form_post, form_post_with_session, get, get_with_session, location, session_cookie,
    test_router,
};

const SIGNUP_FORM: &str =
    "username=ada&email=ada%40example.com&password=hunter2-long&address=1+Elm+Way&phone_number=5550100";

/// Test helper: log in as backend user `u1` and return the session cookie.
async fn login_session(router: &Router, server: &MockServer) -> String {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "userId": "u1"})),
        )
        .mount(server)
        .await;

    let response = router
        .clone()
        .oneshot(form_post("/auth/login", "username=mira&password=hunter2"))
        .await
        .expect("request handled");

    session_cookie(&response).expect("login sets a session cookie")
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_page_renders() {
    let (router, _server) = test_router().await;

    let response = router
        .oneshot(get("/auth/login"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("LOGIN"));
    assert!(body.contains("New? Sign up here"));
}

#[tokio::test]
async fn test_login_persists_session_and_redirects_home() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "userId": "u1"})),
        )
        .mount(&server)
        .await;

    let response = router
        .clone()
        .oneshot(form_post("/auth/login", "username=mira&password=hunter2"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let cookie = session_cookie(&response).expect("login sets a session cookie");

    // The session is live: the account page renders for this user
    let response = router
        .oneshot(get_with_session("/account", &cookie))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("@u1"));
    assert!(body.contains("Log out"));
}

#[tokio::test]
async fn test_login_rejection_shows_backend_message() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": false, "message": "Invalid credentials"}),
        ))
        .mount(&server)
        .await;

    let response = router
        .clone()
        .oneshot(form_post("/auth/login", "username=mira&password=wrong"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/login?error=Invalid%20credentials")
    );
    // No session is established on a rejection
    assert!(session_cookie(&response).is_none());

    // Following the redirect surfaces the backend's own message
    let response = router
        .oneshot(get("/auth/login?error=Invalid%20credentials"))
        .await
        .expect("request handled");
    let body = body_text(response).await;
    assert!(body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_login_rejection_envelope_on_error_status() {
    // The backend reports some rejections as an envelope on a 4xx status
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"success": false, "message": "Wrong password."}),
        ))
        .mount(&server)
        .await;

    let response = router
        .oneshot(form_post("/auth/login", "username=mira&password=wrong"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/login?error=Wrong%20password.")
    );
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = router
        .oneshot(form_post("/auth/login", "username=&password="))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/login?error=Username%20and%20password%20are%20required.")
    );
}

#[tokio::test]
async fn test_login_backend_error_shows_generic_notice() {
    // No login mock mounted: the backend answers 404 without an envelope
    let (router, _server) = test_router().await;

    let response = router
        .oneshot(form_post("/auth/login", "username=mira&password=hunter2"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/login?error=Something%20went%20wrong%2C%20please%20try%20again.")
    );
}

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_page_renders() {
    let (router, _server) = test_router().await;

    let response = router
        .oneshot(get("/auth/signup"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("SIGNUP"));
    assert!(body.contains("Back to login"));
}

#[tokio::test]
async fn test_signup_switches_to_login_without_session() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let response = router
        .clone()
        .oneshot(form_post("/auth/signup", SIGNUP_FORM))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some(
            "/auth/login?success=Account%20successfully%20created%2C%20please%20log%20in%20to%20continue."
        )
    );
    // Signing up does not log the new account in
    assert!(session_cookie(&response).is_none());

    // The login form shows the confirmation notice
    let uri = location(&response).expect("redirect location").to_string();
    let response = router
        .oneshot(get(&uri))
        .await
        .expect("request handled");
    let body = body_text(response).await;
    assert!(body.contains("Account successfully created, please log in to continue."));
}

#[tokio::test]
async fn test_signup_rejection_shows_backend_message() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": false, "message": "This username is taken."}),
        ))
        .mount(&server)
        .await;

    let response = router
        .oneshot(form_post("/auth/signup", SIGNUP_FORM))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/signup?error=This%20username%20is%20taken.")
    );
}

#[tokio::test]
async fn test_signup_validation_skips_backend_call() {
    let (router, server) = test_router().await;
    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let short_password = SIGNUP_FORM.replace("hunter2-long", "short");
    let response = router
        .oneshot(form_post("/auth/signup", &short_password))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        Some("/auth/signup?error=Password%20must%20be%20at%20least%208%20characters.")
    );
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session() {
    let (router, server) = test_router().await;
    let cookie = login_session(&router, &server).await;

    let response = router
        .clone()
        .oneshot(form_post_with_session("/auth/logout", &cookie, ""))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    // The old cookie no longer grants access
    let response = router
        .oneshot(get_with_session("/account", &cookie))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}

// ============================================================================
// Account Page Tests
// ============================================================================

#[tokio::test]
async fn test_account_requires_login() {
    let (router, _server) = test_router().await;

    let response = router
        .oneshot(get("/account"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/login"));
}

#[tokio::test]
async fn test_account_defaults_to_cart_pane() {
    let (router, server) = test_router().await;
    let cookie = login_session(&router, &server).await;

    let response = router
        .oneshot(get_with_session("/account", &cookie))
        .await
        .expect("request handled");

    let body = body_text(response).await;
    assert!(body.contains("Your cart is empty."));
    assert!(!body.contains("You have not purchased anything yet."));
    assert!(body.contains("class=\"tab tab--active\" href=\"/account?tab=cart\""));
}

#[tokio::test]
async fn test_account_purchases_pane() {
    let (router, server) = test_router().await;
    let cookie = login_session(&router, &server).await;

    let response = router
        .oneshot(get_with_session("/account?tab=purchases", &cookie))
        .await
        .expect("request handled");

    let body = body_text(response).await;
    assert!(body.contains("You have not purchased anything yet."));
    assert!(!body.contains("Your cart is empty."));
    assert!(body.contains("class=\"tab tab--active\" href=\"/account?tab=purchases\""));
}

// ============================================================================
// Rate Limiting Tests
// ============================================================================

#[tokio::test]
async fn test_login_attempts_are_rate_limited() {
    let (router, _server) = test_router().await;

    // Burst of 5 per client IP
    for _ in 0..5 {
        let response = router
            .clone()
            .oneshot(form_post("/auth/login", "username=&password="))
            .await
            .expect("request handled");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = router
        .oneshot(form_post("/auth/login", "username=&password="))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
