//! Authentication route handlers.
//!
//! Handles login, signup, and logout against the market backend. Form posts
//! follow POST-redirect-GET; notices travel urlencoded in the query string,
//! and backend rejection messages are surfaced to the user verbatim.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use marigold_core::Email;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::market::MarketError;
use crate::market::types::{LoginRequest, SignupRequest};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Notice shown on the login form after a successful signup.
const SIGNUP_SUCCESS_NOTICE: &str = "Account successfully created, please log in to continue.";

/// Notice shown when the backend cannot be reached at all.
const BACKEND_UNAVAILABLE_NOTICE: &str = "Something went wrong, please try again.";

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone_number: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
    pub logged_in: bool,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub error: Option<String>,
    pub logged_in: bool,
}

// =============================================================================
// Helpers
// =============================================================================

/// Redirect back to a form page with a notice in the query string.
fn notice_redirect(path: &str, param: &str, message: &str) -> Response {
    let url = format!("{path}?{param}={}", urlencoding::encode(message));
    Redirect::to(&url).into_response()
}

/// Validate the signup form and build the backend payload.
///
/// Returns the user-facing message for the first failing field.
fn validate_signup(form: SignupForm) -> Result<SignupRequest, &'static str> {
    let username = form.username.trim();
    if username.is_empty() {
        return Err("Username is required.");
    }

    let Ok(email) = Email::parse(form.email.trim()) else {
        return Err("A valid email address is required.");
    };

    if form.password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }

    let address = form.address.trim();
    if address.is_empty() {
        return Err("Address is required.");
    }

    let phone_number = form.phone_number.trim();
    if phone_number.is_empty() {
        return Err("Phone number is required.");
    }

    Ok(SignupRequest {
        username: username.to_string(),
        email,
        password: form.password,
        address: address.to_string(),
        phone_number: phone_number.to_string(),
    })
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
        logged_in: user.is_some(),
    }
}

/// Handle login form submission.
///
/// On success the user id from the backend is persisted in the session and
/// the user lands on the home page. A rejection carries the backend's own
/// message back to the form.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return notice_redirect("/auth/login", "error", "Username and password are required.");
    }

    let credentials = LoginRequest {
        username: username.to_string(),
        password: form.password,
    };

    match state.market().login(&credentials).await {
        Ok(user_id) => {
            let user = CurrentUser { id: user_id };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return notice_redirect("/auth/login", "error", BACKEND_UNAVAILABLE_NOTICE);
            }

            set_sentry_user(&user.id);
            tracing::info!(user_id = %user.id, "User logged in");
            Redirect::to("/").into_response()
        }
        Err(MarketError::Rejected(message)) => {
            tracing::warn!("Login rejected: {message}");
            notice_redirect("/auth/login", "error", &message)
        }
        Err(e) => {
            tracing::error!("Login request failed: {e}");
            notice_redirect("/auth/login", "error", BACKEND_UNAVAILABLE_NOTICE)
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    SignupTemplate {
        error: query.error,
        logged_in: user.is_some(),
    }
}

/// Handle signup form submission.
///
/// On success the user is sent to the login form with a confirmation notice.
/// No session state is written; the new account still has to log in.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let request = match validate_signup(form) {
        Ok(request) => request,
        Err(message) => return notice_redirect("/auth/signup", "error", message),
    };

    match state.market().signup(&request).await {
        Ok(()) => {
            tracing::info!(username = %request.username, "Account created");
            notice_redirect("/auth/login", "success", SIGNUP_SUCCESS_NOTICE)
        }
        Err(MarketError::Rejected(message)) => {
            tracing::warn!("Signup rejected: {message}");
            notice_redirect("/auth/signup", "error", &message)
        }
        Err(e) => {
            tracing::error!("Signup request failed: {e}");
            notice_redirect("/auth/signup", "error", BACKEND_UNAVAILABLE_NOTICE)
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the session and drops the Sentry user scope.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();
    Redirect::to("/").into_response()
}
