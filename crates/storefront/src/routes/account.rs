//! Account route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::tabs::{ViewToggle, labels};

/// Tab selection query parameters.
#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub user_id: String,
    pub toggle: ViewToggle,
    pub logged_in: bool,
}

/// Display the account page with the cart/purchases tab panes.
///
/// The `RequireAuth` extractor redirects anonymous visitors to the login
/// page. `?tab=` switches the active pane; the cart pane is the default.
pub async fn index(
    RequireAuth(user): RequireAuth,
    Query(query): Query<TabQuery>,
) -> impl IntoResponse {
    let mut toggle = ViewToggle::new(labels::CART);
    if let Some(tab) = query.tab {
        toggle.toggle(tab);
    }

    AccountTemplate {
        user_id: user.id.to_string(),
        toggle,
        logged_in: true,
    }
}
