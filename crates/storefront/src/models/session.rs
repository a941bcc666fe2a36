//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use marigold_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user. This is
/// the single source of truth for login state: the nav flag, the account page,
/// and the auth extractors all read this entry, so they can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User identifier assigned by the market backend.
    pub id: UserId,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
