//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email address cannot be empty")]
    Empty,
    /// The input string exceeds [`Email::MAX_LEN`].
    #[error("email address must be at most {} characters", Email::MAX_LEN)]
    TooLong,
    /// The input is not shaped like `name@host`.
    #[error("email address must look like name@host")]
    Syntax,
}

/// A syntactically plausible email address.
///
/// Signup is the only place the storefront accepts an email, and the backend
/// re-validates on its side, so the check here is shape-only: exactly one
/// `@` with text on both sides, no whitespace, and a bounded length.
/// Deliverability is not checked.
///
/// ## Examples
///
/// ```
/// use marigold_core::Email;
///
/// assert!(Email::parse("user@example.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("two@at@signs").is_err());
/// assert!(Email::parse("spaced out@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum accepted length (RFC 5321 path limit).
    pub const MAX_LEN: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the input is empty, longer than
    /// [`Self::MAX_LEN`], or not shaped like `name@host`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(EmailError::TooLong);
        }

        let Some((local, host)) = s.split_once('@') else {
            return Err(EmailError::Syntax);
        };
        if local.is_empty() || host.is_empty() || host.contains('@') {
            return Err(EmailError::Syntax);
        }
        if s.contains(char::is_whitespace) {
            return Err(EmailError::Syntax);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
