//! Active-view tracking for tabbed page sections.
//!
//! The account page toggles between its cart and purchases panes, and the
//! auth pages flip between login and signup; both feed this one state type
//! into their templates. Labels are plain strings by contract: `toggle`
//! accepts anything and `is_active` is bare equality, so an unknown label
//! simply activates nothing the page knows about.

/// Known view labels.
pub mod labels {
    pub const CART: &str = "cart";
    pub const PURCHASES: &str = "purchases";
    pub const LOGIN: &str = "login";
    pub const SIGNUP: &str = "signup";
}

/// Tracks which named view is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewToggle {
    active: String,
}

impl ViewToggle {
    /// Create a toggle with an initial active view.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            active: initial.into(),
        }
    }

    /// Make `label` the active view. Unconditional; no label validation.
    pub fn toggle(&mut self, label: impl Into<String>) {
        self.active = label.into();
    }

    /// Whether `label` is the active view.
    #[must_use]
    pub fn is_active(&self, label: &str) -> bool {
        self.active == label
    }

    /// The active view's label.
    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    /// The structural class for an interactive element bound to `label`.
    ///
    /// One of exactly two variants, chosen by equality with the active
    /// label.
    #[must_use]
    pub fn class_for(&self, label: &str) -> &'static str {
        if self.is_active(label) {
            "tab tab--active"
        } else {
            "tab"
        }
    }
}
