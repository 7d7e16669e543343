//! The authenticated user identity as seen by this application.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Fallback display name when the provider supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// An authenticated principal returned by the identity provider.
///
/// The application never persists or mutates a principal; it is held in the
/// session context between sign-in and sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Principal {
    /// First whitespace-separated token of the display name, or `"User"`.
    pub fn first_name(&self) -> &str {
        self.name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Email for greetings, falling back to the display name.
    pub fn greeting_name(&self) -> &str {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| self.first_name())
    }
}
