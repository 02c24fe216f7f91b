//! Session credential and lifecycle types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token representing an authenticated session.
///
/// `Debug` and `Display` only ever show a short preview.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a bearer token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for placing on the wire or in storage.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Get a preview of the token (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) if self.0.len() > 12 => format!("{}...", &self.0[..idx]),
            _ => "********".to_string(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.preview()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}

/// Session validity.
///
/// `Anonymous -(login)-> Authenticated -(logout | 401)-> Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No credential is held.
    #[default]
    Anonymous,
    /// A credential is held and attached to outgoing requests.
    Authenticated,
}

impl SessionState {
    /// Returns a user-friendly message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Anonymous => "Not signed in",
            Self::Authenticated => "Signed in",
        }
    }
}

/// Session transitions published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A login stored a new credential.
    SignedIn,
    /// An explicit logout removed the credential.
    SignedOut,
    /// The server rejected the credential; the session was terminated.
    Expired {
        /// Where the presentation layer should send the user.
        redirect_to: String,
    },
}
