//! Client Settings Domain Model
//!
//! Defines the connection preferences for the Larder client.

use serde::{Deserialize, Serialize};

/// Default API base address: a local development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default sign-in entry point announced when a session expires.
pub const DEFAULT_SIGN_IN_PATH: &str = "/login";

/// Connection settings for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Base address every request path is appended to.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where the presentation layer sends the user after a 401.
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_sign_in_path() -> String {
    DEFAULT_SIGN_IN_PATH.to_string()
}

fn default_user_agent() -> String {
    format!("larder/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientSettings {
    /// Returns settings pointing at the given base address.
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Returns the base address without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            sign_in_path: default_sign_in_path(),
            user_agent: default_user_agent(),
        }
    }
}
