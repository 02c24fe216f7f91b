//! User accounts and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// A registered user as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub username: String,
    /// Sign-in email address.
    #[serde(default)]
    pub email: String,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// URL of the profile image, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Account creation time.
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

const fn default_true() -> bool {
    true
}

/// Credentials entered on the sign-in screen.
///
/// Sent form-encoded, with the email in the `username` field.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Sign-in email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the form fields expected by the token endpoint.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [
            ("username", self.email.clone()),
            ("password", self.password.clone()),
        ]
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Sign-in email address.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default)]
    pub token_type: String,
}

/// Profile image upload response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileImage {
    /// URL of the stored image.
    pub profile_image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_from_backend_json() {
        let json = r#"{
            "id": 7, "email": "cook@example.com", "username": "cook",
            "is_active": true, "is_superuser": false, "profile_image": null,
            "created_at": "2024-01-05T09:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "cook");
        assert_eq!(user.profile_image, None);
    }

    #[test]
    fn test_login_form_uses_email_as_username() {
        let credentials = LoginCredentials::new("cook@example.com", "hunter22");
        let fields = credentials.form_fields();
        assert_eq!(fields[0], ("username", "cook@example.com".to_string()));
        assert!(!format!("{credentials:?}").contains("hunter22"));
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UserUpdate {
            username: Some("chef".to_string()),
            ..UserUpdate::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"username":"chef"}"#
        );
    }
}
