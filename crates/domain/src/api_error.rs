//! Normalized failure shape for every backend call.
//!
//! Whatever went wrong (a refused connection, a 404, an unparseable body),
//! callers receive one `ApiError` carrying a status code, a message fit for
//! display, and optional technical details.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DomainError;
use crate::response::ApiResponse;

/// Categories of request failures for user-facing display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The session credential was rejected (401).
    Unauthorized,
    /// The credential is valid but lacks access (403).
    Forbidden,
    /// The resource does not exist (404).
    NotFound,
    /// The server rejected the payload (422).
    Validation,
    /// Any other 4xx response.
    Client,
    /// Any 5xx response.
    Server,
    /// The request timed out before a response arrived.
    Timeout,
    /// No connection could be established.
    Connection,
    /// The request could not be built or encoded.
    InvalidRequest,
    /// The response body did not have the expected shape.
    InvalidResponse,
    /// Unknown or unexpected error.
    Unknown,
}

impl ApiErrorKind {
    /// Maps an HTTP status code onto a category.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }

    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Session Expired",
            Self::Forbidden => "Access Denied",
            Self::NotFound => "Not Found",
            Self::Validation => "Invalid Data",
            Self::Client => "Request Rejected",
            Self::Server => "Server Error",
            Self::Timeout => "Request Timeout",
            Self::Connection => "Connection Failed",
            Self::InvalidRequest => "Invalid Request",
            Self::InvalidResponse => "Unexpected Response",
            Self::Unknown => "Unknown Error",
        }
    }
}

/// A failed backend call, normalized.
///
/// `status_code` is `0` when no HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (status {status_code})")]
pub struct ApiError {
    /// HTTP status, or `0` for transport-level failures.
    pub status_code: u16,
    /// Message fit for display.
    pub message: String,
    /// Optional technical details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Failure category.
    pub kind: ApiErrorKind,
}

/// Error envelope returned by the backend: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Items(Vec<ValidationItem>),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl ValidationItem {
    fn describe(&self) -> String {
        let field = self
            .loc
            .iter()
            .filter_map(|part| match part {
                serde_json::Value::String(s) if s != "body" && s != "query" => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(".");
        if field.is_empty() {
            self.msg.clone()
        } else {
            format!("{field}: {}", self.msg)
        }
    }
}

impl ApiError {
    /// Creates an error.
    #[must_use]
    pub fn new(status_code: u16, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            details: None,
            kind,
        }
    }

    /// Adds technical details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates an error for a request that could not be built.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(0, ApiErrorKind::InvalidRequest, message)
    }

    /// Creates an error for a body that did not decode into the expected type.
    #[must_use]
    pub fn invalid_response(status_code: u16, details: impl Into<String>) -> Self {
        Self::new(
            status_code,
            ApiErrorKind::InvalidResponse,
            "Unexpected response from server",
        )
        .with_details(details)
    }

    /// Normalizes a non-success response.
    ///
    /// The backend's `{"detail": "..."}` envelope supplies the message when
    /// present; validation envelopes are flattened into `details`.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        let kind = ApiErrorKind::from_status(response.status);
        let fallback = if response.status_text.is_empty() {
            format!("Request failed with status {}", response.status)
        } else {
            response.status_text.clone()
        };

        match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
            Ok(ErrorEnvelope {
                detail: ErrorDetail::Message(message),
            }) => Self::new(response.status, kind, message),
            Ok(ErrorEnvelope {
                detail: ErrorDetail::Items(items),
            }) => {
                let details = items
                    .iter()
                    .map(ValidationItem::describe)
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::new(response.status, kind, "Validation failed").with_details(details)
            }
            Err(_) => {
                let error = Self::new(response.status, kind, fallback);
                let text = response.text();
                if text.trim().is_empty() {
                    error
                } else {
                    error.with_details(text)
                }
            }
        }
    }

    /// Returns true if the session credential was rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Unauthorized)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, status_text: &str, body: &str) -> ApiResponse {
        ApiResponse {
            status_text: status_text.to_string(),
            ..ApiResponse::new(status, body)
        }
    }

    #[test]
    fn test_detail_string_becomes_message() {
        let error = ApiError::from_response(&response(
            404,
            "Not Found",
            r#"{"detail":"Meal not found"}"#,
        ));
        assert_eq!(error.status_code, 404);
        assert_eq!(error.message, "Meal not found");
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_validation_items_are_flattened() {
        let body = r#"{"detail":[
            {"loc":["body","rating"],"msg":"ensure this value is less than or equal to 10","type":"value_error"},
            {"loc":["query","meal_id"],"msg":"field required","type":"value_error.missing"}
        ]}"#;
        let error = ApiError::from_response(&response(422, "Unprocessable Entity", body));

        assert_eq!(error.kind, ApiErrorKind::Validation);
        assert_eq!(error.message, "Validation failed");
        assert_eq!(
            error.details.as_deref(),
            Some("rating: ensure this value is less than or equal to 10; meal_id: field required")
        );
    }

    #[test]
    fn test_plain_body_falls_back_to_status_text() {
        let error = ApiError::from_response(&response(502, "Bad Gateway", "upstream down"));
        assert_eq!(error.message, "Bad Gateway");
        assert_eq!(error.details.as_deref(), Some("upstream down"));
        assert_eq!(error.kind, ApiErrorKind::Server);
    }

    #[test]
    fn test_empty_body_without_status_text() {
        let error = ApiError::from_response(&response(418, "", ""));
        assert_eq!(error.message, "Request failed with status 418");
        assert_eq!(error.details, None);
        assert_eq!(error.kind, ApiErrorKind::Client);
    }

    #[test]
    fn test_kind_titles() {
        assert_eq!(ApiErrorKind::Timeout.title(), "Request Timeout");
        assert_eq!(ApiErrorKind::from_status(401).title(), "Session Expired");
    }
}
