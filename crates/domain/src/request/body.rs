//! HTTP Request body types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Content type of JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of form-urlencoded bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
    /// Form field name (e.g. `file`).
    pub name: String,
    /// File name reported to the server; also used to guess the MIME type.
    pub file_name: String,
    /// Raw part content.
    pub content: Vec<u8>,
}

impl MultipartPart {
    /// Creates a file part.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// HTTP request body, tagged by encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(serde_json::Value),
    /// Form URL encoded key-value pairs
    Form(Vec<(String, String)>),
    /// Multipart form data
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    /// Creates a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Creates a form-urlencoded body.
    #[must_use]
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns whether the body is absent.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if applicable.
    ///
    /// Multipart bodies return `None`: the boundary is chosen by the transport.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None | Self::Multipart(_) => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body() {
        let body = RequestBody::json(&serde_json::json!({"name": "Pancakes"})).unwrap();
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));
        assert!(!body.is_none());
    }

    #[test]
    fn test_form_body() {
        let body = RequestBody::form([("username", "a@b.io"), ("password", "secret")]);
        assert_eq!(body.content_type(), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            body,
            RequestBody::Form(vec![
                ("username".to_string(), "a@b.io".to_string()),
                ("password".to_string(), "secret".to_string()),
            ])
        );
    }

    #[test]
    fn test_empty_body() {
        let body = RequestBody::None;
        assert!(body.is_none());
        assert_eq!(body.content_type(), None);
    }
}
