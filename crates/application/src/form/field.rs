//! Field kinds and input coercion.

use serde::{Deserialize, Serialize};

use super::FormError;

/// Declared input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Masked text.
    Password,
    /// Multi-line text.
    TextArea,
    /// One option of a fixed list, carried as text.
    Select,
    /// Floating-point number.
    Number,
    /// Boolean toggle.
    Checkbox,
}

impl FieldKind {
    /// Converts a raw input event into a stored value.
    ///
    /// Checkboxes take the checked flag. Numbers parse the trimmed text and
    /// fall back to `0` on any failure or non-finite result. Every other kind
    /// keeps the raw text unchanged.
    #[must_use]
    pub fn coerce(self, input: &RawInput) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Bool(input.checked),
            Self::Number => FieldValue::Number(
                input
                    .value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .unwrap_or(0.0),
            ),
            Self::Text | Self::Email | Self::Password | Self::TextArea | Self::Select => {
                FieldValue::Text(input.value.clone())
            }
        }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Toggle state.
    Bool(bool),
}

impl FieldValue {
    /// Returns the variant name used in mismatch errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
        }
    }

    /// Unwraps text content for `field`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` for any other variant.
    pub fn into_text(self, field: &'static str) -> Result<String, FormError> {
        match self {
            Self::Text(text) => Ok(text),
            other => Err(FormError::mismatch(field, "text", &other)),
        }
    }

    /// Unwraps numeric content for `field`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` for any other variant.
    pub fn into_number(self, field: &'static str) -> Result<f64, FormError> {
        match self {
            Self::Number(number) => Ok(number),
            other => Err(FormError::mismatch(field, "number", &other)),
        }
    }

    /// Unwraps a toggle state for `field`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` for any other variant.
    pub fn into_bool(self, field: &'static str) -> Result<bool, FormError> {
        match self {
            Self::Bool(flag) => Ok(flag),
            other => Err(FormError::mismatch(field, "bool", &other)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The payload of an input-change event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    /// Text content of the input.
    pub value: String,
    /// Checked flag, meaningful for checkboxes only.
    pub checked: bool,
}

impl RawInput {
    /// An event carrying text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }

    /// An event carrying a checkbox state.
    #[must_use]
    pub fn checkbox(checked: bool) -> Self {
        Self {
            value: String::new(),
            checked,
        }
    }
}
