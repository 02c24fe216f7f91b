//! Static field declarations for form value types.

use std::fmt::Debug;

use thiserror::Error;

use super::{FieldKind, FieldValue};

/// Errors raised when updating form values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// An input event named a field the form does not declare.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A value of the wrong type was applied to a field.
    #[error("field `{field}` expects a {expected} value, got {actual}")]
    TypeMismatch {
        /// Field name.
        field: &'static str,
        /// Expected value type.
        expected: &'static str,
        /// Supplied value type.
        actual: &'static str,
    },
}

impl FormError {
    pub(crate) const fn mismatch(field: &'static str, expected: &'static str, actual: &FieldValue) -> Self {
        Self::TypeMismatch {
            field,
            expected,
            actual: actual.type_name(),
        }
    }
}

/// A value type whose fields are known at compile time.
pub trait FormModel: Clone + Debug + Send + Sync + 'static {
    /// Fieldless enum naming each field.
    type Field: Copy + Ord + Debug + Send + Sync + 'static;

    /// Every field, in display order.
    const FIELDS: &'static [Self::Field];

    /// The name carried by input events for `field`.
    fn field_name(field: Self::Field) -> &'static str;

    /// The declared input kind of `field`.
    fn field_kind(field: Self::Field) -> FieldKind;

    /// Reads the current value of `field`.
    fn field_value(&self, field: Self::Field) -> FieldValue;

    /// Writes `value` into `field`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` if `value` has the wrong variant.
    fn apply(&mut self, field: Self::Field, value: FieldValue) -> Result<(), FormError>;

    /// Maps an input event's field name onto the field enum.
    fn field_named(name: &str) -> Option<Self::Field> {
        Self::FIELDS
            .iter()
            .copied()
            .find(|field| Self::field_name(*field) == name)
    }
}
