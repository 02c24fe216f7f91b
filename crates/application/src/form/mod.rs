//! Form Engine
//!
//! Tracks field values, validation errors and submission state for any
//! data-entry form. A form's fields are declared statically by its value type
//! through [`FormModel`].

mod engine;
mod field;
mod model;

pub use engine::{Form, FormErrors, FormState, SubmitOutcome, ValidatorFn, validate};
pub use field::{FieldKind, FieldValue, RawInput};
pub use model::{FormError, FormModel};
