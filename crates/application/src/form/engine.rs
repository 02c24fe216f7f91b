//! Form state and submission lifecycle.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{FieldValue, FormError, FormModel, RawInput};

/// Field-scoped validation messages, ordered by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors<F: Ord> {
    messages: BTreeMap<F, String>,
}

impl<F: Ord + Copy> FormErrors<F> {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }

    /// Records a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    /// Returns the message for `field`.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Returns true if `field` has a message.
    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.messages.contains_key(&field)
    }

    /// Returns true if no field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of fields with a message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterates over field/message pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.messages.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl<F: Ord + Copy> Default for FormErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of one form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T: FormModel> {
    /// Current field values.
    pub values: T,
    /// Current validation messages.
    pub errors: FormErrors<T::Field>,
    /// True from the start of a submission until its action settles.
    pub is_submitting: bool,
}

impl<T: FormModel> FormState<T> {
    /// Fresh state: the given values, no errors, not submitting.
    #[must_use]
    pub fn initialize(values: T) -> Self {
        Self {
            values,
            errors: FormErrors::new(),
            is_submitting: false,
        }
    }
}

/// A synchronous, side-effect free validation function.
pub type ValidatorFn<T> = dyn Fn(&T) -> FormErrors<<T as FormModel>::Field> + Send + Sync;

/// Runs `validator` over `values`; no validator means no errors.
#[must_use]
pub fn validate<T: FormModel>(values: &T, validator: Option<&ValidatorFn<T>>) -> FormErrors<T::Field> {
    validator.map_or_else(FormErrors::new, |validator| validator(values))
}

/// Result of [`Form::submit`].
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome<F: Ord, E> {
    /// Validation passed and the action succeeded.
    Submitted,
    /// Validation failed; the action was not invoked.
    Invalid(FormErrors<F>),
    /// The action ran and failed.
    Failed(E),
    /// A submission was already in flight; nothing ran.
    Busy,
}

impl<F: Ord, E> SubmitOutcome<F, E> {
    /// Returns true if the action ran and succeeded.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

struct Shared<T: FormModel> {
    initial: T,
    validator: Option<Arc<ValidatorFn<T>>>,
    state: Mutex<FormState<T>>,
}

/// Shared handle to one live form instance.
///
/// Clones observe and update the same state.
pub struct Form<T: FormModel> {
    shared: Arc<Shared<T>>,
}

impl<T: FormModel> Clone for Form<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: FormModel> fmt::Debug for Form<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("state", &*self.shared.state.lock())
            .field("has_validator", &self.shared.validator.is_some())
            .finish()
    }
}

/// Clears the submitting flag when the submission settles or is dropped.
struct SubmittingGuard<'a, T: FormModel> {
    state: &'a Mutex<FormState<T>>,
}

impl<T: FormModel> Drop for SubmittingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.lock().is_submitting = false;
    }
}

impl<T: FormModel> Form<T> {
    /// Creates a form with no validator.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::build(initial, None)
    }

    /// Creates a form with no validator.
    #[must_use]
    pub fn initialize(initial: T) -> Self {
        Self::new(initial)
    }

    /// Creates a form that runs `validator` before every submission.
    #[must_use]
    pub fn with_validator<V>(initial: T, validator: V) -> Self
    where
        V: Fn(&T) -> FormErrors<T::Field> + Send + Sync + 'static,
    {
        Self::build(initial, Some(Arc::new(validator)))
    }

    fn build(initial: T, validator: Option<Arc<ValidatorFn<T>>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(FormState::initialize(initial.clone())),
                initial,
                validator,
            }),
        }
    }

    /// Returns a snapshot of the whole state.
    #[must_use]
    pub fn state(&self) -> FormState<T> {
        self.shared.state.lock().clone()
    }

    /// Returns the current values.
    #[must_use]
    pub fn values(&self) -> T {
        self.shared.state.lock().values.clone()
    }

    /// Returns the current errors.
    #[must_use]
    pub fn errors(&self) -> FormErrors<T::Field> {
        self.shared.state.lock().errors.clone()
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.shared.state.lock().is_submitting
    }

    /// Applies an input event to `field`, coercing by its declared kind.
    ///
    /// Errors are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` if the model rejects its own kind.
    pub fn set_field(&self, field: T::Field, input: &RawInput) -> Result<(), FormError> {
        let value = T::field_kind(field).coerce(input);
        self.shared.state.lock().values.apply(field, value)
    }

    /// Applies an input event to the field called `name`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` if the form has no such field.
    pub fn set_field_by_name(&self, name: &str, input: &RawInput) -> Result<(), FormError> {
        let field = T::field_named(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.set_field(field, input)
    }

    /// Writes a typed value into `field` without coercion.
    ///
    /// # Errors
    ///
    /// Returns `FormError::TypeMismatch` if `value` has the wrong variant.
    pub fn set_field_value(&self, field: T::Field, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.shared.state.lock().values.apply(field, value.into())
    }

    /// Replaces all values at once.
    pub fn set_values(&self, values: T) {
        self.shared.state.lock().values = values;
    }

    /// Validates the current values and adopts the result as the errors.
    pub fn validate(&self) -> FormErrors<T::Field> {
        let mut state = self.shared.state.lock();
        let errors = validate(&state.values, self.shared.validator.as_deref());
        state.errors = errors.clone();
        errors
    }

    /// Validates, then runs `action` with the current values.
    ///
    /// Returns [`SubmitOutcome::Busy`] without validating when another
    /// submission is in flight. The submitting flag is cleared when the action
    /// settles, or when this future is dropped before it does.
    pub async fn submit<A, Fut, E>(&self, action: A) -> SubmitOutcome<T::Field, E>
    where
        A: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        let values = {
            let mut state = self.shared.state.lock();
            if state.is_submitting {
                debug!("Submission already in flight");
                return SubmitOutcome::Busy;
            }
            let errors = validate(&state.values, self.shared.validator.as_deref());
            state.errors = errors.clone();
            if !errors.is_empty() {
                debug!(fields = errors.len(), "Form has validation errors");
                return SubmitOutcome::Invalid(errors);
            }
            state.is_submitting = true;
            state.values.clone()
        };

        let _guard = SubmittingGuard {
            state: &self.shared.state,
        };
        match action(values).await {
            Ok(()) => SubmitOutcome::Submitted,
            Err(e) => {
                warn!(error = %e, "Form submission failed");
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Restores the initial values and clears errors.
    pub fn reset(&self) {
        let mut state = self.shared.state.lock();
        state.values = self.shared.initial.clone();
        state.errors = FormErrors::new();
    }
}
