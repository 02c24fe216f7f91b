//! Meal editor form.

use larder_domain::MealDraft;

use crate::form::{FieldKind, FieldValue, Form, FormError, FormErrors, FormModel};

/// Values of the meal editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealForm {
    /// Meal name.
    pub name: String,
}

/// Fields of [`MealForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealField {
    /// `name`
    Name,
}

impl FormModel for MealForm {
    type Field = MealField;
    const FIELDS: &'static [MealField] = &[MealField::Name];

    fn field_name(_: MealField) -> &'static str {
        "name"
    }

    fn field_kind(_: MealField) -> FieldKind {
        FieldKind::Text
    }

    fn field_value(&self, _: MealField) -> FieldValue {
        FieldValue::Text(self.name.clone())
    }

    fn apply(&mut self, field: MealField, value: FieldValue) -> Result<(), FormError> {
        self.name = value.into_text(Self::field_name(field))?;
        Ok(())
    }
}

impl MealForm {
    /// Creates the meal editor, prefilled when renaming.
    #[must_use]
    pub fn form(name: impl Into<String>) -> Form<Self> {
        Form::with_validator(Self { name: name.into() }, Self::validate)
    }

    /// The name is required.
    #[must_use]
    pub fn validate(&self) -> FormErrors<MealField> {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(MealField::Name, "Meal name is required");
        }
        errors
    }

    /// Returns the create/rename payload.
    #[must_use]
    pub fn draft(&self) -> MealDraft {
        MealDraft {
            name: self.name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_required() {
        assert_eq!(MealForm::default().validate().get(MealField::Name), Some("Meal name is required"));
        assert_eq!(MealForm::form(" Stew ").values().draft().name, "Stew");
    }
}
