//! Ingredient editor form.

use larder_domain::IngredientDraft;

use crate::form::{FieldKind, FieldValue, Form, FormError, FormErrors, FormModel};

/// Values of the ingredient editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientForm {
    /// Ingredient name.
    pub name: String,
    /// Whether other users may see the ingredient.
    pub is_public: bool,
}

/// Fields of [`IngredientForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IngredientField {
    /// `name`
    Name,
    /// `is_public`
    IsPublic,
}

impl FormModel for IngredientForm {
    type Field = IngredientField;
    const FIELDS: &'static [IngredientField] = &[IngredientField::Name, IngredientField::IsPublic];

    fn field_name(field: IngredientField) -> &'static str {
        match field {
            IngredientField::Name => "name",
            IngredientField::IsPublic => "is_public",
        }
    }

    fn field_kind(field: IngredientField) -> FieldKind {
        match field {
            IngredientField::Name => FieldKind::Text,
            IngredientField::IsPublic => FieldKind::Checkbox,
        }
    }

    fn field_value(&self, field: IngredientField) -> FieldValue {
        match field {
            IngredientField::Name => FieldValue::Text(self.name.clone()),
            IngredientField::IsPublic => FieldValue::Bool(self.is_public),
        }
    }

    fn apply(&mut self, field: IngredientField, value: FieldValue) -> Result<(), FormError> {
        let name = Self::field_name(field);
        match field {
            IngredientField::Name => self.name = value.into_text(name)?,
            IngredientField::IsPublic => self.is_public = value.into_bool(name)?,
        }
        Ok(())
    }
}

impl IngredientForm {
    /// Creates an empty ingredient editor.
    #[must_use]
    pub fn form() -> Form<Self> {
        Form::with_validator(Self::default(), Self::validate)
    }

    /// The trimmed name is required.
    #[must_use]
    pub fn validate(&self) -> FormErrors<IngredientField> {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(IngredientField::Name, "Ingredient name is required");
        }
        errors
    }

    /// Returns the create/update payload.
    #[must_use]
    pub fn draft(&self) -> IngredientDraft {
        IngredientDraft {
            name: self.name.trim().to_string(),
            is_public: self.is_public,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::RawInput;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_checkbox_and_trimmed_name() {
        let form = IngredientForm::form();
        form.set_field_by_name("name", &RawInput::text("   ")).unwrap();
        form.set_field_by_name("is_public", &RawInput::checkbox(true)).unwrap();

        assert!(form.validate().contains(IngredientField::Name));
        assert!(form.values().is_public);

        form.set_field(IngredientField::Name, &RawInput::text(" Basil ")).unwrap();
        assert!(form.validate().is_empty());
        assert_eq!(form.values().draft().name, "Basil");
    }
}
