//! Recipe editor form.

use larder_domain::recipe::{MAX_RATING, MIN_RATING};
use larder_domain::{MeasurementUnit, Recipe, RecipeDraft, RecipeIngredientDraft, RecipeUpdate};

use crate::form::{FieldKind, FieldValue, Form, FormError, FormErrors, FormModel};

/// One ingredient row of the recipe editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeLine {
    /// Referenced ingredient.
    pub ingredient_id: i64,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit of `quantity`.
    pub unit: MeasurementUnit,
}

impl From<RecipeLine> for RecipeIngredientDraft {
    fn from(line: RecipeLine) -> Self {
        Self {
            ingredient_id: line.ingredient_id,
            quantity: line.quantity,
            unit: line.unit,
        }
    }
}

/// Values of the recipe editor.
///
/// Ingredient rows are edited as a whole through [`Form::set_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    /// Owning meal.
    pub meal_id: i64,
    /// Rating between 1 and 10.
    pub rating: f64,
    /// Free-form notes.
    pub notes: String,
    /// Ingredient rows.
    pub ingredients: Vec<RecipeLine>,
}

/// Scalar fields of [`RecipeForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecipeField {
    /// `meal_id`
    MealId,
    /// `rating`
    Rating,
    /// `notes`
    Notes,
    /// `ingredients`, for errors only
    Ingredients,
}

impl FormModel for RecipeForm {
    type Field = RecipeField;
    const FIELDS: &'static [RecipeField] = &[RecipeField::MealId, RecipeField::Rating, RecipeField::Notes];

    fn field_name(field: RecipeField) -> &'static str {
        match field {
            RecipeField::MealId => "meal_id",
            RecipeField::Rating => "rating",
            RecipeField::Notes => "notes",
            RecipeField::Ingredients => "ingredients",
        }
    }

    fn field_kind(field: RecipeField) -> FieldKind {
        match field {
            RecipeField::MealId => FieldKind::Select,
            RecipeField::Rating => FieldKind::Number,
            RecipeField::Notes | RecipeField::Ingredients => FieldKind::TextArea,
        }
    }

    fn field_value(&self, field: RecipeField) -> FieldValue {
        match field {
            RecipeField::MealId => FieldValue::Text(self.meal_id.to_string()),
            RecipeField::Rating => FieldValue::Number(self.rating),
            RecipeField::Notes => FieldValue::Text(self.notes.clone()),
            RecipeField::Ingredients => FieldValue::Text(format!("{} ingredients", self.ingredients.len())),
        }
    }

    fn apply(&mut self, field: RecipeField, value: FieldValue) -> Result<(), FormError> {
        let name = Self::field_name(field);
        match field {
            RecipeField::MealId => {
                let text = value.into_text(name)?;
                self.meal_id = text.trim().parse().unwrap_or_default();
            }
            RecipeField::Rating => self.rating = value.into_number(name)?,
            RecipeField::Notes => self.notes = value.into_text(name)?,
            RecipeField::Ingredients => {
                return Err(FormError::UnknownField(name.to_string()));
            }
        }
        Ok(())
    }
}

impl RecipeForm {
    /// Creates an editor for a new recipe of `meal_id`.
    #[must_use]
    pub fn form(meal_id: i64) -> Form<Self> {
        Form::with_validator(
            Self {
                meal_id,
                rating: 5.0,
                notes: String::new(),
                ingredients: Vec::new(),
            },
            Self::validate,
        )
    }

    /// Creates an editor prefilled from an existing recipe.
    #[must_use]
    pub fn edit(recipe: &Recipe) -> Form<Self> {
        let values = Self {
            meal_id: recipe.meal_id,
            rating: recipe.rating,
            notes: recipe.notes.clone().unwrap_or_default(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|line| RecipeLine {
                    ingredient_id: line.ingredient_id,
                    quantity: line.quantity,
                    unit: line.unit,
                })
                .collect(),
        };
        Form::with_validator(values, Self::validate)
    }

    /// Rating must be within range; at least one row must have a positive quantity.
    ///
    /// Unparseable quantities were coerced to `0`, so this also rejects them.
    #[must_use]
    pub fn validate(&self) -> FormErrors<RecipeField> {
        let mut errors = FormErrors::new();
        if self.meal_id <= 0 {
            errors.insert(RecipeField::MealId, "Choose a meal");
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            errors.insert(RecipeField::Rating, "Rating must be between 1 and 10");
        }
        if self.ingredients.is_empty() {
            errors.insert(RecipeField::Ingredients, "Add at least one ingredient");
        } else if self.ingredients.iter().any(|line| line.quantity <= 0.0) {
            errors.insert(RecipeField::Ingredients, "Quantities must be greater than zero");
        }
        errors
    }

    fn notes(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    fn lines(&self) -> Vec<RecipeIngredientDraft> {
        self.ingredients.iter().copied().map(Into::into).collect()
    }

    /// Returns the create payload.
    #[must_use]
    pub fn draft(&self) -> RecipeDraft {
        RecipeDraft {
            meal_id: self.meal_id,
            ingredients: self.lines(),
            rating: self.rating,
            notes: self.notes(),
        }
    }

    /// Returns the update payload, replacing all ingredient rows.
    ///
    /// Notes are always sent so that blanking them clears the stored text.
    #[must_use]
    pub fn update(&self) -> RecipeUpdate {
        RecipeUpdate {
            rating: self.rating,
            notes: Some(self.notes.trim().to_string()),
            ingredients: Some(self.lines()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::RawInput;
    use pretty_assertions::assert_eq;

    fn line(quantity: f64) -> RecipeLine {
        RecipeLine {
            ingredient_id: 4,
            quantity,
            unit: MeasurementUnit::Gram,
        }
    }

    #[test]
    fn test_requires_a_positive_quantity() {
        let form = RecipeForm::form(1);
        assert_eq!(
            form.validate().get(RecipeField::Ingredients),
            Some("Add at least one ingredient")
        );

        let mut values = form.values();
        values.ingredients = vec![line(0.0)];
        form.set_values(values);
        assert_eq!(
            form.validate().get(RecipeField::Ingredients),
            Some("Quantities must be greater than zero")
        );
    }

    #[test]
    fn test_rating_range() {
        let form = RecipeForm::form(1);
        let mut values = form.values();
        values.ingredients = vec![line(250.0)];
        form.set_values(values);

        form.set_field_by_name("rating", &RawInput::text("11")).unwrap();
        assert!(form.validate().contains(RecipeField::Rating));

        form.set_field_by_name("rating", &RawInput::text("abc")).unwrap();
        assert!(form.validate().contains(RecipeField::Rating));

        form.set_field_by_name("rating", &RawInput::text("8.5")).unwrap();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_draft_from_values() {
        let values = RecipeForm {
            meal_id: 3,
            rating: 7.0,
            notes: "  ".to_string(),
            ingredients: vec![line(120.0)],
        };
        let draft = values.draft();
        assert_eq!(draft.meal_id, 3);
        assert_eq!(draft.notes, None);
        assert_eq!(draft.ingredients[0].quantity, 120.0);
        assert_eq!(values.update().ingredients.map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_blank_notes_clear_on_update() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id":9,"meal_id":2,"rating":6.0,"notes":"too salty","created_at":"2024-02-01T10:00:00",
                "ingredients":[{"ingredient_id":4,"quantity":100.0,"unit":"g"}]}"#,
        )
        .unwrap();
        let form = RecipeForm::edit(&recipe);
        assert_eq!(form.values().notes, "too salty");

        form.set_field_by_name("notes", &RawInput::text("   ")).unwrap();
        let update = form.values().update();
        assert_eq!(update.notes.as_deref(), Some(""));

        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["notes"], "");
        assert_eq!(body["ingredients"][0]["ingredient_id"], 4);
    }

    #[test]
    fn test_ingredients_are_not_an_input_field() {
        assert_eq!(RecipeForm::field_named("ingredients"), None);
        assert_eq!(RecipeForm::field_named("meal_id"), Some(RecipeField::MealId));
    }
}
