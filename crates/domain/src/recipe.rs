//! Recipes: rated ingredient lists for a meal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::timestamp;

/// Lowest rating the backend accepts.
pub const MIN_RATING: f64 = 1.0;

/// Highest rating the backend accepts.
pub const MAX_RATING: f64 = 10.0;

/// Unit of an ingredient quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeasurementUnit {
    /// Grams
    #[default]
    #[serde(rename = "g")]
    Gram,
    /// Kilograms
    #[serde(rename = "kg")]
    Kilogram,
    /// Ounces
    #[serde(rename = "oz")]
    Ounce,
    /// Pounds
    #[serde(rename = "lb")]
    Pound,
    /// Milliliters
    #[serde(rename = "ml")]
    Milliliter,
    /// Liters
    #[serde(rename = "L")]
    Liter,
    /// Teaspoons
    #[serde(rename = "tsp")]
    Teaspoon,
    /// Tablespoons
    #[serde(rename = "tbsp")]
    Tablespoon,
    /// Fluid ounces
    #[serde(rename = "fl oz")]
    FluidOunce,
    /// Cups
    #[serde(rename = "cup")]
    Cup,
    /// Pints
    #[serde(rename = "pint")]
    Pint,
    /// Quarts
    #[serde(rename = "quart")]
    Quart,
    /// Gallons
    #[serde(rename = "gallon")]
    Gallon,
    /// Countable units
    #[serde(rename = "unit(s)")]
    Unit,
    /// Pieces
    #[serde(rename = "piece(s)")]
    Piece,
    /// A pinch
    #[serde(rename = "pinch")]
    Pinch,
}

impl MeasurementUnit {
    /// Returns all units in display order: weight, volume, count.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Gram,
            Self::Kilogram,
            Self::Ounce,
            Self::Pound,
            Self::Milliliter,
            Self::Liter,
            Self::Teaspoon,
            Self::Tablespoon,
            Self::FluidOunce,
            Self::Cup,
            Self::Pint,
            Self::Quart,
            Self::Gallon,
            Self::Unit,
            Self::Piece,
            Self::Pinch,
        ]
    }

    /// Returns the wire symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Milliliter => "ml",
            Self::Liter => "L",
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::FluidOunce => "fl oz",
            Self::Cup => "cup",
            Self::Pint => "pint",
            Self::Quart => "quart",
            Self::Gallon => "gallon",
            Self::Unit => "unit(s)",
            Self::Piece => "piece(s)",
            Self::Pinch => "pinch",
        }
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for MeasurementUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| DomainError::UnknownUnit(s.to_string()))
    }
}

/// An ingredient line of a stored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Line identifier; absent on lines proposed by the optimizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning recipe; absent on lines proposed by the optimizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<i64>,
    /// Referenced ingredient.
    pub ingredient_id: i64,
    /// Ingredient name, denormalized for display.
    #[serde(default)]
    pub ingredient_name: String,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit of `quantity`.
    pub unit: MeasurementUnit,
}

impl RecipeIngredient {
    /// Returns the line as a create/update payload.
    #[must_use]
    pub const fn to_draft(&self) -> RecipeIngredientDraft {
        RecipeIngredientDraft {
            ingredient_id: self.ingredient_id,
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

/// An ingredient line in a create/update payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientDraft {
    /// Referenced ingredient.
    pub ingredient_id: i64,
    /// Amount in `unit`.
    pub quantity: f64,
    /// Unit of `quantity`.
    pub unit: MeasurementUnit,
}

/// A rated recipe variant of a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Server-assigned identifier.
    pub id: i64,
    /// Owning meal.
    pub meal_id: i64,
    /// Ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    /// Rating between 1 and 10.
    pub rating: f64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether the optimizer produced this variant.
    #[serde(default)]
    pub is_ai_generated: bool,
    /// Creation time.
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default, with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Owning meal.
    pub meal_id: i64,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredientDraft>,
    /// Rating between 1 and 10.
    pub rating: f64,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for updating a recipe; `ingredients: None` keeps the current lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    /// Rating between 1 and 10.
    pub rating: f64,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Replacement ingredient lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<RecipeIngredientDraft>>,
}
