//! Ingredients available for recipes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Page;
use crate::timestamp;

/// An ingredient, private to its owner unless marked public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Server-assigned identifier.
    pub id: i64,
    /// Ingredient name.
    pub name: String,
    /// Owner.
    pub user_id: i64,
    /// Whether other users can see it.
    #[serde(default)]
    pub is_public: bool,
    /// Creation time.
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientDraft {
    /// Ingredient name.
    pub name: String,
    /// Whether other users can see it.
    pub is_public: bool,
}

/// Filters for listing ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    /// Case-insensitive name filter.
    pub search: Option<String>,
    /// Include other users' public ingredients.
    pub include_public: bool,
    /// Page to fetch.
    pub page: Page,
}

impl Default for IngredientQuery {
    fn default() -> Self {
        Self {
            search: None,
            include_public: true,
            page: Page::first(Page::INGREDIENT_LIMIT),
        }
    }
}
