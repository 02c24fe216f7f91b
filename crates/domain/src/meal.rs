//! Meals: named groups of recipe variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::Page;
use crate::sort::SortOption;
use crate::timestamp;

/// A meal owned by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Server-assigned identifier.
    pub id: i64,
    /// Meal name.
    pub name: String,
    /// Owner.
    pub user_id: i64,
    /// Number of recipe variants.
    #[serde(default)]
    pub recipe_count: u32,
    /// Mean rating over all variants, when any are rated.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Creation time.
    #[serde(with = "timestamp::required")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default, with = "timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or renaming a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealDraft {
    /// Meal name.
    pub name: String,
}

/// Filters for listing meals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MealQuery {
    /// Case-insensitive name filter.
    pub search: Option<String>,
    /// Sort order.
    pub sort: Option<SortOption>,
    /// Page to fetch.
    pub page: Page,
}
