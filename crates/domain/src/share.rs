//! Public share links for recipes.

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// A newly created share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Token identifying the shared recipe.
    pub share_token: String,
}

/// A recipe opened through a share link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedRecipe {
    /// The shared recipe.
    pub recipe: Recipe,
    /// Name of the meal it belongs to.
    pub meal_name: String,
    /// Username of the sharer.
    pub shared_by: String,
}
