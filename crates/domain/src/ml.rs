//! Payloads of the remote optimization and analysis endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::recipe::{MeasurementUnit, RecipeIngredient};

/// Regression model the backend should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Ordinary least squares.
    Linear,
    /// L2-regularized linear model.
    Ridge,
    /// L1-regularized linear model.
    Lasso,
    /// Random forest ensemble.
    RandomForest,
    /// Gradient boosted trees.
    GradientBoosting,
    /// Support vector regression.
    Svr,
}

impl ModelType {
    /// Default model for optimization and rating prediction.
    pub const OPTIMIZE_DEFAULT: Self = Self::RandomForest;

    /// Default model for ingredient influence analysis.
    pub const ANALYZE_DEFAULT: Self = Self::Linear;

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ridge => "ridge",
            Self::Lasso => "lasso",
            Self::RandomForest => "random_forest",
            Self::GradientBoosting => "gradient_boosting",
            Self::Svr => "svr",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "linear" => Ok(Self::Linear),
            "ridge" => Ok(Self::Ridge),
            "lasso" => Ok(Self::Lasso),
            "random_forest" => Ok(Self::RandomForest),
            "gradient_boosting" => Ok(Self::GradientBoosting),
            "svr" => Ok(Self::Svr),
            other => Err(DomainError::UnknownModelType(other.to_string())),
        }
    }
}

/// Ingredient quantities proposed for a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRecipe {
    /// Proposed ingredient lines.
    pub optimized_ingredients: Vec<RecipeIngredient>,
    /// Rating the model expects for the proposal.
    pub predicted_rating: f64,
    /// Model confidence between 0 and 1.
    pub confidence: f64,
}

/// Result of saving a proposal as a new recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedOptimization {
    /// Whether the recipe was stored.
    pub success: bool,
    /// Identifier of the new recipe.
    pub recipe_id: i64,
}

/// Estimated effect of one ingredient on a meal's rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInfluence {
    /// Referenced ingredient.
    pub ingredient_id: i64,
    /// Ingredient name.
    pub ingredient_name: String,
    /// Unit the influence is expressed per.
    pub unit: MeasurementUnit,
    /// Signed rating change per unit.
    pub influence: f64,
}

/// All ingredient influences for a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceReport {
    /// Influences as returned by the backend.
    pub influences: Vec<IngredientInfluence>,
}

impl InfluenceReport {
    /// Returns the influences ordered by absolute effect, strongest first.
    #[must_use]
    pub fn ranked(&self) -> Vec<&IngredientInfluence> {
        let mut ranked: Vec<_> = self.influences.iter().collect();
        ranked.sort_by(|a, b| b.influence.abs().total_cmp(&a.influence.abs()));
        ranked
    }
}

/// Predicted rating for a hypothetical ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingPrediction {
    /// Predicted rating between 1 and 10.
    pub predicted_rating: f64,
}

/// Outcome of training a model for a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Whether training succeeded.
    pub success: bool,
    /// Backend-specific training metrics.
    #[serde(default)]
    pub metrics: serde_json::Value,
    /// Model that was trained.
    pub model_type: ModelType,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_model_type_wire_names() {
        assert_eq!(ModelType::OPTIMIZE_DEFAULT.as_str(), "random_forest");
        assert_eq!(ModelType::ANALYZE_DEFAULT.as_str(), "linear");
        assert_eq!("gradient_boosting".parse::<ModelType>().unwrap(), ModelType::GradientBoosting);
        assert!("xgboost".parse::<ModelType>().is_err());
    }

    #[test]
    fn test_ranked_orders_by_magnitude() {
        let influence = |id, influence| IngredientInfluence {
            ingredient_id: id,
            ingredient_name: format!("i{id}"),
            unit: MeasurementUnit::Gram,
            influence,
        };
        let report = InfluenceReport {
            influences: vec![influence(1, 0.2), influence(2, -1.5), influence(3, 0.9)],
        };
        let ids: Vec<_> = report.ranked().iter().map(|i| i.ingredient_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
