//! Optimization and analysis adapter.
//!
//! The models run on the backend; this adapter only shapes the requests.

use std::sync::Arc;

use larder_domain::{
    ApiError, ApiRequest, InfluenceReport, ModelType, OptimizedRecipe, RatingPrediction,
    RecipeDraft, RecipeIngredientDraft, SavedOptimization, TrainingReport,
};

use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// Calls to the backend's optimization endpoints.
#[derive(Debug)]
pub struct MlService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> MlService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Proposes ingredient quantities for a recipe.
    ///
    /// `None` selects [`ModelType::OPTIMIZE_DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn optimize_recipe(
        &self,
        recipe_id: i64,
        model: Option<ModelType>,
    ) -> Result<OptimizedRecipe, ApiError> {
        let model = model.unwrap_or(ModelType::OPTIMIZE_DEFAULT);
        self.client
            .fetch(
                ApiRequest::post(format!("/ml/optimize-recipe/{recipe_id}"))
                    .with_query("model_type", model),
            )
            .await
    }

    /// Saves a proposal as a new recipe flagged as generated.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn save_optimized_recipe(
        &self,
        draft: &RecipeDraft,
    ) -> Result<SavedOptimization, ApiError> {
        self.client
            .fetch(ApiRequest::post("/ml/save-optimized-recipe").with_json(draft)?)
            .await
    }

    /// Estimates each ingredient's effect on a meal's rating.
    ///
    /// `None` selects [`ModelType::ANALYZE_DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn analyze_ingredients(
        &self,
        meal_id: i64,
        model: Option<ModelType>,
    ) -> Result<InfluenceReport, ApiError> {
        let model = model.unwrap_or(ModelType::ANALYZE_DEFAULT);
        self.client
            .fetch(
                ApiRequest::get(format!("/ml/analyze-ingredients/{meal_id}"))
                    .with_query("model_type", model),
            )
            .await
    }

    /// Predicts the rating of a hypothetical ingredient list.
    ///
    /// `None` selects [`ModelType::OPTIMIZE_DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn predict_rating(
        &self,
        ingredients: &[RecipeIngredientDraft],
        meal_id: i64,
        model: Option<ModelType>,
    ) -> Result<RatingPrediction, ApiError> {
        let model = model.unwrap_or(ModelType::OPTIMIZE_DEFAULT);
        let request = ApiRequest::post("/ml/predict-rating")
            .with_query("meal_id", meal_id)
            .with_query("model_type", model)
            .with_json(ingredients)?;
        self.client.fetch(request).await
    }

    /// Trains the model for a meal on its rated recipes.
    ///
    /// `None` selects [`ModelType::OPTIMIZE_DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn train_model(
        &self,
        meal_id: i64,
        model: Option<ModelType>,
    ) -> Result<TrainingReport, ApiError> {
        let model = model.unwrap_or(ModelType::OPTIMIZE_DEFAULT);
        self.client
            .fetch(ApiRequest::post(format!("/ml/train/{meal_id}")).with_query("model_type", model))
            .await
    }
}
