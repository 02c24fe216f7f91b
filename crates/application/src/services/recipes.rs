//! Recipe adapter.

use std::sync::Arc;

use larder_domain::{
    ApiError, ApiRequest, Page, Recipe, RecipeDraft, RecipeUpdate, SortOption,
};

use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// CRUD and rating calls for recipes.
#[derive(Debug)]
pub struct RecipeService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> RecipeService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Lists the recipe variants of a meal.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn list_by_meal(
        &self,
        meal_id: i64,
        sort: Option<SortOption>,
        page: Page,
    ) -> Result<Vec<Recipe>, ApiError> {
        let request = ApiRequest::get(format!("/recipes/meal/{meal_id}"))
            .with_optional_query("sort", sort)
            .with_page(page);
        self.client.fetch(request).await
    }

    /// Fetches one recipe.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn get(&self, id: i64) -> Result<Recipe, ApiError> {
        self.client.fetch(ApiRequest::get(format!("/recipes/{id}"))).await
    }

    /// Creates a recipe.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        self.client
            .fetch(ApiRequest::post("/recipes").with_json(draft)?)
            .await
    }

    /// Updates a recipe.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn update(&self, id: i64, update: &RecipeUpdate) -> Result<Recipe, ApiError> {
        self.client
            .fetch(ApiRequest::put(format!("/recipes/{id}")).with_json(update)?)
            .await
    }

    /// Sets a recipe's rating.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn rate(&self, id: i64, rating: f64) -> Result<Recipe, ApiError> {
        self.client
            .fetch(ApiRequest::post(format!("/recipes/{id}/rate")).with_query("rating", rating))
            .await
    }

    /// Deletes a recipe.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(format!("/recipes/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::services::scripted_api;
    use larder_domain::{
        HttpMethod, MeasurementUnit, Page, RecipeDraft, RecipeIngredientDraft, RecipeUpdate,
        RequestBody, SortOption,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const RECIPE: &str = r#"{"id":3,"meal_id":1,"rating":8.5,"ingredients":[],"is_ai_generated":false,"created_at":"2024-02-01T10:00:00"}"#;

    #[tokio::test]
    async fn test_list_by_meal() {
        let (api, transport) = scripted_api();
        transport.reply(200, &format!("[{RECIPE}]"));

        let recipes = api
            .recipes()
            .list_by_meal(1, Some(SortOption::DateNewest), Page::new(2, 20))
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        let sent = transport.last();
        assert_eq!(sent.path, "/recipes/meal/1");
        assert_eq!(
            sent.query.pairs().collect::<Vec<_>>(),
            vec![("sort", "date_newest"), ("skip", "20"), ("limit", "20")]
        );
    }

    #[tokio::test]
    async fn test_rate_uses_query_parameter() {
        let (api, transport) = scripted_api();
        transport.reply(200, RECIPE);

        let recipe = api.recipes().rate(3, 8.5).await.unwrap();

        assert_eq!(recipe.rating, 8.5);
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.path, "/recipes/3/rate");
        assert_eq!(sent.query.get("rating"), Some("8.5"));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_create_body() {
        let (api, transport) = scripted_api();
        transport.reply(201, RECIPE);

        let draft = RecipeDraft {
            meal_id: 1,
            ingredients: vec![RecipeIngredientDraft {
                ingredient_id: 4,
                quantity: 250.0,
                unit: MeasurementUnit::Gram,
            }],
            rating: 8.5,
            notes: None,
        };
        api.recipes().create(&draft).await.unwrap();

        assert_eq!(
            transport.last().body,
            RequestBody::Json(json!({
                "meal_id": 1,
                "ingredients": [{"ingredient_id": 4, "quantity": 250.0, "unit": "g"}],
                "rating": 8.5
            }))
        );
    }

    #[tokio::test]
    async fn test_get_update_delete() {
        let (api, transport) = scripted_api();
        transport.reply(200, RECIPE).reply(200, RECIPE).reply(204, "");

        let recipe = api.recipes().get(3).await.unwrap();
        assert_eq!(recipe.id, 3);
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.path, "/recipes/3");
        assert!(sent.body.is_none());

        let update = RecipeUpdate {
            rating: 6.0,
            notes: Some(String::new()),
            ingredients: Some(vec![RecipeIngredientDraft {
                ingredient_id: 4,
                quantity: 2.0,
                unit: MeasurementUnit::Tablespoon,
            }]),
        };
        api.recipes().update(3, &update).await.unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.path, "/recipes/3");
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({
                "rating": 6.0,
                "notes": "",
                "ingredients": [{"ingredient_id": 4, "quantity": 2.0, "unit": "tbsp"}]
            }))
        );

        api.recipes().delete(3).await.unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.path, "/recipes/3");
        assert!(sent.body.is_none());
    }
}
