//! Ingredient adapter.

use std::sync::Arc;

use larder_domain::{ApiError, ApiRequest, Ingredient, IngredientDraft, IngredientQuery};

use super::non_empty;
use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// CRUD calls for ingredients.
#[derive(Debug)]
pub struct IngredientService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> IngredientService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Lists the user's ingredients, optionally with everyone's public ones.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn list(&self, query: &IngredientQuery) -> Result<Vec<Ingredient>, ApiError> {
        let request = ApiRequest::get("/ingredients")
            .with_optional_query("search", non_empty(query.search.as_deref()))
            .with_query("include_public", query.include_public)
            .with_page(query.page);
        self.client.fetch(request).await
    }

    /// Fetches one ingredient.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn get(&self, id: i64) -> Result<Ingredient, ApiError> {
        self.client
            .fetch(ApiRequest::get(format!("/ingredients/{id}")))
            .await
    }

    /// Creates an ingredient.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn create(&self, draft: &IngredientDraft) -> Result<Ingredient, ApiError> {
        self.client
            .fetch(ApiRequest::post("/ingredients").with_json(draft)?)
            .await
    }

    /// Updates an ingredient.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn update(&self, id: i64, draft: &IngredientDraft) -> Result<Ingredient, ApiError> {
        self.client
            .fetch(ApiRequest::put(format!("/ingredients/{id}")).with_json(draft)?)
            .await
    }

    /// Deletes an ingredient.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(format!("/ingredients/{id}")))
            .await
    }
}
