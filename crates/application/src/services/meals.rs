//! Meal adapter.

use std::sync::Arc;

use larder_domain::{ApiError, ApiRequest, Meal, MealDraft, MealQuery};

use super::non_empty;
use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// CRUD calls for meals.
#[derive(Debug)]
pub struct MealService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> MealService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Lists the user's meals.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn list(&self, query: &MealQuery) -> Result<Vec<Meal>, ApiError> {
        let request = ApiRequest::get("/meals")
            .with_optional_query("search", non_empty(query.search.as_deref()))
            .with_optional_query("sort", query.sort)
            .with_page(query.page);
        self.client.fetch(request).await
    }

    /// Fetches one meal.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn get(&self, id: i64) -> Result<Meal, ApiError> {
        self.client.fetch(ApiRequest::get(format!("/meals/{id}"))).await
    }

    /// Creates a meal.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn create(&self, draft: &MealDraft) -> Result<Meal, ApiError> {
        self.client
            .fetch(ApiRequest::post("/meals").with_json(draft)?)
            .await
    }

    /// Renames a meal.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn update(&self, id: i64, draft: &MealDraft) -> Result<Meal, ApiError> {
        self.client
            .fetch(ApiRequest::put(format!("/meals/{id}")).with_json(draft)?)
            .await
    }

    /// Deletes a meal and its recipes.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(format!("/meals/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::services::scripted_api;
    use larder_domain::{ApiErrorKind, HttpMethod, MealDraft, MealQuery, Page, SortOption};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_serializes_filters_and_page() {
        let (api, transport) = scripted_api();
        transport.reply(200, "[]");

        let query = MealQuery {
            search: Some("soup".to_string()),
            sort: Some(SortOption::RatingHigh),
            page: Page::new(3, 20),
        };
        let meals = api.meals().list(&query).await.unwrap();

        assert!(meals.is_empty());
        let sent = transport.last();
        assert_eq!(sent.path, "/meals");
        assert_eq!(
            sent.query.pairs().collect::<Vec<_>>(),
            vec![("search", "soup"), ("sort", "rating_high"), ("skip", "40"), ("limit", "20")]
        );
    }

    #[tokio::test]
    async fn test_list_omits_empty_search() {
        let (api, transport) = scripted_api();
        transport.reply(200, "[]");

        let query = MealQuery {
            search: Some(String::new()),
            ..MealQuery::default()
        };
        api.meals().list(&query).await.unwrap();

        assert_eq!(
            transport.last().query.pairs().collect::<Vec<_>>(),
            vec![("skip", "0"), ("limit", "20")]
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_paths() {
        let (api, transport) = scripted_api();
        transport
            .reply(200, r#"{"id":5,"name":"Stew","user_id":1,"created_at":"2024-01-01T00:00:00"}"#)
            .reply(204, "");

        let meal = api
            .meals()
            .update(5, &MealDraft { name: "Stew".to_string() })
            .await
            .unwrap();
        assert_eq!(meal.name, "Stew");
        assert_eq!(transport.last().method, HttpMethod::Put);
        assert_eq!(transport.last().path, "/meals/5");

        api.meals().delete(5).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_not_found_is_rejected() {
        let (api, transport) = scripted_api();
        transport.reply(404, r#"{"detail":"Meal not found"}"#);

        let error = api.meals().get(99).await.unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.message, "Meal not found");
    }
}
