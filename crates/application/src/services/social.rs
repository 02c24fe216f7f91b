//! Share link adapter.

use std::sync::Arc;

use larder_domain::{ApiError, ApiRequest, ShareLink, SharedRecipe};

use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// Calls for sharing recipes by link.
#[derive(Debug)]
pub struct SocialService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> SocialService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Creates a share link for a recipe.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn create_share_link(&self, recipe_id: i64) -> Result<ShareLink, ApiError> {
        self.client
            .fetch(ApiRequest::post(format!("/social/share/{recipe_id}")))
            .await
    }

    /// Opens a recipe shared by link.
    ///
    /// Tokens are URL-safe base64 text; anything else is refused before a
    /// request is built, since the token becomes a path segment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for a malformed token, otherwise the
    /// `ApiError` of the request.
    pub async fn shared_recipe(&self, token: &str) -> Result<SharedRecipe, ApiError> {
        if !is_share_token(token) {
            return Err(ApiError::invalid_request(format!("Invalid share token: {token:?}")));
        }
        self.client
            .fetch(ApiRequest::get(format!("/social/shared/{token}")))
            .await
    }

    /// Revokes a share link.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn delete_share_link(&self, share_id: i64) -> Result<(), ApiError> {
        self.client
            .dispatch(ApiRequest::delete(format!("/social/share/{share_id}")))
            .await
    }
}

fn is_share_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
