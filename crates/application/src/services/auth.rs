//! Account adapter.

use std::sync::Arc;

use tracing::info;

use larder_domain::request::MultipartPart;
use larder_domain::{
    AccessToken, ApiError, ApiRequest, Credential, LoginCredentials, NewUser, ProfileImage,
    RequestBody, User, UserUpdate,
};

use crate::pipeline::ApiClient;
use crate::ports::HttpTransport;

/// Sign-in, registration and profile calls.
///
/// This is the only adapter that writes the session credential.
#[derive(Debug)]
pub struct AuthService<T> {
    client: Arc<ApiClient<T>>,
}

impl<T: HttpTransport> AuthService<T> {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token and stores it.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the token request; the session is unchanged.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), ApiError> {
        let request =
            ApiRequest::post("/auth/login").with_body(RequestBody::form(credentials.form_fields()));
        let token: AccessToken = self.client.fetch(request).await?;
        self.client
            .session()
            .set(Credential::new(token.access_token))
            .await;
        Ok(())
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        let user: User = self
            .client
            .fetch(ApiRequest::post("/auth/register").with_json(user)?)
            .await?;
        info!(user_id = user.id, "Registered account");
        Ok(user)
    }

    /// Signs out locally. Returns false if no one was signed in.
    pub async fn logout(&self) -> bool {
        self.client.session().clear().await
    }

    /// Fetches the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.fetch(ApiRequest::get("/users/me")).await
    }

    /// Updates the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.client
            .fetch(ApiRequest::put("/users/me").with_json(update)?)
            .await
    }

    /// Uploads a profile image and returns its URL.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the request.
    pub async fn upload_profile_image(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<String, ApiError> {
        let request = ApiRequest::post("/users/profile-image").with_body(RequestBody::Multipart(
            vec![MultipartPart::file("file", file_name, content)],
        ));
        let image: ProfileImage = self.client.fetch(request).await?;
        Ok(image.profile_image)
    }
}
