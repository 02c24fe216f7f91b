//! Authenticated API client.

use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::debug;

use larder_domain::{ApiError, ApiRequest, ApiResponse, ClientSettings};

use super::AuthInterceptor;
use crate::ports::HttpTransport;
use crate::session::SessionContext;

/// Sends requests through the interceptor stages and a transport.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    interceptor: AuthInterceptor,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a client over `transport` that reads and expires `session`.
    #[must_use]
    pub fn new(transport: T, session: SessionContext, settings: &ClientSettings) -> Self {
        Self {
            transport,
            interceptor: AuthInterceptor::new(session, settings.sign_in_path.clone()),
        }
    }

    /// Returns the session shared by all requests.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        self.interceptor.session()
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` for invalid requests, transport failures and
    /// non-2xx responses.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;

        let request = self.interceptor.outbound(request).await;
        let started = Instant::now();
        let result = self.transport.send(&request).await;

        match &result {
            Ok(response) => debug!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                elapsed_ms = started.elapsed().as_millis(),
                "API call completed"
            ),
            Err(e) => debug!(
                method = %request.method,
                path = %request.path,
                error = %e,
                "API call failed"
            ),
        }

        self.interceptor.inbound(&request, result).await
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), plus `InvalidResponse` when the body does
    /// not decode into `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        response
            .json()
            .map_err(|e| ApiError::invalid_response(response.status, e.to_string()))
    }

    /// Sends a request and discards the response body.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute).
    pub async fn dispatch(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pipeline::testing::ScriptedTransport;
    use crate::ports::TransportError;
    use larder_domain::{ApiErrorKind, Credential, Meal};
    use pretty_assertions::assert_eq;

    fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
        ApiClient::new(
            transport.clone(),
            SessionContext::in_memory(),
            &ClientSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_fetch_decodes_body() {
        let transport = ScriptedTransport::new();
        transport.reply(
            200,
            r#"{"id":1,"name":"Soup","user_id":2,"recipe_count":0,"created_at":"2024-01-01T00:00:00"}"#,
        );
        let meal: Meal = client(&transport).fetch(ApiRequest::get("/meals/1")).await.unwrap();
        assert_eq!(meal.name, "Soup");
    }

    #[tokio::test]
    async fn test_fetch_reports_undecodable_body() {
        let transport = ScriptedTransport::new();
        transport.reply(200, r#"{"unexpected":true}"#);
        let error = client(&transport)
            .fetch::<Meal>(ApiRequest::get("/meals/1"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::InvalidResponse);
        assert_eq!(error.status_code, 200);
    }

    #[tokio::test]
    async fn test_invalid_path_never_reaches_transport() {
        let transport = ScriptedTransport::new();
        let error = client(&transport)
            .dispatch(ApiRequest::get("https://elsewhere.example/"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_credential_attached_then_expired() {
        let transport = ScriptedTransport::new();
        transport.reply(200, "[]").reply(401, r#"{"detail":"Could not validate credentials"}"#);
        let client = client(&transport);
        client.session().set(Credential::new("abc123")).await;

        client.dispatch(ApiRequest::get("/meals")).await.unwrap();
        let error = client.dispatch(ApiRequest::get("/meals")).await.unwrap_err();

        let sent = transport.sent();
        assert_eq!(sent[0].headers.get("Authorization"), Some("Bearer abc123"));
        assert_eq!(error.message, "Could not validate credentials");
        assert!(!client.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_api_error() {
        let transport = ScriptedTransport::new();
        transport.fail(TransportError::Timeout { timeout_ms: 10 });
        let error = client(&transport).dispatch(ApiRequest::get("/meals")).await.unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Timeout);
    }
}
