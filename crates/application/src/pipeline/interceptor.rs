//! Credential attachment and authorization-failure handling.

use tracing::debug;

use larder_domain::request::AUTHORIZATION;
use larder_domain::{ApiError, ApiRequest, ApiResponse};

use crate::ports::TransportError;
use crate::session::SessionContext;

/// Outbound and inbound stages around the transport.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    session: SessionContext,
    sign_in_path: String,
}

impl AuthInterceptor {
    /// Creates an interceptor that announces `sign_in_path` when a session expires.
    #[must_use]
    pub fn new(session: SessionContext, sign_in_path: impl Into<String>) -> Self {
        Self {
            session,
            sign_in_path: sign_in_path.into(),
        }
    }

    /// Returns the session this interceptor reads and expires.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Attaches `Authorization: Bearer <token>` when a credential is held.
    ///
    /// Nothing else about the request changes.
    pub async fn outbound(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(credential) = self.session.get().await {
            request.headers.set(AUTHORIZATION, credential.bearer_header());
        }
        request
    }

    /// Interprets the transport result.
    ///
    /// A 401 on the first attempt of a logical request expires the session
    /// before the error is returned. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for transport failures and non-2xx responses.
    pub async fn inbound(
        &self,
        request: &ApiRequest,
        result: Result<ApiResponse, TransportError>,
    ) -> Result<ApiResponse, ApiError> {
        let response = result?;
        if response.is_success() {
            return Ok(response);
        }

        if response.is_unauthorized() {
            if request.is_retry() {
                debug!(path = %request.path, attempt = request.attempt, "401 on retried request");
            } else {
                self.session.expire(&self.sign_in_path).await;
            }
        }

        Err(ApiError::from_response(&response))
    }
}
