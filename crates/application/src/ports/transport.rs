//! HTTP Transport port

use std::future::Future;

use larder_domain::{ApiError, ApiErrorKind, ApiRequest, ApiResponse};

/// Errors raised before any HTTP response was received.
///
/// A received response is never a transport error, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// No connection could be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The base address and path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The body could not be encoded for the wire.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        let (kind, message) = match &error {
            TransportError::Timeout { .. } => (ApiErrorKind::Timeout, "The server did not respond in time"),
            TransportError::ConnectionFailed(_) => {
                (ApiErrorKind::Connection, "Could not connect to the server")
            }
            TransportError::InvalidUrl(_) | TransportError::InvalidBody(_) => {
                (ApiErrorKind::InvalidRequest, "The request could not be sent")
            }
            TransportError::Other(_) => (ApiErrorKind::Unknown, "The request failed"),
        };
        Self::new(0, kind, message).with_details(error.to_string())
    }
}

/// Port for sending requests to the backend.
///
/// Implementations join the request path onto the configured base address,
/// negotiate JSON, and encode the body.
pub trait HttpTransport: Send + Sync {
    /// Sends a request and returns whatever response arrived.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}
