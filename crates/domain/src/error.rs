//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A request path is not relative to the API base address.
    #[error("invalid request path: {0}")]
    InvalidPath(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A measurement unit name is not recognized.
    #[error("unknown measurement unit: {0}")]
    UnknownUnit(String),

    /// A sort option name is not recognized.
    #[error("unknown sort option: {0}")]
    UnknownSortOption(String),

    /// A model type name is not recognized.
    #[error("unknown model type: {0}")]
    UnknownModelType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
