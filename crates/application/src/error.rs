//! Application error types

use thiserror::Error;

use larder_domain::{ApiError, DomainError};

use crate::form::FormError;
use crate::ports::{CredentialStoreError, FileSystemError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A backend call failed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A form update was rejected.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// The credential store failed.
    #[error("credential storage error: {0}")]
    CredentialStore(#[from] CredentialStoreError),

    /// A file operation failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// The user must sign in first.
    #[error("not signed in")]
    NotSignedIn,
}

impl ApplicationError {
    /// Returns the backend error, if this is one.
    #[must_use]
    pub const fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
