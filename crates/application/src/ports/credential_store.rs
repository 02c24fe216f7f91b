//! Credential store port
//!
//! Defines the interface for persisting the session credential.

use async_trait::async_trait;

use larder_domain::Credential;

/// Errors that can occur during credential persistence.
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistent storage for the single session credential.
///
/// Presence of a stored credential means the session is authenticated.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credential, if any.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read.
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError>;

    /// Replaces the stored credential.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError>;

    /// Removes the stored credential. Removing an absent credential succeeds.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be written.
    async fn remove(&self) -> Result<(), CredentialStoreError>;
}
