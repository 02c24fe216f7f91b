//! In-memory credential storage.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use larder_domain::Credential;

use crate::ports::{CredentialStore, CredentialStoreError};

/// Credential store that forgets everything when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    credential: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a credential.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Arc::new(Mutex::new(Some(credential))),
        }
    }

    /// Returns the stored credential without going through the port.
    #[must_use]
    pub fn peek(&self) -> Option<Credential> {
        self.credential.lock().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self.credential.lock().clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        *self.credential.lock() = Some(credential.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialStoreError> {
        self.credential.lock().take();
        Ok(())
    }
}
