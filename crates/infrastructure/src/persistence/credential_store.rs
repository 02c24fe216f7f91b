//! File-based credential store.
//!
//! The credential is stored as `credentials.json` in the config directory:
//! ```json
//! {
//!   "token": "eyJhbGciOi..."
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_application::ports::{CredentialStore, CredentialStoreError, FileSystem};
use larder_domain::Credential;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: Credential,
}

/// Credential store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore<F> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> FileCredentialStore<F> {
    /// Creates a store writing to `path`.
    pub const fn new(fs: F, path: PathBuf) -> Self {
        Self { fs, path }
    }

    /// Creates a store in the platform config directory.
    ///
    /// Returns `None` if the platform has no config directory.
    pub fn in_config_dir(fs: F) -> Option<Self> {
        super::config_dir().map(|dir| Self::new(fs, dir.join(CREDENTIALS_FILE)))
    }

    /// Returns the file the credential is stored in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<F: FileSystem + Sync> CredentialStore for FileCredentialStore<F> {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        if !self.fs.exists(&self.path).await {
            return Ok(None);
        }

        let content = self.fs.read_file(&self.path).await.map_err(std::io::Error::from)?;
        let stored: StoredCredential = from_json_bytes(&content)
            .map_err(|e| CredentialStoreError::Serialization(e.to_string()))?;

        if stored.token.expose().is_empty() {
            return Ok(None);
        }
        debug!(path = %self.path.display(), "Loaded stored credential");
        Ok(Some(stored.token))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let content = to_json_stable_bytes(&StoredCredential {
            token: credential.clone(),
        })
        .map_err(|e| CredentialStoreError::Serialization(e.to_string()))?;

        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(std::io::Error::from)?;
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialStoreError> {
        if !self.fs.exists(&self.path).await {
            return Ok(());
        }
        self.fs
            .remove_file(&self.path)
            .await
            .map_err(std::io::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::TokioFileSystem;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileCredentialStore<TokioFileSystem> {
        FileCredentialStore::new(TokioFileSystem::new(), dir.path().join(CREDENTIALS_FILE))
    }

    #[tokio::test]
    async fn test_round_trip_and_remove() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        assert_eq!(store.load().await.unwrap(), None);

        store.save(&Credential::new("tok-123")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(Credential::new("tok-123")));

        let on_disk = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk, "{\n  \"token\": \"tok-123\"\n}\n");

        store.remove().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.remove().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "not json").unwrap();

        let error = store.load().await.unwrap_err();
        assert!(matches!(error, CredentialStoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_empty_token_means_signed_out() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), r#"{"token": ""}"#).unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }
}
