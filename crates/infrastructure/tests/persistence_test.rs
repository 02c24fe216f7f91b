//! Credential store and settings layering on a real file system.

#![allow(clippy::unwrap_used)]

use larder_application::SessionContext;
use larder_application::ports::CredentialStore;
use larder_domain::{Credential, DEFAULT_SIGN_IN_PATH, SessionState};
use larder_infrastructure::{FileCredentialStore, SettingsRepository, TokioFileSystem};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_session_restores_from_stored_credential() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::new(TokioFileSystem::new(), path.clone());
    store.save(&Credential::new("persisted-token")).await.unwrap();

    let session = SessionContext::restore(Arc::new(store)).await;

    assert_eq!(session.state().await, SessionState::Authenticated);
    assert_eq!(session.get().await, Some(Credential::new("persisted-token")));
}

#[tokio::test]
async fn test_corrupt_credential_file_starts_anonymous() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "{ broken").unwrap();
    let store = FileCredentialStore::new(TokioFileSystem::new(), path);

    let session = SessionContext::restore(Arc::new(store)).await;

    assert_eq!(session.state().await, SessionState::Anonymous);
}

#[test]
fn test_environment_overrides_file_which_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"api_url": "https://file.example/api/v1", "timeout_ms": 10000}"#,
    )
    .unwrap();

    let mut env = config::Map::new();
    env.insert("LARDER_TIMEOUT_MS".to_string(), "2500".to_string());

    let settings = SettingsRepository::new(TokioFileSystem::new(), path)
        .with_environment(env)
        .load()
        .unwrap();

    assert_eq!(settings.api_url, "https://file.example/api/v1");
    assert_eq!(settings.timeout_ms, 2500);
    assert_eq!(settings.sign_in_path, DEFAULT_SIGN_IN_PATH);
}

#[test]
fn test_malformed_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").unwrap();

    let result = SettingsRepository::new(TokioFileSystem::new(), path)
        .with_environment(config::Map::new())
        .load();

    assert!(result.is_err());
}
