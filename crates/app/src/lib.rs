//! Larder - command-line client for the recipe tracking backend.
//!
//! The binary wires the layers together: settings from
//! [`larder_infrastructure::SettingsRepository`], a [`ReqwestTransport`],
//! a session restored from the credential file, and the command handlers
//! in [`commands`].

pub mod cli;
pub mod commands;

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use larder_application::ports::CredentialStore;
use larder_application::{ApiClient, LarderApi, MemoryCredentialStore, SessionContext};
use larder_domain::{ClientSettings, SessionEvent};
use larder_infrastructure::{FileCredentialStore, ReqwestTransport, SettingsRepository, TokioFileSystem};

pub use commands::{CliError, CliResult};

/// Resolves settings from the config directory and environment.
///
/// Falls back to defaults plus environment when the platform has no
/// config directory.
///
/// # Errors
///
/// Returns an error if a settings layer is malformed.
pub fn load_settings(api_url: Option<String>) -> CliResult<ClientSettings> {
    let repository = SettingsRepository::in_config_dir(TokioFileSystem::new()).unwrap_or_else(|| {
        warn!("No config directory; using default settings");
        SettingsRepository::new(TokioFileSystem::new(), "settings.json".into())
    });
    let mut settings = repository.load()?;
    if let Some(api_url) = api_url {
        settings.api_url = api_url;
    }
    Ok(settings)
}

/// Restores the session from the credential file.
///
/// Without a config directory the session lives in memory only.
pub async fn restore_session() -> SessionContext {
    let store: Arc<dyn CredentialStore> = match FileCredentialStore::in_config_dir(TokioFileSystem::new()) {
        Some(store) => {
            debug!(path = %store.path().display(), "Using credential file");
            Arc::new(store)
        }
        None => {
            warn!("No config directory; the session will not be remembered");
            Arc::new(MemoryCredentialStore::new())
        }
    };
    SessionContext::restore(store).await
}

/// Builds the API bundle over a reqwest transport.
///
/// # Errors
///
/// Returns an error if the base address is invalid.
pub fn connect(settings: &ClientSettings, session: SessionContext) -> CliResult<LarderApi<ReqwestTransport>> {
    let transport = ReqwestTransport::new(settings)?;
    Ok(LarderApi::new(ApiClient::new(transport, session, settings)))
}

/// Reports session transitions on stderr until the session is dropped.
pub fn watch_session(session: &SessionContext) -> JoinHandle<()> {
    let mut events = session.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::Expired { redirect_to }) => {
                    eprintln!("Your session has expired. Sign in again ({redirect_to}): larder login");
                }
                Ok(event) => debug!(?event, "Session changed"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed session events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
