//! Persistence implementations.
//!
//! Files live in the platform config directory:
//! - Linux: `~/.config/larder/`
//! - macOS: `~/Library/Application Support/larder/`
//! - Windows: `%APPDATA%\larder\`

mod credential_store;
mod file_system;
mod settings_repository;

use std::path::PathBuf;

pub use credential_store::FileCredentialStore;
pub use file_system::TokioFileSystem;
pub use settings_repository::{SettingsError, SettingsRepository};

/// Returns the Larder config directory, if the platform has one.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("larder"))
}
