//! Layered client settings.
//!
//! Settings resolve in three layers, later layers winning:
//! 1. built-in defaults
//! 2. `settings.json` in the config directory
//! 3. `LARDER_*` environment variables (`LARDER_API_URL`, `LARDER_TIMEOUT_MS`, ...)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use larder_application::ports::{FileSystem, FileSystemError};
use larder_domain::ClientSettings;

use crate::serialization::{SerializationError, to_json_stable_bytes};

const SETTINGS_FILE: &str = "settings.json";
const ENV_PREFIX: &str = "LARDER";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A layer could not be read or merged.
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    /// The settings file could not be written.
    #[error("Failed to write settings: {0}")]
    Io(#[from] FileSystemError),

    /// The settings could not be serialized.
    #[error("Failed to serialize settings: {0}")]
    Serialization(#[from] SerializationError),

    /// A configured value is out of range.
    #[error("Invalid setting `{key}`: {message}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Reads and writes [`ClientSettings`].
#[derive(Debug, Clone)]
pub struct SettingsRepository<F> {
    fs: F,
    path: PathBuf,
    env: Option<config::Map<String, String>>,
}

impl<F: FileSystem> SettingsRepository<F> {
    /// Creates a repository reading `path` and the process environment.
    pub const fn new(fs: F, path: PathBuf) -> Self {
        Self {
            fs,
            path,
            env: None,
        }
    }

    /// Creates a repository in the platform config directory.
    ///
    /// Returns `None` if the platform has no config directory.
    pub fn in_config_dir(fs: F) -> Option<Self> {
        super::config_dir().map(|dir| Self::new(fs, dir.join(SETTINGS_FILE)))
    }

    /// Replaces the process environment with a fixed set of variables.
    #[must_use]
    pub fn with_environment(mut self, env: config::Map<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves the effective settings.
    ///
    /// A missing settings file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer is malformed or a value has the wrong type.
    pub fn load(&self) -> Result<ClientSettings, SettingsError> {
        let defaults = ClientSettings::default();
        let timeout_ms = i64::try_from(defaults.timeout_ms).map_err(|e| SettingsError::Invalid {
            key: "timeout_ms",
            message: e.to_string(),
        })?;

        let settings: ClientSettings = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("timeout_ms", timeout_ms)?
            .set_default("sign_in_path", defaults.sign_in_path)?
            .set_default("user_agent", defaults.user_agent)?
            .add_source(
                File::from(self.path.as_path())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(self.env.clone()),
            )
            .build()?
            .try_deserialize()?;

        if settings.timeout_ms == 0 {
            return Err(SettingsError::Invalid {
                key: "timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }

        debug!(api_url = %settings.api_url, timeout_ms = settings.timeout_ms, "Resolved settings");
        Ok(settings)
    }

    /// Writes settings to the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let content = to_json_stable_bytes(settings)?;
        self.fs.write_file(&self.path, &content).await?;
        Ok(())
    }
}
