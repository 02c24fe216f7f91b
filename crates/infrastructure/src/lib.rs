//! Larder Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: an HTTP transport over `reqwest`,
//! file-backed credential storage and layered settings.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use persistence::{
    FileCredentialStore, SettingsError, SettingsRepository, TokioFileSystem, config_dir,
};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
