//! Larder Application - Session, pipeline, forms and adapters
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The session context and the authenticated request pipeline
//! - The form engine and the concrete form models
//! - Typed adapters for every backend resource

pub mod error;
pub mod form;
pub mod forms;
pub mod pipeline;
pub mod ports;
pub mod services;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use form::{FieldKind, FieldValue, Form, FormErrors, FormModel, FormState, RawInput, SubmitOutcome};
pub use pipeline::{ApiClient, AuthInterceptor};
pub use ports::{CredentialStore, CredentialStoreError, FileSystem, FileSystemError, HttpTransport, TransportError};
pub use services::LarderApi;
pub use session::{MemoryCredentialStore, SessionContext};
