//! Process-wide session state.
//!
//! The session owns the one credential shared by every request. Only the
//! login and logout adapters and the pipeline's 401 handler may change it.

mod context;
mod memory_store;

pub use context::SessionContext;
pub use memory_store::MemoryCredentialStore;
