//! Deterministic JSON for files the client writes.
//!
//! Settings and the stored credential are written with 2-space indentation
//! and a trailing newline, in field declaration order.

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
