//! JSON document storage layer for tagping.
//!
//! The whole repository is one pretty-printed JSON document on disk,
//! replaced atomically on every save. Loading accepts two schemas:
//! the current one, and a legacy one whose subscriber lists are bare
//! integer arrays (migrated on the spot, see [`legacy`]).
//!
//! # Submodules
//!
//! - [`file`] - Document load/save with atomic replacement
//! - [`legacy`] - One-shot legacy-schema migration

pub mod file;
pub mod legacy;

pub use file::{Document, JsonStore, LoadOutcome};
