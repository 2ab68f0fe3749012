//! Configuration management.
//!
//! tagping keeps all state in one data file. Resolution order:
//!
//! 1. `--data <path>` flag (or `TAGPING_DATA`, handled by clap's `env`)
//! 2. `~/.tagping/tags.json` per-user default
//!
//! There is no config file; everything else arrives as flags or
//! environment variables.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Per-user default data directory (`~/.tagping`).
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".tagping"))
}

/// Resolve the effective data file path.
///
/// # Errors
///
/// Returns [`Error::Config`] if no explicit path was given and the home
/// directory cannot be determined.
pub fn resolve_data_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    default_data_dir()
        .map(|dir| dir.join("tags.json"))
        .ok_or_else(|| Error::Config("could not determine home directory".to_string()))
}
