//! Command implementations.

pub mod completions;
pub mod list;
pub mod mention;
pub mod tag;

use std::path::PathBuf;

use crate::config::resolve_data_path;
use crate::error::{Error, Result};
use crate::repo::TagRepository;

/// Open the repository at the resolved data path.
pub(crate) fn open_repo(data: Option<&PathBuf>) -> Result<TagRepository> {
    let path = resolve_data_path(data.map(PathBuf::as_path))?;
    TagRepository::open(path)
}

/// The acting user's numeric identity, required for mutations.
pub(crate) fn require_user(user: Option<i64>) -> Result<i64> {
    user.ok_or_else(|| {
        Error::InvalidArgument("acting user not set; pass --user <id>".to_string())
    })
}
