//! Error types for tagping.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=data, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tagping operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Data store (exit 2)
    CorruptState,

    // Not Found (exit 3)
    TagNotFound,

    // Validation (exit 4)
    InvalidName,
    DescriptionTooLong,
    InvalidArgument,

    // Conflict (exit 5)
    DuplicateTag,
    AlreadySubscribed,
    QuotaExceeded,

    // Permission (exit 6)
    Forbidden,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::CorruptState => "CORRUPT_STATE",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::InvalidName => "INVALID_NAME",
            Self::DescriptionTooLong => "DESCRIPTION_TOO_LONG",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DuplicateTag => "DUPLICATE_TAG",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::Forbidden => "FORBIDDEN",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::CorruptState => 2,
            Self::TagNotFound => 3,
            Self::InvalidName | Self::DescriptionTooLong | Self::InvalidArgument => 4,
            Self::DuplicateTag | Self::AlreadySubscribed | Self::QuotaExceeded => 5,
            Self::Forbidden => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in tagping operations.
///
/// Validation variants are raised before any in-memory mutation; `Io`
/// raised by a failed persist means the mutation already happened in
/// memory (no rollback, see `repo` module docs).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid tag name: {reason}")]
    InvalidName { reason: String },

    #[error("Description too long: {actual} characters (max {max})")]
    DescriptionTooLong { actual: usize, max: usize },

    #[error("Tag already exists: #{name}")]
    DuplicateTag { name: String },

    #[error("Tag quota exceeded: creator {creator_id} already owns {max} tags")]
    QuotaExceeded { creator_id: i64, max: usize },

    #[error("Tag not found: #{name}")]
    TagNotFound { name: String },

    #[error("Already subscribed to #{name}")]
    AlreadySubscribed { name: String },

    #[error("Only the creator of #{name} can delete it")]
    Forbidden { name: String },

    #[error("Corrupt data file: {path} matches neither the current nor the legacy schema")]
    CorruptState { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidName { .. } => ErrorCode::InvalidName,
            Self::DescriptionTooLong { .. } => ErrorCode::DescriptionTooLong,
            Self::DuplicateTag { .. } => ErrorCode::DuplicateTag,
            Self::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            Self::TagNotFound { .. } => ErrorCode::TagNotFound,
            Self::AlreadySubscribed { .. } => ErrorCode::AlreadySubscribed,
            Self::Forbidden { .. } => ErrorCode::Forbidden,
            Self::CorruptState { .. } => ErrorCode::CorruptState,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::DuplicateTag { name } => Some(format!(
                "Tag names are case-insensitive; '{name}' collides with an existing tag. \
                 Use `tagping list` to see what exists."
            )),

            Self::TagNotFound { .. } => {
                Some("Use `tagping list` to see available tags.".to_string())
            }

            Self::AlreadySubscribed { name } => Some(format!(
                "You already receive mentions for #{name}; nothing to do."
            )),

            Self::Forbidden { .. } => Some(
                "Deletion needs the tag's creator, or --admin if you moderate this group."
                    .to_string(),
            ),

            Self::QuotaExceeded { max, .. } => Some(format!(
                "Delete one of your existing tags first (at most {max} per creator)."
            )),

            Self::CorruptState { path } => Some(format!(
                "Inspect or restore {} from a backup; tagping will not overwrite it.",
                path.display()
            )),

            Self::InvalidArgument(msg) if msg.contains("--user") => Some(
                "Pass --user <id> (or set TAGPING_USER) so tagping knows who is acting."
                    .to_string(),
            ),

            Self::InvalidName { .. }
            | Self::DescriptionTooLong { .. }
            | Self::InvalidArgument(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, exit code, and optional recovery
    /// hint. Scripts parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::TagNotFound { name: "x".into() }.exit_code(), 3);
        assert_eq!(
            Error::InvalidName { reason: "empty".into() }.exit_code(),
            4
        );
        assert_eq!(Error::DuplicateTag { name: "x".into() }.exit_code(), 5);
        assert_eq!(Error::Forbidden { name: "x".into() }.exit_code(), 6);
        assert_eq!(
            Error::CorruptState { path: PathBuf::from("tags.json") }.exit_code(),
            2
        );
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::TagNotFound { name: "lunch".into() };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "TAG_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert!(json["error"]["hint"].as_str().unwrap().contains("tagping list"));
    }

    #[test]
    fn test_io_errors_share_category() {
        let io = Error::Io(std::io::Error::other("disk full"));
        assert_eq!(io.exit_code(), 8);
        assert_eq!(io.error_code().as_str(), "IO_ERROR");
    }
}
