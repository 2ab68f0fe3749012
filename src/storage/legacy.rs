//! One-shot migration of the legacy persisted schema.
//!
//! The legacy document stores each tag's subscribers as a bare array of
//! numeric identities, and may omit `creator_name`, `description`, and
//! `created_at` entirely. Migration synthesizes nothing it cannot know:
//! subscriber display names come back as "unknown" (rendered with the
//! `User{id}` placeholder at the serialization boundary), missing text
//! fields default to empty, and a missing timestamp defaults to load
//! time. The caller re-persists immediately so this path never runs
//! twice for the same file.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::model::{Subscriber, Tag};

#[derive(Deserialize)]
struct LegacyDocument {
    tags: Vec<LegacyTag>,
}

#[derive(Deserialize)]
struct LegacyTag {
    name: String,
    creator_id: i64,
    #[serde(default)]
    creator_name: String,
    #[serde(default)]
    description: String,
    subscribers: Vec<i64>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl From<LegacyTag> for Tag {
    fn from(legacy: LegacyTag) -> Self {
        Self {
            name: legacy.name,
            creator_id: legacy.creator_id,
            creator_name: legacy.creator_name,
            description: legacy.description,
            subscribers: legacy
                .subscribers
                .into_iter()
                .map(|id| Subscriber { id, display_name: None })
                .collect(),
            created_at: legacy.created_at,
        }
    }
}

/// Try to parse raw bytes as a legacy document.
///
/// Returns `None` on structural mismatch; the caller decides whether
/// that means corruption (it does, if the current schema also failed).
#[must_use]
pub fn parse(raw: &str) -> Option<Vec<Tag>> {
    let doc: LegacyDocument = serde_json::from_str(raw).ok()?;
    debug!(tags = doc.tags.len(), "parsed legacy schema");
    Some(doc.tags.into_iter().map(Tag::from).collect())
}
