//! Tag and Subscriber models.
//!
//! A `Tag` is a named, creator-owned, subscribable topic. Subscribers are
//! keyed by an opaque numeric identity supplied by the hosting transport;
//! their display name is advisory and only used to render mentions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum tag name length, in characters.
pub const NAME_MAX: usize = 50;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX: usize = 100;

/// Maximum number of tags a single creator may own.
pub const CREATOR_QUOTA: usize = 10;

/// An identity registered to receive mentions for a tag.
///
/// `display_name` is `None` when no real name is known. The stored format
/// requires a non-empty `username`, so an unknown name is written as the
/// deterministic placeholder `User{id}` and mapped back to `None` on load.
/// Only subscribers with a known name are mentionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub id: i64,
    pub display_name: Option<String>,
}

impl Subscriber {
    /// Build a subscriber, treating an empty display name as unknown.
    #[must_use]
    pub fn new(id: i64, display_name: &str) -> Self {
        let display_name = if display_name.is_empty() {
            None
        } else {
            Some(display_name.to_string())
        };
        Self { id, display_name }
    }

    /// The placeholder written in place of an unknown display name.
    #[must_use]
    pub fn placeholder_for(id: i64) -> String {
        format!("User{id}")
    }

    /// Rendered handle: the display name, or the placeholder if unknown.
    #[must_use]
    pub fn handle(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| Self::placeholder_for(self.id))
    }

    /// Whether this subscriber can be @-mentioned (real name known).
    #[must_use]
    pub const fn is_mentionable(&self) -> bool {
        self.display_name.is_some()
    }
}

/// Wire shape of a subscriber in the persisted document.
#[derive(Serialize, Deserialize)]
struct SubscriberRecord {
    id: i64,
    username: String,
}

impl Serialize for Subscriber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SubscriberRecord {
            id: self.id,
            username: self.handle(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Subscriber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = SubscriberRecord::deserialize(deserializer)?;
        // Empty or placeholder usernames mean the real name was never known.
        let display_name = if record.username.is_empty()
            || record.username == Self::placeholder_for(record.id)
        {
            None
        } else {
            Some(record.username)
        };
        Ok(Self {
            id: record.id,
            display_name,
        })
    }
}

/// A named, creator-owned, subscribable topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name, stored with the creator's casing; unique case-insensitively.
    pub name: String,

    /// Numeric identity of the creator.
    pub creator_id: i64,

    /// Creator's display name at creation time.
    #[serde(default)]
    pub creator_name: String,

    /// Free-text description, at most [`DESCRIPTION_MAX`] characters.
    #[serde(default)]
    pub description: String,

    /// Subscribers in insertion order, no duplicate ids.
    pub subscribers: Vec<Subscriber>,

    /// Creation timestamp (RFC 3339 in the persisted document).
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a tag with no subscribers, stamped now.
    #[must_use]
    pub fn new(name: &str, creator_id: i64, creator_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            creator_id,
            creator_name: creator_name.to_string(),
            description: description.to_string(),
            subscribers: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name match.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Whether the given identity is subscribed.
    #[must_use]
    pub fn has_subscriber(&self, id: i64) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    /// A tag nobody subscribes to is reclaimable on the next prune.
    #[must_use]
    pub const fn is_reclaimable(&self) -> bool {
        self.subscribers.is_empty()
    }
}
