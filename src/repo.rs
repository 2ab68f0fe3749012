//! The tag repository: the single root aggregate.
//!
//! Owns every tag and subscriber in memory and commits each mutation
//! through the [`JsonStore`] before returning. Validation always runs
//! before mutation, so a rejected command leaves no partial state.
//!
//! A failed persist is surfaced as [`Error::Io`] without rolling back
//! the in-memory change: the caller should treat it as "state may be
//! ahead of disk" and retry or restart. In the CLI host the process
//! exits right after, so the divergent state is simply discarded.
//!
//! The repository is single-writer. Nothing here locks; a host that
//! exposes one instance to concurrent callers must serialize access
//! around whole operations (check-then-insert sequences included).

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Subscriber, Tag, CREATOR_QUOTA, DESCRIPTION_MAX, NAME_MAX};
use crate::storage::{Document, JsonStore, LoadOutcome};

/// Snapshot row returned by the listing operations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagSummary {
    pub name: String,
    pub subscriber_count: usize,
    pub description: String,
}

impl From<&Tag> for TagSummary {
    fn from(tag: &Tag) -> Self {
        Self {
            name: tag.name.clone(),
            subscriber_count: tag.subscribers.len(),
            description: tag.description.clone(),
        }
    }
}

/// One resolved `#tag` mention: the stored tag name and the handles of
/// its mentionable subscribers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MentionGroup {
    pub tag_name: String,
    pub handles: Vec<String>,
}

/// In-memory tag collection backed by a durable JSON document.
#[derive(Debug)]
pub struct TagRepository {
    tags: Vec<Tag>,
    store: JsonStore,
}

impl TagRepository {
    /// Load the repository from `path`, creating an empty store if none
    /// exists and migrating a legacy-schema document on the spot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the file matches neither
    /// schema (fatal: the host must not proceed), or [`Error::Io`] on
    /// read/write failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = JsonStore::new(path.as_ref());
        let (doc, outcome) = store.load()?;
        let repo = Self { tags: doc.tags, store };

        // Re-persist migrated state immediately so the legacy fallback
        // never runs again for this file.
        if outcome == LoadOutcome::Migrated {
            repo.persist()?;
        }

        Ok(repo)
    }

    /// Create a new tag owned by `creator_id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidName`] for an empty or over-long name,
    /// [`Error::DuplicateTag`] on a case-insensitive name collision,
    /// [`Error::DescriptionTooLong`] past [`DESCRIPTION_MAX`] characters,
    /// [`Error::QuotaExceeded`] once the creator owns [`CREATOR_QUOTA`]
    /// tags. All checks run before any state changes.
    pub fn create(
        &mut self,
        name: &str,
        creator_id: i64,
        creator_name: &str,
        description: &str,
    ) -> Result<Tag> {
        if name.is_empty() {
            return Err(Error::InvalidName { reason: "name is empty".to_string() });
        }
        let name_len = name.chars().count();
        if name_len > NAME_MAX {
            return Err(Error::InvalidName {
                reason: format!("{name_len} characters (max {NAME_MAX})"),
            });
        }
        if let Some(existing) = self.find(name) {
            return Err(Error::DuplicateTag { name: existing.name.clone() });
        }
        let description_len = description.chars().count();
        if description_len > DESCRIPTION_MAX {
            return Err(Error::DescriptionTooLong {
                actual: description_len,
                max: DESCRIPTION_MAX,
            });
        }
        let owned = self.tags.iter().filter(|t| t.creator_id == creator_id).count();
        if owned >= CREATOR_QUOTA {
            return Err(Error::QuotaExceeded { creator_id, max: CREATOR_QUOTA });
        }

        let tag = Tag::new(name, creator_id, creator_name, description);
        self.tags.push(tag.clone());
        self.persist()?;
        info!(name, creator_id, "created tag");
        Ok(tag)
    }

    /// Case-insensitive lookup.
    ///
    /// The reference is only valid until the next mutation; callers
    /// must not cache it across operations (pruning invalidates it).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.matches(name))
    }

    /// Subscribe `id` to the named tag.
    ///
    /// # Errors
    ///
    /// [`Error::TagNotFound`] if no such tag; [`Error::AlreadySubscribed`]
    /// if `id` is already on the list (state untouched, reported
    /// distinctly so the caller can render a different message).
    pub fn subscribe(&mut self, name: &str, id: i64, display_name: &str) -> Result<()> {
        let tag = self
            .tags
            .iter_mut()
            .find(|t| t.matches(name))
            .ok_or_else(|| Error::TagNotFound { name: name.to_string() })?;

        if tag.subscribers.iter().any(|s| s.id == id) {
            return Err(Error::AlreadySubscribed { name: tag.name.clone() });
        }

        tag.subscribers.push(Subscriber::new(id, display_name));
        let tag_name = tag.name.clone();
        self.persist()?;
        info!(name = %tag_name, subscriber = id, "subscribed");
        Ok(())
    }

    /// Delete the named tag.
    ///
    /// Privilege is resolved by the caller (the core knows nothing of
    /// chat administration); `privileged` requesters bypass the
    /// creator-only check.
    ///
    /// # Errors
    ///
    /// [`Error::TagNotFound`] if no such tag; [`Error::Forbidden`] for a
    /// non-creator, non-privileged requester (tag left unchanged).
    pub fn delete(&mut self, name: &str, requester_id: i64, privileged: bool) -> Result<()> {
        let tag = self
            .find(name)
            .ok_or_else(|| Error::TagNotFound { name: name.to_string() })?;

        if tag.creator_id != requester_id && !privileged {
            return Err(Error::Forbidden { name: tag.name.clone() });
        }

        let stored_name = tag.name.clone();
        self.tags.retain(|t| !t.matches(name));
        self.persist()?;
        info!(name = %stored_name, requester_id, privileged, "deleted tag");
        Ok(())
    }

    /// Prune, then snapshot all tags in storage order.
    ///
    /// # Errors
    ///
    /// Propagates a persist failure from the implicit prune.
    pub fn list(&mut self) -> Result<Vec<TagSummary>> {
        self.prune()?;
        Ok(self.tags.iter().map(TagSummary::from).collect())
    }

    /// Tags the requester subscribes to, in storage order. No prune:
    /// a subscribed tag is by definition not reclaimable anyway.
    #[must_use]
    pub fn my_tags(&self, requester_id: i64) -> Vec<TagSummary> {
        self.tags
            .iter()
            .filter(|t| t.has_subscriber(requester_id))
            .map(TagSummary::from)
            .collect()
    }

    /// Prune, then snapshot subscriber counts in storage order.
    ///
    /// # Errors
    ///
    /// Propagates a persist failure from the implicit prune.
    pub fn stats(&mut self) -> Result<Vec<TagSummary>> {
        self.prune()?;
        Ok(self.tags.iter().map(TagSummary::from).collect())
    }

    /// Remove every zero-subscriber tag; persists only if something was
    /// removed. Emptiness is reclaimed lazily here rather than treated
    /// as a terminal state at unsubscribe time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on persist failure.
    pub fn prune(&mut self) -> Result<usize> {
        let before = self.tags.len();
        self.tags.retain(|t| !t.is_reclaimable());
        let removed = before - self.tags.len();
        if removed > 0 {
            self.persist()?;
            debug!(removed, "pruned reclaimable tags");
        }
        Ok(removed)
    }

    /// Resolve candidate `#tag` names to mention groups.
    ///
    /// Output order follows input order; duplicate candidates are
    /// processed independently, yielding duplicate groups (matches the
    /// original transport behavior). Unknown tags and tags with no
    /// mentionable subscriber are omitted.
    #[must_use]
    pub fn resolve_mentions<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<MentionGroup> {
        candidates
            .iter()
            .filter_map(|candidate| {
                let tag = self.find(candidate.as_ref())?;
                let handles: Vec<String> = tag
                    .subscribers
                    .iter()
                    .filter(|s| s.is_mentionable())
                    .map(Subscriber::handle)
                    .collect();
                if handles.is_empty() {
                    None
                } else {
                    Some(MentionGroup { tag_name: tag.name.clone(), handles })
                }
            })
            .collect()
    }

    /// Number of tags currently held (post-load, pre-prune view).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Flush the full in-memory state through the store.
    fn persist(&self) -> Result<()> {
        self.store.save(&Document { tags: self.tags.clone() })
    }
}
