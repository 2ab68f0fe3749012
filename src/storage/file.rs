//! Atomic load/save of the tag document.
//!
//! Saves never touch the target file directly: content goes to a sibling
//! temp file, is fsynced, then renamed over the target. A failed save
//! leaves the previous document intact.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Tag;
use crate::storage::legacy;

/// The persisted root: one array of tag records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tags: Vec<Tag>,
}

/// How a load resolved.
///
/// `Migrated` and `Fresh` tell the caller the on-disk bytes do not yet
/// match the current schema; both are re-persisted immediately so the
/// fallback path never runs twice for the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No prior state existed; an empty document was created.
    Fresh,
    /// Parsed under the current schema.
    Current,
    /// Parsed under the legacy schema and migrated.
    Migrated,
}

/// File-backed store for the tag document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, trying current then legacy schema.
    ///
    /// A missing file yields an empty document that is durably created
    /// before returning. Bytes matching neither schema are fatal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`] if the file matches neither
    /// schema, or [`Error::Io`] on read/create failure.
    pub fn load(&self) -> Result<(Document, LoadOutcome)> {
        if !self.path.exists() {
            let doc = Document::default();
            self.save(&doc)?;
            info!(path = %self.path.display(), "created empty tag store");
            return Ok((doc, LoadOutcome::Fresh));
        }

        let raw = fs::read_to_string(&self.path)?;

        if let Ok(doc) = serde_json::from_str::<Document>(&raw) {
            debug!(path = %self.path.display(), tags = doc.tags.len(), "loaded tag store");
            return Ok((doc, LoadOutcome::Current));
        }

        match legacy::parse(&raw) {
            Some(tags) => {
                info!(
                    path = %self.path.display(),
                    tags = tags.len(),
                    "migrated legacy tag store"
                );
                Ok((Document { tags }, LoadOutcome::Migrated))
            }
            None => Err(Error::CorruptState {
                path: self.path.clone(),
            }),
        }
    }

    /// Write the full document, atomically replacing prior content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if any file operation fails (the original
    /// file is left untouched) or [`Error::Json`] on serialization
    /// failure.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)?;
        atomic_write(&self.path, &content)?;
        debug!(path = %self.path.display(), tags = doc.tags.len(), "saved tag store");
        Ok(())
    }
}

/// Write content to a file atomically.
///
/// Writes to a temporary sibling (`.tmp` extension), fsyncs, then
/// renames over the target. If any step fails, the original file (if
/// any) remains untouched.
fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        // Sync to disk before rename
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subscriber;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("tags.json"))
    }

    #[test]
    fn test_load_missing_file_creates_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let (doc, outcome) = store.load().unwrap();
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert!(doc.tags.is_empty());
        // The empty document is durably created, not just implied.
        assert!(store.path().exists());

        let (_, outcome) = store.load().unwrap();
        assert_eq!(outcome, LoadOutcome::Current);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut tag = Tag::new("lunch", 42, "alice", "midday crew");
        tag.subscribers.push(Subscriber::new(7, "bob"));
        tag.subscribers.push(Subscriber::new(8, ""));
        let doc = Document { tags: vec![tag] };

        store.save(&doc).unwrap();
        let (loaded, outcome) = store.load().unwrap();

        assert_eq!(outcome, LoadOutcome::Current);
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_load_legacy_document_migrates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"tags":[{"name":"x","creator_id":1,"subscribers":[5,6]}]}"#,
        )
        .unwrap();

        let (doc, outcome) = store.load().unwrap();
        assert_eq!(outcome, LoadOutcome::Migrated);
        assert_eq!(doc.tags.len(), 1);
        let subs = &doc.tags[0].subscribers;
        assert_eq!(subs.len(), 2);
        // Migrated subscribers carry the placeholder, not a real name.
        assert_eq!(subs[0].handle(), "User5");
        assert_eq!(subs[1].handle(), "User6");
        assert!(subs.iter().all(|s| !s.is_mentionable()));
    }

    #[test]
    fn test_migrated_document_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"tags":[{"name":"x","creator_id":1,"subscribers":[5]}]}"#,
        )
        .unwrap();

        let (doc, _) = store.load().unwrap();
        store.save(&doc).unwrap();

        // Once re-saved, the file parses as current schema and the
        // placeholder still means "name unknown".
        let (reloaded, outcome) = store.load().unwrap();
        assert_eq!(outcome, LoadOutcome::Current);
        assert_eq!(reloaded, doc);
        assert!(!reloaded.tags[0].subscribers[0].is_mentionable());
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json at all").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::CorruptState { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_save_replaces_not_appends() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let doc = Document {
            tags: vec![Tag::new("a", 1, "x", ""), Tag::new("b", 1, "x", "")],
        };
        store.save(&doc).unwrap();
        store.save(&Document::default()).unwrap();

        let (loaded, _) = store.load().unwrap();
        assert!(loaded.tags.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("deep").join("tags.json"));

        store.save(&Document::default()).unwrap();
        assert!(store.path().exists());
    }
}
