//! Journal entry model and repository.
//!
//! Entries are kept as one JSON array under a single storage key; every
//! mutation is a read-modify-rewrite of the whole list. That is a deliberate
//! non-scaling design: at personal-journal volumes the list stays tiny, and a
//! single key keeps the persistence adapter trivial.
//!
//! A malformed stored value self-heals: `list` clears the key and returns an
//! empty list rather than propagating a parse error. The data loss is logged
//! at `warn!` since it is recovery by discarding entries.

use crate::errors::AppResult;
use crate::storage::{KeyValueStore, JOURNAL_ENTRIES_KEY};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A user-authored journal note for one calendar date.
///
/// Serialized in camelCase with RFC 3339 timestamps, matching the on-disk
/// JSON shape:
///
/// ```json
/// {
///   "id": "6f9c0d1e-...",
///   "date": "2026-08-30",
///   "content": "Slept well, wrote a lot.",
///   "mood": "calm",
///   "createdAt": "2026-08-30T08:12:45.120Z",
///   "updatedAt": "2026-08-30T08:12:45.120Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique id, assigned at creation time.
    pub id: String,
    /// The calendar date the note is about. One entry per day is the
    /// expected usage, but not enforced.
    pub date: NaiveDate,
    /// Free-text body. Mutable.
    pub content: String,
    /// Optional mood tag. Mutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Bumped on every content or mood change.
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Creates a new entry dated today with a fresh id and timestamps.
    pub fn new(content: impl Into<String>, mood: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date: Local::now().date_naive(),
            content: content.into(),
            mood,
            created_at: now,
            updated_at: now,
        }
    }
}

/// CRUD over the persisted journal entry list.
///
/// The repository owns the storage interaction only; it does not cache. The
/// application state store keeps its own copy of the list and is responsible
/// for refreshing it after each mutation.
pub struct JournalRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JournalRepository {
    /// Creates a repository over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns all persisted entries, in insertion order.
    ///
    /// An absent key yields an empty list. A value that fails to parse as an
    /// entry array is treated as corruption: the key is removed and an empty
    /// list is returned, so corruption never propagates as an error. A read
    /// failure degrades to an empty list the same way.
    pub async fn list(&self) -> Vec<JournalEntry> {
        let raw = match self.store.get(JOURNAL_ENTRIES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read journal entries, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<JournalEntry>>(&raw) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded journal entries");
                entries
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Corrupted journal data, clearing stored entries"
                );
                if let Err(e) = self.store.remove(JOURNAL_ENTRIES_KEY).await {
                    warn!(error = %e, "Failed to clear corrupted journal data");
                }
                Vec::new()
            }
        }
    }

    /// Returns the first entry whose date matches `date`, if any.
    pub async fn find_by_date(&self, date: NaiveDate) -> Option<JournalEntry> {
        self.list().await.into_iter().find(|e| e.date == date)
    }

    /// Appends `entry` to the persisted list.
    ///
    /// # Errors
    ///
    /// Propagates the storage error if the write fails; the stored list is
    /// then unchanged and the caller must not assume the entry was added.
    pub async fn save(&self, entry: &JournalEntry) -> AppResult<()> {
        let mut entries = self.list().await;
        entries.push(entry.clone());
        self.write_entries(&entries).await?;
        debug!(id = %entry.id, date = %entry.date, "Saved journal entry");
        Ok(())
    }

    /// Rewrites the entry with the given id, replacing its content, its mood
    /// (only when `mood` is provided), and bumping `updated_at` to now.
    ///
    /// Returns `Ok(true)` if an entry was updated. An unknown id is a lenient
    /// no-op that leaves storage untouched and returns `Ok(false)`, so
    /// callers can surface the miss without it being an error.
    ///
    /// # Errors
    ///
    /// Propagates the storage error if the rewrite fails.
    pub async fn update(
        &self,
        id: &str,
        content: &str,
        mood: Option<&str>,
    ) -> AppResult<bool> {
        let mut entries = self.list().await;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            debug!(id, "Update requested for unknown journal entry id");
            return Ok(false);
        };

        entry.content = content.to_string();
        if let Some(mood) = mood {
            entry.mood = Some(mood.to_string());
        }
        entry.updated_at = Utc::now();

        self.write_entries(&entries).await?;
        debug!(id, "Updated journal entry");
        Ok(true)
    }

    /// Removes the entry with the given id, leaving all other entries in
    /// their original relative order. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the storage error if the rewrite fails.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut entries = self.list().await;
        entries.retain(|e| e.id != id);
        self.write_entries(&entries).await?;
        debug!(id, "Deleted journal entry");
        Ok(())
    }

    /// Removes the journal storage key entirely.
    ///
    /// # Errors
    ///
    /// Propagates the storage error if the removal fails.
    pub async fn clear_all(&self) -> AppResult<()> {
        self.store.remove(JOURNAL_ENTRIES_KEY).await?;
        debug!("Cleared all journal entries");
        Ok(())
    }

    /// Serializes and stores the full entry list.
    async fn write_entries(&self, entries: &[JournalEntry]) -> AppResult<()> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| crate::errors::AppError::Journal(format!("Serialization failed: {}", e)))?;
        self.store.set(JOURNAL_ENTRIES_KEY, &raw).await?;
        Ok(())
    }
}
