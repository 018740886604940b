//! Key-value persistence adapter.
//!
//! This module wraps a durable string-keyed, string-valued store behind the
//! [`KeyValueStore`] trait. The application persists two JSON documents
//! through it (the journal entry list and the notification preferences);
//! callers never touch the filesystem directly.
//!
//! The contract is deliberately small: `get` returns `Ok(None)` for an absent
//! key, and any `Err` from `set`/`remove` means the store is unchanged.

use crate::errors::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// Storage key holding the serialized journal entry list (a JSON array).
pub const JOURNAL_ENTRIES_KEY: &str = "journal_entries";

/// Storage key holding the serialized notification preferences (a JSON object).
pub const NOTIFICATION_PREFERENCES_KEY: &str = "notification_preferences";

/// Reserved storage key for user preferences. Defined for forward
/// compatibility; none of the core flows read or write it yet.
pub const USER_PREFERENCES_KEY: &str = "user_preferences";

/// An asynchronous, durable key-value store mapping string keys to string
/// values.
///
/// Implementations must guarantee that a failed operation leaves the stored
/// state as it was: callers treat any `Err` as "no change happened".
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Validates that a storage key is a simple slug safe to use as a file stem.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_.-".contains(c));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// A durable [`KeyValueStore`] backed by one file per key under a root
/// directory.
///
/// Writes go to a temporary sibling file which is renamed over the target, so
/// a crash mid-write leaves either the old value or the new one, never a
/// truncated mix.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates if necessary) a file store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DirectoryUnavailable`] if the root directory
    /// cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::DirectoryUnavailable {
                path: root.clone(),
                source,
            })?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Returns the backing file path for a key.
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        let tmp = self.root.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StorageError::WriteFailed {
                key: key.to_string(),
                path: path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StorageError::WriteFailed {
                key: key.to_string(),
                path: path.clone(),
                source,
            })?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed stored value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::RemoveFailed {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }
}

/// An in-memory [`KeyValueStore`].
///
/// Loses its contents when dropped; used by tests and available for
/// ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Returns true if the path referenced by `key` currently exists in `store`.
#[cfg(test)]
pub(crate) async fn key_present(store: &dyn KeyValueStore, key: &str) -> bool {
    store.get(key).await.unwrap().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("journal_entries").await.unwrap(), None);

        store.set("journal_entries", "[]").await.unwrap();
        assert_eq!(
            store.get("journal_entries").await.unwrap(),
            Some("[]".to_string())
        );

        store.remove("journal_entries").await.unwrap();
        assert_eq!(store.get("journal_entries").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_remove_absent_key_succeeds() {
        let store = MemoryStore::new();
        store.remove("journal_entries").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = MemoryStore::new();

        let result = store.get("../escape").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.set("", "value").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.set("Has Spaces", "value").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store
            .set("notification_preferences", r#"{"enabled":true}"#)
            .await
            .unwrap();
        assert_eq!(
            store.get("notification_preferences").await.unwrap(),
            Some(r#"{"enabled":true}"#.to_string())
        );

        store.remove("notification_preferences").await.unwrap();
        assert_eq!(store.get("notification_preferences").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.set("journal_entries", "[1,2,3]").await.unwrap();
        }

        let reopened = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(
            reopened.get("journal_entries").await.unwrap(),
            Some("[1,2,3]".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_overwrite_replaces_value() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store.set("journal_entries", "old").await.unwrap();
        store.set("journal_entries", "new").await.unwrap();
        assert_eq!(
            store.get("journal_entries").await.unwrap(),
            Some("new".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_remove_absent_key_succeeds() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.remove("journal_entries").await.unwrap();
    }

    #[test]
    fn test_validate_key_accepts_slugs() {
        assert!(validate_key("journal_entries").is_ok());
        assert!(validate_key("user_preferences").is_ok());
        assert!(validate_key("a.b-c_9").is_ok());
    }
}
