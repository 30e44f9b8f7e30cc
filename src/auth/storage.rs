//! Durable key-value storage abstraction.
//!
//! The token record and the cart are persisted through the [`KeyValueStore`]
//! trait, which stands in for the browser's persisted key-value storage.
//! Two implementations ship with the SDK: [`MemoryStore`] for tests and
//! short-lived processes, and [`JsonFileStore`] backed by a single JSON
//! file on disk.
//!
//! Writes can transiently fail (the browser analogue is a private-mode
//! quota error), so every operation returns a `Result` and callers that
//! need durability retry a bounded number of times.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Errors produced by a [`KeyValueStore`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store rejected a write.
    #[error("Storage write failed: {reason}")]
    WriteFailed {
        /// Why the write was rejected.
        reason: String,
    },

    /// The backing store could not be read.
    #[error("Storage read failed: {reason}")]
    ReadFailed {
        /// Why the read failed.
        reason: String,
    },

    /// The store's internal lock was poisoned by a panicking writer.
    #[error("Storage is unavailable (poisoned lock)")]
    Poisoned,
}

/// A durable string-keyed store for small JSON payloads.
///
/// Implementations must be safe to share across threads; concurrent
/// writers are not synchronized beyond each single operation — last
/// writer wins, matching the multi-tab behavior of browser storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store cannot be updated.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// An in-memory [`KeyValueStore`].
///
/// # Example
///
/// ```rust
/// use grandson_api::auth::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("key", "value").unwrap();
/// assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// A [`KeyValueStore`] persisted as a single JSON object in one file.
///
/// Every write rewrites the whole file; the payloads stored here (one
/// token record, one cart) are small enough that this is not a concern.
///
/// # Example
///
/// ```rust,no_run
/// use grandson_api::auth::{JsonFileStore, KeyValueStore};
///
/// let store = JsonFileStore::new("/var/lib/grandson/client-state.json");
/// store.set("grandson_cart", "[]").unwrap();
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by the JSON file at `path`.
    ///
    /// The file is created on first write; a missing file reads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|err| StorageError::ReadFailed {
                    reason: err.to_string(),
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(StorageError::ReadFailed {
                reason: err.to_string(),
            }),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let contents =
            serde_json::to_string_pretty(entries).map_err(|err| StorageError::WriteFailed {
                reason: err.to_string(),
            })?;
        std::fs::write(&self.path, contents).map_err(|err| StorageError::WriteFailed {
            reason: err.to_string(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));

        store.set("key", "replaced").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("replaced".to_string()));

        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_memory_store_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("never-set").is_ok());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-state.json");
        let store = JsonFileStore::new(&path);

        assert_eq!(store.get("grandson_auth").unwrap(), None);

        store.set("grandson_auth", r#"{"token":"abc"}"#).unwrap();
        assert_eq!(
            store.get("grandson_auth").unwrap(),
            Some(r#"{"token":"abc"}"#.to_string())
        );

        // A second store over the same file sees the persisted value.
        let reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.get("grandson_auth").unwrap(),
            Some(r#"{"token":"abc"}"#.to_string())
        );

        store.remove("grandson_auth").unwrap();
        assert_eq!(reopened.get("grandson_auth").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_corrupt_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client-state.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get("anything"),
            Err(StorageError::ReadFailed { .. })
        ));
    }
}
