// SPDX-License-Identifier: MPL-2.0
//! Local key/value storage persisted in CBOR format.
//!
//! Values are stored as JSON text under string keys, the same shape a
//! browser's local storage uses. The whole map is written to
//! `storage.cbor` in the app data directory after every mutation.
//!
//! Every failure (quota exceeded, unreadable file, malformed stored value)
//! is caught here: the non-`try_` accessors log a warning and degrade to
//! the caller's default. Nothing is propagated further.
//!
//! # Path Resolution
//!
//! 1. `base_dir` passed to [`Storage::open`]
//! 2. `CAFE_CLIENT_DATA_DIR` environment variable
//! 3. Platform-specific data directory

use super::paths;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Storage file name within the app data directory.
const STORAGE_FILE: &str = "storage.cbor";

/// Total size budget for keys plus values, mirroring browser quotas (5 MiB).
pub const MAX_STORAGE_BYTES: usize = 5 * 1024 * 1024;

/// Errors raised by the `try_` storage accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The value could not be encoded as JSON.
    Serialize(String),
    /// The stored value is not valid JSON for the requested type.
    Parse(String),
    /// Writing the value would exceed [`MAX_STORAGE_BYTES`].
    QuotaExceeded { required: usize, limit: usize },
    /// Reading or writing the backing file failed.
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Serialize(msg) => write!(f, "cannot encode value: {msg}"),
            StorageError::Parse(msg) => write!(f, "malformed stored value: {msg}"),
            StorageError::QuotaExceeded { required, limit } => {
                write!(f, "quota exceeded: {required} bytes needed, limit is {limit}")
            }
            StorageError::Io(msg) => write!(f, "storage I/O failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Key to JSON value cache.
#[derive(Debug, Default)]
pub struct Storage {
    /// Backing file; `None` keeps everything in memory.
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl Storage {
    /// Creates a storage that is never written to disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the storage file, starting empty if it is missing or unreadable.
    pub fn open(base_dir: Option<PathBuf>) -> Self {
        let Some(path) = paths::get_app_data_dir_with_override(base_dir)
            .map(|dir| dir.join(STORAGE_FILE))
        else {
            tracing::warn!("no data directory available, storage stays in memory");
            return Self::in_memory();
        };

        let entries = if path.exists() {
            match Self::read_entries(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "discarding unreadable storage file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        let file = fs::File::open(path).map_err(|e| StorageError::Io(e.to_string()))?;
        ciborium::from_reader(BufReader::new(file)).map_err(|e| StorageError::Parse(e.to_string()))
    }

    /// Stores `value` as JSON under `key`.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be encoded, the quota would be exceeded,
    /// or the backing file cannot be written. The in-memory map is left
    /// unchanged on quota and encoding failures.
    pub fn try_set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;

        let current = self.used_bytes()
            - self
                .entries
                .get(key)
                .map_or(0, |old| key.len() + old.len());
        let required = current + key.len() + json.len();
        if required > MAX_STORAGE_BYTES {
            return Err(StorageError::QuotaExceeded {
                required,
                limit: MAX_STORAGE_BYTES,
            });
        }

        self.entries.insert(key.to_string(), json);
        self.flush()
    }

    /// Reads the value under `key`.
    ///
    /// # Errors
    ///
    /// Fails when the stored text does not parse as `T`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.entries
            .get(key)
            .map(|json| serde_json::from_str(json).map_err(|e| StorageError::Parse(e.to_string())))
            .transpose()
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Fails when the backing file cannot be rewritten.
    pub fn try_remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    /// Best-effort [`Self::try_set`]; failures are logged and dropped.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if let Err(err) = self.try_set(key, value) {
            tracing::warn!(key, error = %err, "local storage write failed");
        }
    }

    /// Best-effort [`Self::try_get`]; returns `default` when the key is
    /// missing or its value is malformed.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(key, error = %err, "local storage read failed");
                default
            }
        }
    }

    /// Best-effort [`Self::try_remove`].
    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.try_remove(key) {
            tracing::warn!(key, error = %err, "local storage delete failed");
        }
    }

    /// Returns whether `key` holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Bytes used by keys plus JSON values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let file = fs::File::create(path).map_err(|e| StorageError::Io(e.to_string()))?;
        ciborium::into_writer(&self.entries, BufWriter::new(file))
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    /// Inserts raw text under `key`, bypassing JSON encoding.
    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, key: &str, raw: &str) {
        self.entries.insert(key.to_string(), raw.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct RecentMenu {
        menu_id: u64,
        name: String,
    }

    #[test]
    fn get_returns_default_for_missing_key() {
        let storage = Storage::in_memory();
        assert_eq!(storage.get("missing", 42_u32), 42);
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut storage = Storage::in_memory();
        let recent = RecentMenu {
            menu_id: 7,
            name: "Americano".into(),
        };
        storage.set("recent", &recent);

        let loaded: Option<RecentMenu> = storage.get("recent", None);
        assert_eq!(loaded, Some(recent));
    }

    #[test]
    fn malformed_value_degrades_to_default() {
        let mut storage = Storage::in_memory();
        storage.insert_raw("broken", "{not json");

        assert_eq!(storage.get("broken", 5_i32), 5);
        assert!(matches!(
            storage.try_get::<i32>("broken"),
            Err(StorageError::Parse(_))
        ));
    }

    #[test]
    fn wrong_type_degrades_to_default() {
        let mut storage = Storage::in_memory();
        storage.set("count", &"three");
        assert_eq!(storage.get("count", 0_u32), 0);
    }

    #[test]
    fn quota_exceeded_leaves_storage_unchanged() {
        let mut storage = Storage::in_memory();
        let huge = "x".repeat(MAX_STORAGE_BYTES);

        let result = storage.try_set("huge", &huge);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert!(!storage.contains("huge"));

        // Best-effort variant swallows the failure.
        storage.set("huge", &huge);
        assert!(!storage.contains("huge"));
    }

    #[test]
    fn overwriting_a_key_does_not_double_count() {
        let mut storage = Storage::in_memory();
        storage.set("key", &"value");
        let used = storage.used_bytes();
        storage.set("key", &"value");
        assert_eq!(storage.used_bytes(), used);
    }

    #[test]
    fn remove_deletes_key() {
        let mut storage = Storage::in_memory();
        storage.set("key", &1);
        storage.remove("key");
        assert!(!storage.contains("key"));
        storage.remove("key");
    }

    #[test]
    fn values_persist_across_open() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());

        let mut storage = Storage::open(base.clone());
        storage.set("language", &"ko");
        drop(storage);

        let reopened = Storage::open(base);
        assert_eq!(reopened.get("language", String::new()), "ko");
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(STORAGE_FILE), b"garbage").expect("write");

        let storage = Storage::open(Some(temp_dir.path().to_path_buf()));
        assert_eq!(storage.used_bytes(), 0);
    }
}
