//! Durable key-value storage.
//!
//! Favorites and bookmarks live in a key-value backend that behaves like a
//! browser's local storage: string keys, string values, synchronous reads
//! and writes. The [`KeyValueStore`] trait is the seam; [`MemoryStorage`]
//! and [`FileStorage`] are the two backends shipped here.
//!
//! Values are JSON arrays. [`JsonArraySlot`] wraps one key and applies the
//! defensive read rules: a missing value is an empty array, and a value that
//! is not valid JSON or not an array is reset to `[]` in storage.

mod file;
mod memory;

use std::{path::PathBuf, sync::Arc};

pub use error::StorageError;
pub(crate) use error::Result;
pub use file::FileStorage;
pub use memory::MemoryStorage;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const DATA_DIR_DEFAULT: &str = "./desh_darshan_data";
pub const DATA_DIR_ENV: &str = "DESH_DARSHAN_DATA_DIR";

/// Directory used by [`FileStorage::open_default`].
///
/// Resolved once: `$DESH_DARSHAN_DATA_DIR`, then the platform data directory
/// (with the `system-dirs` feature), then [`DATA_DIR_DEFAULT`].
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(feature = "system-dirs")]
    {
        if let Some(dirs) = directories::ProjectDirs::from("in", "Desh Darshan", "desh-darshan") {
            return dirs.data_dir().to_path_buf();
        }
    }
    PathBuf::from(DATA_DIR_DEFAULT)
});

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// The outcome of a mutation whose persistence is best-effort.
///
/// `value` is always the in-memory result. `persist_error` is set when the
/// write to storage failed; the caller decides whether to surface it.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub persist_error: Option<StorageError>,
}

impl<T> Persisted<T> {
    pub(crate) fn new(value: T, write: Result<()>) -> Self {
        Self {
            value,
            persist_error: write.err(),
        }
    }

    /// Whether the mutation reached storage.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Persisted<U> {
        Persisted {
            value: f(self.value),
            persist_error: self.persist_error,
        }
    }
}

/// One storage key holding a JSON array.
#[derive(Clone)]
pub struct JsonArraySlot {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for JsonArraySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonArraySlot")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl JsonArraySlot {
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the array. Never fails: unreadable or corrupted values yield an
    /// empty array, and corrupted values are reset in storage.
    pub fn read(&self) -> Vec<Value> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read storage, using empty value");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => {
                debug!(key = %self.key, items = items.len(), "Loaded stored array");
                items
            }
            Ok(_) => {
                self.reset_corrupted("stored value is not an array");
                Vec::new()
            }
            Err(e) => {
                self.reset_corrupted(&e.to_string());
                Vec::new()
            }
        }
    }

    pub fn write<T: Serialize>(&self, items: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(items)?;
        self.storage.set(&self.key, &encoded).inspect_err(|e| {
            warn!(key = %self.key, error = %e, "Failed to persist value");
        })
    }

    /// Overwrite the slot with `[]` after finding unusable data in it.
    pub(crate) fn reset_corrupted(&self, reason: &str) {
        warn!(key = %self.key, reason, "Invalid data in storage, resetting");
        // A failed reset leaves the old value behind; the next read resets again.
        if let Err(e) = self.write::<Value>(&[]) {
            debug!(key = %self.key, error = %e, "Reset of corrupted value not persisted");
        }
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum StorageError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
        #[error("Storage quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
        QuotaExceeded {
            key: String,
            needed: usize,
            limit: usize,
        },
        #[error("Invalid storage key: {0:?}")]
        InvalidKey(String),
    }
    pub type Result<T> = std::result::Result<T, StorageError>;
}
