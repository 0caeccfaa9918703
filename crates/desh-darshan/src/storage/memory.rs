//! In-process [`KeyValueStore`] for tests and ephemeral sessions.
//!
//! An optional byte quota (keys plus values) reproduces the "storage full"
//! failures a browser reports, so callers can exercise their best-effort
//! persistence paths.

use std::sync::{PoisonError, RwLock};

use ahash::AHashMap as HashMap;

use super::{KeyValueStore, Result, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::default(),
            quota: Some(bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);

        storage.set("k", "[1]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);

        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_counts_keys_and_values() {
        let storage = MemoryStorage::with_quota(8);
        storage.set("ab", "[1,2]").unwrap(); // 7 bytes
        storage.set("ab", "[1,23]").unwrap(); // replaced value, 8 bytes

        let err = storage.set("ab", "[1,234]").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 9,
                limit: 8,
                ..
            }
        ));
        assert_eq!(storage.get("ab").unwrap().as_deref(), Some("[1,23]"));
    }
}
