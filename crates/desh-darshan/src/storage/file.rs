//! File-backed [`KeyValueStore`]: one `<key>.json` file per key.
//!
//! Writes go to a temporary file in the same directory which is then
//! renamed over the target, so a crash mid-write never leaves a truncated
//! value behind.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use super::{DATA_DIR, KeyValueStore, Result, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    #[instrument(name = "Open file storage", level = "info")]
    pub fn open(dir: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!(dir = ?dir, "File storage ready");
        Ok(Self { dir })
    }

    /// Open the storage directory resolved by [`DATA_DIR`].
    pub fn open_default() -> Result<Self> {
        Self::open(DATA_DIR.as_path())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = ?path, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_in_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert_eq!(storage.get("favorites").unwrap(), None);
        storage.set("favorites", "[1,2]").unwrap();
        assert_eq!(storage.get("favorites").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("favorites.json").exists());

        storage.set("favorites", "[]").unwrap();
        assert_eq!(storage.get("favorites").unwrap().as_deref(), Some("[]"));

        storage.remove("favorites").unwrap();
        assert_eq!(storage.get("favorites").unwrap(), None);
        storage.remove("favorites").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::open(dir.path())
            .unwrap()
            .set("bookmarks", "[]")
            .unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get("bookmarks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", "fav.json"] {
            assert!(matches!(
                storage.set(key, "[]"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::open(&nested).unwrap();
        storage.set("k", "[]").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
