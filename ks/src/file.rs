//! File-per-key store

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{Store, StoreError};

/// Characters kept verbatim in file names; everything else is percent-encoded
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

const LOCK_FILE: &str = ".lock";

/// Store that keeps each key in its own JSON file
///
/// ```text
/// {dir}/
/// ├── .lock
/// ├── savedTrips.json
/// └── tripChecklist-New%20York.json
/// ```
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open or create a store directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!("FileStore::open: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let encoded = utf8_percent_encode(key, KEY_ENCODE_SET).to_string();
        Ok(self.dir.join(format!("{}.json", encoded)))
    }

    fn lock(&self) -> Result<fs::File, StoreError> {
        let lock = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        lock.lock_exclusive()?;
        Ok(lock)
    }
}

impl Store for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let lock = self.lock()?;

        // Write-then-rename so readers never see a half-written value
        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;

        lock.unlock()?;
        debug!("FileStore::set_raw: wrote {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        let lock = self.lock()?;
        let existed = match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        lock.unlock()?;
        if existed {
            info!("Deleted key {}", key);
        }
        Ok(existed)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(percent_decode_str(stem).decode_utf8_lossy().into_owned());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip_and_persistence() {
        let temp = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp.path()).unwrap();
            store.set_raw("savedTrips", "[]").unwrap();
        }

        // Reopen to simulate a reload
        let store = FileStore::open(temp.path()).unwrap();
        assert_eq!(store.get_raw("savedTrips").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_keys_with_spaces_and_slashes() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        store.set_raw("tripChecklist-New York", "[]").unwrap();
        store.set_raw("foodSuggestions-a/b", "null").unwrap();

        assert!(temp.path().join("tripChecklist-New%20York.json").exists());
        assert_eq!(
            store.keys().unwrap(),
            vec!["foodSuggestions-a/b".to_string(), "tripChecklist-New York".to_string()]
        );
        assert_eq!(store.get_raw("foodSuggestions-a/b").unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn test_missing_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert_eq!(store.get_raw("nope").unwrap(), None);
        assert!(!store.delete("nope").unwrap());
    }

    #[test]
    fn test_empty_key_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        assert!(matches!(store.set_raw("", "1"), Err(StoreError::InvalidKey(_))));
    }
}
