//! In-memory store

use std::collections::BTreeMap;
use std::sync::Mutex;

use log::debug;

use crate::{Store, StoreError};

/// Store backed by a map in process memory
///
/// An optional quota caps the total bytes of keys plus values, mirroring the
/// storage limit a browser enforces on `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `limit` bytes are used
    pub fn with_quota(limit: usize) -> Self {
        debug!("MemoryStore::with_quota: limit={}", limit);
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota: Some(limit),
        }
    }
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > limit {
                debug!("MemoryStore::set_raw: quota exceeded for {}", key);
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get_raw("a").unwrap(), None);

        store.set_raw("a", "1").unwrap();
        store.set_raw("a", "2").unwrap();
        assert_eq!(store.get_raw("a").unwrap().as_deref(), Some("2"));

        assert!(store.delete("a").unwrap());
        assert_eq!(store.get_raw("a").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let store = MemoryStore::with_quota(10);
        store.set_raw("a", "12345").unwrap();

        let err = store.set_raw("b", "123456789").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.get_raw("b").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let store = MemoryStore::with_quota(10);
        store.set_raw("a", "12345678").unwrap();
        // Overwriting the same key frees the old value first
        store.set_raw("a", "87654321").unwrap();
        assert_eq!(store.get_raw("a").unwrap().as_deref(), Some("87654321"));
    }
}
