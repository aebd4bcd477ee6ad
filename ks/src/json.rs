//! Typed JSON adapter over a raw store

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Store, StoreError};

/// JSON get/set over any [`Store`] with silent degradation
///
/// Reads never fail: a missing key, a backend error or undecodable JSON all
/// yield the caller's fallback. Writes always update the in-memory copy; if the
/// backend write fails the error is logged and memory and storage diverge until
/// the next successful write of that key.
pub struct JsonStore {
    store: Arc<dyn Store>,
    memory: Mutex<HashMap<String, Value>>,
}

impl JsonStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// Underlying raw store
    pub fn inner(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Decoded value at `key`, or `fallback` if absent or undecodable
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        if let Some(value) = self.memory.lock().ok().and_then(|m| m.get(key).cloned()) {
            debug!("JsonStore::get: {} served from memory", key);
            return match serde_json::from_value(value) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!("Failed to decode in-memory value for {}: {}", key, e);
                    fallback
                }
            };
        }

        match self.store.get_raw(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(decoded) => decoded,
                Err(e) => {
                    warn!("Failed to decode stored value for {}: {}", key, e);
                    fallback
                }
            },
            Ok(None) => {
                debug!("JsonStore::get: {} absent, using fallback", key);
                fallback
            }
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                fallback
            }
        }
    }

    /// Encode and write `value` at `key`; backend failures are logged, not returned
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            warn!("Failed to persist {}: {}", key, e);
        }
    }

    /// Like [`JsonStore::set`] but reports the backend error
    ///
    /// The in-memory value is updated even when this returns an error.
    pub fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to encode value for {}: {}", key, e);
                return Ok(());
            }
        };
        let raw = value.to_string();

        if let Ok(mut memory) = self.memory.lock() {
            memory.insert(key.to_string(), value);
        }
        self.store.set_raw(key, &raw)
    }

    /// Remove `key` from memory and storage; returns whether storage had it
    pub fn delete(&self, key: &str) -> bool {
        if let Ok(mut memory) = self.memory.lock() {
            memory.remove(key);
        }
        match self.store.delete(key) {
            Ok(existed) => existed,
            Err(e) => {
                warn!("Failed to delete {}: {}", key, e);
                false
            }
        }
    }

    /// Keys present in storage
    pub fn keys(&self) -> Vec<String> {
        self.store.keys().unwrap_or_else(|e| {
            warn!("Failed to list keys: {}", e);
            Vec::new()
        })
    }
}
