//! Store trait and backend selection

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{FileStore, MemoryStore, SqliteStore, StoreError};

/// Raw key-value storage port
///
/// Values are opaque strings (JSON text in practice). Each key is independent:
/// there are no transactions spanning keys and no expiry.
pub trait Store: Send + Sync {
    /// Read the value at `key`, `None` if absent
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key`, replacing any previous value
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`; returns whether it existed
    fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One JSON file per key
    #[default]
    File,
    /// Single SQLite database
    Sqlite,
    /// Process memory only (nothing survives exit)
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Open a store for the given backend rooted at `path`
///
/// For [`Backend::Sqlite`] the database file is `{path}/keystore.db`.
pub fn open(backend: Backend, path: impl AsRef<Path>) -> Result<Arc<dyn Store>, StoreError> {
    let path = path.as_ref();
    debug!("open: backend={} path={}", backend, path.display());
    match backend {
        Backend::File => Ok(Arc::new(FileStore::open(path)?)),
        Backend::Sqlite => {
            std::fs::create_dir_all(path)?;
            Ok(Arc::new(SqliteStore::open(path.join(crate::SQLITE_FILE))?))
        }
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
