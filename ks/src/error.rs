//! Store error types

use thiserror::Error;

/// Errors raised by a [`crate::Store`] backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Quota exceeded writing '{key}' ({needed} bytes, limit {limit})")]
    QuotaExceeded { key: String, needed: usize, limit: usize },

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    #[error("Store lock poisoned")]
    Poisoned,
}
