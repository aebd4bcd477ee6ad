//! KeyStore - JSON key-value persistence
//!
//! A small port for durable key-value state, modeled on browser `localStorage`:
//! every key is independent, values are JSON text, nothing expires.
//!
//! # Architecture
//!
//! ```text
//! JsonStore (typed get/set, in-memory cache)
//!     └── dyn Store (raw string values)
//!         ├── MemoryStore   (optional quota)
//!         ├── FileStore     {dir}/{percent-encoded key}.json
//!         └── SqliteStore   {file}: kv(key, value)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use keystore::{Backend, JsonStore, open};
//!
//! let store = JsonStore::new(open(Backend::File, "/tmp/trips")?);
//! store.set("savedTrips", &trips);
//! let trips: Vec<Trip> = store.get("savedTrips", Vec::new());
//! ```

pub mod cli;
pub mod config;
mod error;
mod file;
mod json;
mod memory;
mod sqlite;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{Backend, Store, open};

/// Default SQLite database file name inside the store directory
pub const SQLITE_FILE: &str = "keystore.db";
