//! Harbor persistence layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! key-value store the managers persist through.
//!
//! # Usage
//!
//! ```no_run
//! use harbor::database::{Database, KeyValueStore, SqliteStore};
//!
//! let store = SqliteStore::new(Database::open("harbor.db").expect("failed to open database"));
//! store.set("harbor.scratch_note", "\"hello\"").expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore, SqliteStore};
