//! Persistent key-value store.
//!
//! Settings and libraries are stored as JSON text under fixed keys. Absence
//! of a key means "use the default"; there is no schema migration for values.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::connection::Database;
use crate::types::errors::StoreError;

pub const SETTINGS_KEY: &str = "harbor.settings";
pub const HISTORY_KEY: &str = "harbor.history";
pub const BOOKMARKS_KEY: &str = "harbor.bookmarks";
pub const NOTES_KEY: &str = "harbor.notes";
pub const SCRATCH_NOTE_KEY: &str = "harbor.scratch_note";
pub const SITE_PERMISSIONS_KEY: &str = "harbor.site_permissions";

/// Raw string storage keyed by fixed keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and deserializes `key`, returning `None` when it is absent.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

/// Like [`load_json`], but a missing or malformed value yields the default.
pub fn load_json_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("discarding stored value: {}", e);
            T::default()
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)
        .map_err(|e| StoreError::Serialization(format!("{}: {}", key, e)))?;
    store.set(key, &json)
}

/// SQLite-backed store using the `kv` table.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db.connection().execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Self::now()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.db
            .connection()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Volatile store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
