//! SQLite connection management for Harbor.
//!
//! A [`Database`] owns the single connection the key-value store writes
//! through. Opening one always brings the schema up to
//! [`CURRENT_SCHEMA_VERSION`](super::migrations::CURRENT_SCHEMA_VERSION).

use std::path::Path;

use log::debug;
use rusqlite::Connection;

use super::migrations;

/// Owns the SQLite connection backing the key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the browser state file at `path`, creating it when missing.
    ///
    /// # Arguments
    /// * `path` - Location of the state file, usually under the profile directory.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        debug!("opening state database at {}", path.as_ref().display());
        Self::migrated(Connection::open(path)?)
    }

    /// Opens a throwaway database; nothing outlives the returned value.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if SQLite cannot allocate the database or a
    /// migration fails.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in the file; 0 means no migration has run.
    pub fn schema_version(&self) -> i32 {
        migrations::get_schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
