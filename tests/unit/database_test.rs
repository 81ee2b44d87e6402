//! Unit tests for the SQLite-backed key-value store.

use harbor::database::migrations::CURRENT_SCHEMA_VERSION;
use harbor::database::{Database, KeyValueStore, SqliteStore};
use tempfile::TempDir;

#[test]
fn test_open_in_memory_runs_migrations() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.schema_version(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_set_get_remove() {
    let store = SqliteStore::new(Database::open_in_memory().unwrap());
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "\"v1\"").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("\"v1\""));

    store.set("k", "\"v2\"").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("\"v2\""));

    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    store.remove("k").unwrap();
}

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("harbor.db");
    {
        let store = SqliteStore::new(Database::open(&path).unwrap());
        store.set("harbor.scratch_note", "\"draft\"").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version(), CURRENT_SCHEMA_VERSION);
    let store = SqliteStore::new(db);
    assert_eq!(store.get("harbor.scratch_note").unwrap().as_deref(), Some("\"draft\""));
}

#[test]
fn test_migrations_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.db");
    Database::open(&path).unwrap();
    let db = Database::open(&path).unwrap();
    let rows: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, i64::from(CURRENT_SCHEMA_VERSION));
}
