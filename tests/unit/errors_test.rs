//! Display output of the error types.

use harbor::types::errors::*;
use rstest::rstest;

#[rstest]
#[case(TabError::NotFound("t1".into()).to_string(), "Tab not found: t1")]
#[case(TabError::GroupNotFound("g1".into()).to_string(), "Tab group not found: g1")]
#[case(StoreError::Database("locked".into()).to_string(), "Store database error: locked")]
#[case(StoreError::Serialization("bad".into()).to_string(), "Store serialization error: bad")]
#[case(SettingsError::InvalidValue("x".into()).to_string(), "Invalid settings value: x")]
#[case(BookmarkError::DuplicateUrl("u".into()).to_string(), "Duplicate bookmark URL: u")]
#[case(BookmarkError::InternalUrl("harbor://home".into()).to_string(), "Cannot bookmark internal page: harbor://home")]
#[case(HistoryError::NotFound("h".into()).to_string(), "History entry not found: h")]
#[case(NoteError::EmptyScratch.to_string(), "Scratch note is empty")]
#[case(DownloadError::AlreadyFinished("d".into()).to_string(), "Download already finished: d")]
#[case(DownloadError::InvalidUrl("ftp://x".into()).to_string(), "Invalid download URL: ftp://x")]
#[case(PermissionError::InvalidSite(" ".into()).to_string(), "Invalid site:  ")]
#[case(SnapshotError::Status(404).to_string(), "Snapshot HTTP status: 404")]
fn test_display(#[case] actual: String, #[case] expected: &str) {
    assert_eq!(actual, expected);
}

#[test]
fn test_store_error_conversions() {
    let settings: SettingsError = StoreError::Serialization("s".into()).into();
    assert!(matches!(settings, SettingsError::Serialization(m) if m == "s"));

    let settings: SettingsError = StoreError::Database("d".into()).into();
    assert!(matches!(settings, SettingsError::Store(m) if m == "d"));

    let bookmark: BookmarkError = StoreError::Database("d".into()).into();
    assert_eq!(bookmark.to_string(), "Bookmark store error: Store database error: d");

    let note: NoteError = StoreError::Database("d".into()).into();
    assert!(matches!(note, NoteError::Store(_)));
}

#[test]
fn test_rusqlite_error_converts() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Database(_)));
}

#[test]
fn test_errors_are_std_errors() {
    let boxed: Box<dyn std::error::Error> = Box::new(TabError::NotFound("t".into()));
    assert_eq!(boxed.to_string(), "Tab not found: t");
}
