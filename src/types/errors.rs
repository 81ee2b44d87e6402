use thiserror::Error;

// === TabError ===

/// Errors related to tab and tab group operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    NotFound(String),
    /// Tab group with the given ID was not found.
    #[error("Tab group not found: {0}")]
    GroupNotFound(String),
}

// === StoreError ===

/// Errors raised by the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying SQLite operation failed.
    #[error("Store database error: {0}")]
    Database(String),
    /// A stored value could not be (de)serialized.
    #[error("Store serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to loading and saving browser settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The persisted settings value is malformed.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// Reading or writing the store failed.
    #[error("Settings store error: {0}")]
    Store(String),
    /// The provided value is not valid for the setting.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

impl From<StoreError> for SettingsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Serialization(msg) => SettingsError::Serialization(msg),
            StoreError::Database(msg) => SettingsError::Store(msg),
        }
    }
}

// === BookmarkError ===

/// Errors related to bookmark management operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// A bookmark with the same URL already exists.
    #[error("Duplicate bookmark URL: {0}")]
    DuplicateUrl(String),
    /// Internal pages cannot be bookmarked.
    #[error("Cannot bookmark internal page: {0}")]
    InternalUrl(String),
    /// Persisting the bookmark list failed.
    #[error("Bookmark store error: {0}")]
    Store(String),
}

impl From<StoreError> for BookmarkError {
    fn from(e: StoreError) -> Self {
        BookmarkError::Store(e.to_string())
    }
}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    #[error("History entry not found: {0}")]
    NotFound(String),
    /// Persisting the history log failed.
    #[error("History store error: {0}")]
    Store(String),
}

impl From<StoreError> for HistoryError {
    fn from(e: StoreError) -> Self {
        HistoryError::Store(e.to_string())
    }
}

// === NoteError ===

/// Errors related to the notes library.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Note with the given ID was not found.
    #[error("Note not found: {0}")]
    NotFound(String),
    /// The scratch buffer is empty and cannot be promoted.
    #[error("Scratch note is empty")]
    EmptyScratch,
    /// Persisting notes failed.
    #[error("Note store error: {0}")]
    Store(String),
}

impl From<StoreError> for NoteError {
    fn from(e: StoreError) -> Self {
        NoteError::Store(e.to_string())
    }
}

// === DownloadError ===

/// Errors related to download bookkeeping.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    #[error("Download not found: {0}")]
    NotFound(String),
    /// The download has already finished.
    #[error("Download already finished: {0}")]
    AlreadyFinished(String),
    /// The URL cannot be downloaded.
    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),
}

// === PermissionError ===

/// Errors related to per-site permission management.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// The provided URL or host has no usable host component.
    #[error("Invalid site: {0}")]
    InvalidSite(String),
    /// Persisting permissions failed.
    #[error("Permission store error: {0}")]
    Store(String),
}

impl From<StoreError> for PermissionError {
    fn from(e: StoreError) -> Self {
        PermissionError::Store(e.to_string())
    }
}

// === SnapshotError ===

/// Errors raised while fetching a page for offline reading.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The URL is not a fetchable web address.
    #[error("Invalid snapshot URL: {0}")]
    InvalidUrl(String),
    /// The request failed before a response arrived.
    #[error("Snapshot network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("Snapshot HTTP status: {0}")]
    Status(u16),
}
