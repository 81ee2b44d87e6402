use serde::{Deserialize, Serialize};

/// Represents a saved bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    pub timestamp: u64,
}
