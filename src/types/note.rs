use serde::{Deserialize, Serialize};

/// A user note, optionally tied to the page it was written on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source_url: Option<String>,
    pub created_at: u64,
    pub updated_at: u64,
}
