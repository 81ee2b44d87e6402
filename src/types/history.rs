use serde::{Deserialize, Serialize};

/// A single entry in the browsing log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub timestamp: u64,
}
