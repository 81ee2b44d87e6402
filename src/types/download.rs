use serde::{Deserialize, Serialize};

/// Status of a download record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DownloadStatus {
    InProgress,
    Completed,
    Failed(String),
}

impl DownloadStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, DownloadStatus::InProgress)
    }
}

/// Metadata for a download. No bytes are held here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadItem {
    pub id: String,
    pub url: String,
    pub filename: String,
    pub size: Option<u64>,
    pub downloaded: u64,
    pub status: DownloadStatus,
    pub started_at: u64,
    pub completed_at: Option<u64>,
}
