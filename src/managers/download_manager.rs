//! Download Manager for Harbor.
//!
//! Tracks download metadata only; no bytes are fetched or stored here.

use std::sync::Arc;

use log::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::services::clock::Clock;
use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;

/// Trait defining download bookkeeping operations.
pub trait DownloadManagerTrait {
    fn start_download(&mut self, url: &str, size: Option<u64>) -> Result<String, DownloadError>;
    fn update_progress(&mut self, id: &str, downloaded: u64) -> Result<(), DownloadError>;
    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError>;
    fn remove_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn clear_finished(&mut self) -> usize;
    fn list_downloads(&self) -> Vec<&DownloadItem>;
    fn get_download(&self, id: &str) -> Option<&DownloadItem>;
}

/// Filename from the last non-empty path segment, or `download`.
pub fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| "download".to_string())
}

pub struct DownloadManager {
    clock: Arc<dyn Clock>,
    downloads: Vec<DownloadItem>,
}

impl DownloadManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            downloads: Vec::new(),
        }
    }

    fn find_active_mut(&mut self, id: &str) -> Result<&mut DownloadItem, DownloadError> {
        let item = self
            .downloads
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))?;
        if item.status.is_finished() {
            return Err(DownloadError::AlreadyFinished(id.to_string()));
        }
        Ok(item)
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn start_download(&mut self, url: &str, size: Option<u64>) -> Result<String, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DownloadError::InvalidUrl(url.to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.downloads.push(DownloadItem {
            id: id.clone(),
            url: url.to_string(),
            filename: filename_from_url(&parsed),
            size,
            downloaded: 0,
            status: DownloadStatus::InProgress,
            started_at: self.clock.now_millis(),
            completed_at: None,
        });
        info!("download started: {}", url);
        Ok(id)
    }

    fn update_progress(&mut self, id: &str, downloaded: u64) -> Result<(), DownloadError> {
        let item = self.find_active_mut(id)?;
        item.downloaded = match item.size {
            Some(size) => downloaded.min(size),
            None => downloaded,
        };
        Ok(())
    }

    fn complete_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let now = self.clock.now_millis();
        let item = self.find_active_mut(id)?;
        if let Some(size) = item.size {
            item.downloaded = size;
        }
        item.status = DownloadStatus::Completed;
        item.completed_at = Some(now);
        Ok(())
    }

    fn fail_download(&mut self, id: &str, reason: &str) -> Result<(), DownloadError> {
        let now = self.clock.now_millis();
        let item = self.find_active_mut(id)?;
        item.status = DownloadStatus::Failed(reason.to_string());
        item.completed_at = Some(now);
        warn!("download {} failed: {}", id, reason);
        Ok(())
    }

    fn remove_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let idx = self
            .downloads
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))?;
        self.downloads.remove(idx);
        Ok(())
    }

    fn clear_finished(&mut self) -> usize {
        let before = self.downloads.len();
        self.downloads.retain(|d| !d.status.is_finished());
        before - self.downloads.len()
    }

    /// Newest first.
    fn list_downloads(&self) -> Vec<&DownloadItem> {
        self.downloads.iter().rev().collect()
    }

    fn get_download(&self, id: &str) -> Option<&DownloadItem> {
        self.downloads.iter().find(|d| d.id == id)
    }
}
