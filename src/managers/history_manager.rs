//! History Manager for Harbor.
//!
//! Implements `HistoryManagerTrait`: recording visits, searching, listing and
//! clearing the browsing log, persisted through the key-value store on every
//! mutation. Private tabs and internal pages are never recorded.

use std::rc::Rc;
use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::database::kv_store::{load_json_or_default, save_json, KeyValueStore, HISTORY_KEY};
use crate::services::clock::Clock;
use crate::services::url_normalizer::is_internal;
use crate::types::errors::HistoryError;
use crate::types::history::HistoryItem;

/// Oldest entries are dropped beyond this many.
pub const MAX_HISTORY_ITEMS: usize = 5_000;

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: &str, is_private: bool) -> Result<Option<String>, HistoryError>;
    fn search_history(&self, query: &str) -> Vec<&HistoryItem>;
    fn list_history(&self) -> Vec<&HistoryItem>;
    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError>;
    fn clear_all(&mut self) -> Result<(), HistoryError>;
    fn is_recording_enabled(&self) -> bool;
    fn set_recording_enabled(&mut self, enabled: bool);
}

/// History log kept in memory, oldest first, and mirrored to the store.
pub struct HistoryManager {
    store: Rc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    items: Vec<HistoryItem>,
    recording_enabled: bool,
}

impl HistoryManager {
    /// Loads the persisted log; a missing or malformed value starts empty.
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let items: Vec<HistoryItem> = load_json_or_default(store.as_ref(), HISTORY_KEY);
        Self {
            store,
            clock,
            items,
            recording_enabled: true,
        }
    }

    fn persist(&self) -> Result<(), HistoryError> {
        save_json(self.store.as_ref(), HISTORY_KEY, &self.items)?;
        Ok(())
    }

    fn is_recordable(url: &str) -> bool {
        let url = url.trim();
        !url.is_empty() && !is_internal(url) && !url.to_ascii_lowercase().starts_with("about:")
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Records a visit and returns the entry id, or `None` when the visit is
    /// not recordable. Revisiting the newest entry refreshes it in place.
    fn record_visit(&mut self, url: &str, title: &str, is_private: bool) -> Result<Option<String>, HistoryError> {
        if !self.recording_enabled || is_private || !Self::is_recordable(url) {
            return Ok(None);
        }

        let now = self.clock.now_millis();
        if let Some(last) = self.items.last_mut() {
            if last.url == url {
                last.timestamp = now;
                last.title = title.to_string();
                let id = last.id.clone();
                self.persist()?;
                return Ok(Some(id));
            }
        }

        let id = Uuid::new_v4().to_string();
        self.items.push(HistoryItem {
            id: id.clone(),
            url: url.to_string(),
            title: title.to_string(),
            timestamp: now,
        });
        if self.items.len() > MAX_HISTORY_ITEMS {
            let excess = self.items.len() - MAX_HISTORY_ITEMS;
            self.items.drain(..excess);
        }
        self.persist()?;
        debug!("recorded visit {}", url);
        Ok(Some(id))
    }

    /// Case-insensitive match on title or URL, newest first.
    fn search_history(&self, query: &str) -> Vec<&HistoryItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .rev()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle) || item.url.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn list_history(&self) -> Vec<&HistoryItem> {
        self.items.iter().rev().collect()
    }

    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        self.items.remove(idx);
        self.persist()
    }

    fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.items.clear();
        self.persist()
    }

    fn is_recording_enabled(&self) -> bool {
        self.recording_enabled
    }

    fn set_recording_enabled(&mut self, enabled: bool) {
        self.recording_enabled = enabled;
    }
}
