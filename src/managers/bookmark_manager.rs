//! Bookmark Manager for Harbor.
//!
//! Implements `BookmarkManagerTrait`, persisted through the key-value store.

use std::rc::Rc;
use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::database::kv_store::{load_json_or_default, save_json, KeyValueStore, BOOKMARKS_KEY};
use crate::services::clock::Clock;
use crate::services::url_normalizer::is_internal;
use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<String, BookmarkError>;
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError>;
    fn update_bookmark(&mut self, id: &str, url: Option<&str>, title: Option<&str>) -> Result<(), BookmarkError>;
    fn toggle_bookmark(&mut self, url: &str, title: &str) -> Result<bool, BookmarkError>;
    fn is_bookmarked(&self, url: &str) -> bool;
    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark>;
    fn list_bookmarks(&self) -> Vec<&Bookmark>;
}

pub struct BookmarkManager {
    store: Rc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let bookmarks: Vec<Bookmark> = load_json_or_default(store.as_ref(), BOOKMARKS_KEY);
        Self {
            store,
            clock,
            bookmarks,
        }
    }

    fn persist(&self) -> Result<(), BookmarkError> {
        save_json(self.store.as_ref(), BOOKMARKS_KEY, &self.bookmarks)?;
        Ok(())
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Bookmark, BookmarkError> {
        self.bookmarks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    /// Adds a bookmark. Internal pages and duplicate URLs are rejected.
    fn add_bookmark(&mut self, url: &str, title: &str) -> Result<String, BookmarkError> {
        if is_internal(url) {
            return Err(BookmarkError::InternalUrl(url.to_string()));
        }
        if self.is_bookmarked(url) {
            return Err(BookmarkError::DuplicateUrl(url.to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.bookmarks.push(Bookmark {
            id: id.clone(),
            url: url.to_string(),
            title: title.to_string(),
            timestamp: self.clock.now_millis(),
        });
        self.persist()?;
        info!("bookmarked {}", url);
        Ok(id)
    }

    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        let idx = self
            .bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
        self.bookmarks.remove(idx);
        self.persist()
    }

    fn update_bookmark(&mut self, id: &str, url: Option<&str>, title: Option<&str>) -> Result<(), BookmarkError> {
        if let Some(new_url) = url {
            if is_internal(new_url) {
                return Err(BookmarkError::InternalUrl(new_url.to_string()));
            }
            if self.bookmarks.iter().any(|b| b.url == new_url && b.id != id) {
                return Err(BookmarkError::DuplicateUrl(new_url.to_string()));
            }
        }
        let bookmark = self.find_mut(id)?;
        if let Some(new_url) = url {
            bookmark.url = new_url.to_string();
        }
        if let Some(new_title) = title {
            bookmark.title = new_title.to_string();
        }
        self.persist()
    }

    /// Adds or removes the bookmark for `url`. Returns whether it is now bookmarked.
    fn toggle_bookmark(&mut self, url: &str, title: &str) -> Result<bool, BookmarkError> {
        match self.bookmarks.iter().position(|b| b.url == url) {
            Some(idx) => {
                self.bookmarks.remove(idx);
                self.persist()?;
                Ok(false)
            }
            None => {
                self.add_bookmark(url, title)?;
                Ok(true)
            }
        }
    }

    fn is_bookmarked(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    fn search_bookmarks(&self, query: &str) -> Vec<&Bookmark> {
        let needle = query.trim().to_lowercase();
        self.bookmarks
            .iter()
            .rev()
            .filter(|b| b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle))
            .collect()
    }

    /// Newest first.
    fn list_bookmarks(&self) -> Vec<&Bookmark> {
        self.bookmarks.iter().rev().collect()
    }
}
