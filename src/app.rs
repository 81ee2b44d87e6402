//! App Core for Harbor.
//!
//! Central struct holding the store, settings, the tab store, the content
//! frame adapter and the library managers, and routing shell events between
//! them.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::database::{Database, KeyValueStore, MemoryStore, SqliteStore};
use crate::frame::{ContentFrameAdapter, FrameAttributes, FrameHistory, FramePolicy};
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::download_manager::DownloadManager;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::notes_manager::NotesManager;
use crate::managers::permission_manager::PermissionManager;
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::clock::{Clock, SystemClock};
use crate::services::offline_snapshot::OfflineSnapshot;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::suggestions::{local_suggestions, MAX_SUGGESTIONS};
use crate::types::errors::{BookmarkError, SettingsError, TabError};
use crate::types::settings::SettingToggle;
use crate::types::tab::{InternalNavigation, NavigateOptions};
use crate::types::view::{EntrySource, ViewMode};

/// What the physical back action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// A non-browser screen was closed.
    ViewChanged,
    /// The content frame stepped back in its own history.
    InPage,
    /// The active tab moved back in its synthetic history.
    TabHistory,
    /// A repeated gesture inside the debounce window; nothing happened.
    Ignored,
    /// Nothing left to go back to; the shell decides (close tab, exit).
    Exit,
}

/// Central application struct holding all managers and services.
pub struct App {
    pub store: Rc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub settings_engine: SettingsEngine,
    pub tab_manager: TabManager,
    pub frame_adapter: ContentFrameAdapter,
    pub history_manager: HistoryManager,
    pub bookmark_manager: BookmarkManager,
    pub notes_manager: NotesManager,
    pub download_manager: DownloadManager,
    pub permission_manager: PermissionManager,
    snapshots: HashMap<String, OfflineSnapshot>,
}

impl App {
    /// Opens (or creates) the SQLite store at `db_path` and builds the app on it.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        Ok(Self::with_store(Rc::new(SqliteStore::new(db)), Arc::new(SystemClock)))
    }

    /// An app whose state lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::with_store(Rc::new(MemoryStore::new()), Arc::new(SystemClock))
    }

    /// Builds the app: loads settings once, then hands the derived navigation
    /// config to the tab store.
    pub fn with_store(store: Rc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let mut settings_engine = SettingsEngine::new(store.clone());
        if let Err(e) = settings_engine.load() {
            warn!("using default settings: {}", e);
        }

        let tab_manager = TabManager::new(settings_engine.navigation_config(), clock.clone());
        let mut history_manager = HistoryManager::new(store.clone(), clock.clone());
        history_manager.set_recording_enabled(settings_engine.get_settings().privacy.save_history);

        let mut app = Self {
            settings_engine,
            tab_manager,
            frame_adapter: ContentFrameAdapter::new(clock.clone()),
            history_manager,
            bookmark_manager: BookmarkManager::new(store.clone(), clock.clone()),
            notes_manager: NotesManager::new(store.clone(), clock.clone()),
            download_manager: DownloadManager::new(clock.clone()),
            permission_manager: PermissionManager::new(store.clone()),
            store,
            clock,
            snapshots: HashMap::new(),
        };
        app.sync_frame();
        info!("harbor started with {} tab(s)", app.tab_manager.tab_count());
        app
    }

    // --- navigation ---

    /// Navigates the active tab from address-bar input and logs the visit.
    pub fn navigate(&mut self, raw_input: &str) -> String {
        let url = self.tab_manager.navigate_tab(Some(raw_input), NavigateOptions::default());
        self.record_active_visit();
        self.sync_frame();
        url
    }

    /// The frame reported its own location (link click, redirect, in-page back).
    pub fn on_frame_location(&mut self, url: &str) -> InternalNavigation {
        let outcome = self.tab_manager.handle_internal_navigate(url);
        if outcome == InternalNavigation::Forward {
            self.record_active_visit();
        }
        self.sync_frame();
        outcome
    }

    pub fn on_frame_loaded(&mut self, reported_url: Option<&str>) {
        let active = self.tab_manager.active_tab_id().to_string();
        // A stale load still settles a pending back; anything else is dropped.
        let current = self.tab_manager.mark_loaded(&active, reported_url);
        if !current && !self.frame_adapter.is_back_pending() {
            debug!("ignoring stale load event for tab {}", active);
            return;
        }
        self.frame_adapter.on_load();
    }

    pub fn on_frame_error(&mut self) {
        self.frame_adapter.on_load_error();
    }

    pub fn reload(&mut self) {
        self.tab_manager.reload_tab();
        self.sync_frame();
    }

    /// Resolves the physical back action: close a screen, step back inside
    /// the page, step back in tab history, or report that nothing is left.
    pub fn handle_back(&mut self, frame: &mut dyn FrameHistory) -> BackAction {
        if self.tab_manager.router().mode() != ViewMode::Browser {
            self.tab_manager.router_mut().back();
            return BackAction::ViewChanged;
        }
        if self.frame_adapter.go_back(frame).is_handled() {
            return BackAction::InPage;
        }
        if self.frame_adapter.can_go_back() {
            return BackAction::Ignored;
        }
        if self.tab_manager.go_back() {
            self.sync_frame();
            return BackAction::TabHistory;
        }
        BackAction::Exit
    }

    pub fn go_forward(&mut self) -> bool {
        let moved = self.tab_manager.go_forward();
        if moved {
            self.sync_frame();
        }
        moved
    }

    // --- tabs ---

    pub fn new_tab(&mut self, is_private: bool) -> String {
        let id = self.tab_manager.create_tab(is_private, None);
        self.sync_frame();
        id
    }

    pub fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        self.tab_manager.switch_tab(tab_id)?;
        self.tab_manager.router_mut().navigate_to(ViewMode::Browser);
        self.sync_frame();
        Ok(())
    }

    pub fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        self.tab_manager.close_tab(tab_id)?;
        self.sync_frame();
        Ok(())
    }

    /// Runs the hibernation schedule; call from the shell's timer.
    pub fn tick(&mut self) -> usize {
        self.tab_manager.tick()
    }

    /// Translates the active page into the configured language.
    pub fn translate_active_tab(&mut self) -> Option<String> {
        let lang = self.settings_engine.get_settings().general.language.clone();
        let url = self.tab_manager.translate_active_tab(&lang);
        self.sync_frame();
        url
    }

    pub fn revert_translation(&mut self) -> Option<String> {
        let url = self.tab_manager.revert_translation();
        self.sync_frame();
        url
    }

    // --- content frame ---

    /// Re-keys the adapter to the active tab. Returns true on remount.
    pub fn sync_frame(&mut self) -> bool {
        self.frame_adapter.sync_active_tab(self.tab_manager.active_tab())
    }

    pub fn frame_attributes(&self) -> FrameAttributes {
        let tab = self.tab_manager.active_tab();
        FramePolicy::compute(
            tab,
            self.settings_engine.get_settings(),
            &self.permission_manager,
            self.snapshots.get(&tab.url),
        )
    }

    pub fn save_snapshot(&mut self, snapshot: OfflineSnapshot) {
        self.snapshots.insert(snapshot.url.clone(), snapshot);
    }

    pub fn remove_snapshot(&mut self, url: &str) -> Option<OfflineSnapshot> {
        self.snapshots.remove(url)
    }

    /// Fetches the active page and keeps it for offline reading.
    #[cfg(feature = "network")]
    pub async fn save_active_page_offline(&mut self) -> Result<(), crate::types::errors::SnapshotError> {
        let url = self.tab_manager.active_tab().url.clone();
        let client = reqwest::Client::new();
        let snapshot =
            crate::services::offline_snapshot::fetch_snapshot(&client, &url, self.clock.now_millis()).await?;
        self.save_snapshot(snapshot);
        Ok(())
    }

    // --- libraries ---

    /// Adds or removes a bookmark for the active page. Private tabs never
    /// write bookmarks.
    pub fn toggle_bookmark_active_tab(&mut self) -> Result<bool, BookmarkError> {
        let tab = self.tab_manager.active_tab();
        if tab.is_private {
            debug!("not bookmarking from private tab {}", tab.id);
            return Ok(false);
        }
        let url = tab.original_url.clone().unwrap_or_else(|| tab.url.clone());
        let title = tab.title.clone();
        self.bookmark_manager.toggle_bookmark(&url, &title)
    }

    pub fn suggestions(&self, query: &str) -> Vec<String> {
        if !self.settings_engine.is_enabled(SettingToggle::SearchSuggestions) {
            return Vec::new();
        }
        local_suggestions(
            query,
            &self.history_manager.list_history(),
            &self.bookmark_manager.list_bookmarks(),
            MAX_SUGGESTIONS,
        )
    }

    pub fn open_notes(&mut self, entry: EntrySource) {
        self.tab_manager.router_mut().open_notes(entry);
    }

    // --- settings ---

    pub fn apply_toggle(&mut self, toggle: SettingToggle) -> Result<bool, SettingsError> {
        let value = self.settings_engine.toggle(toggle)?;
        self.apply_settings();
        Ok(value)
    }

    pub fn set_search_engine(&mut self, engine_id: &str) -> Result<(), SettingsError> {
        self.settings_engine.set_search_engine(engine_id)?;
        self.apply_settings();
        Ok(())
    }

    /// Saves settings before the process goes away.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.settings_engine.save() {
            warn!("failed to save settings on shutdown: {}", e);
        }
    }

    fn apply_settings(&mut self) {
        self.tab_manager.apply_config(self.settings_engine.navigation_config());
        self.history_manager
            .set_recording_enabled(self.settings_engine.get_settings().privacy.save_history);
    }

    /// Logs the active tab's page. Translated pages are logged by their original URL.
    fn record_active_visit(&mut self) {
        let tab = self.tab_manager.active_tab();
        let url = tab.original_url.clone().unwrap_or_else(|| tab.url.clone());
        if let Err(e) = self.history_manager.record_visit(&url, &tab.title, tab.is_private) {
            warn!("could not record visit to {}: {}", url, e);
        }
    }
}
