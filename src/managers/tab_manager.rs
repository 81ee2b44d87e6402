//! Tab Store: the navigation core.
//!
//! Owns every tab and its synthetic history stack, the active-tab pointer,
//! tab groups, the view router and the hibernation schedule. The tab list is
//! never empty and the active id always resolves to a member of it.

use std::sync::Arc;

use log::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::hibernation::HibernationSchedule;
use super::tab_groups::TabGroupStore;
use super::view_router::ViewRouter;
use crate::services::clock::{Clock, SystemClock};
use crate::services::translation;
use crate::services::url_normalizer::{
    is_internal, normalize, SearchEngine, HOME_URL, INTERNAL_SCHEME,
};
use crate::types::errors::TabError;
use crate::types::tab::{GroupColor, InternalNavigation, NavigateOptions, Tab, TabGroup};
use crate::types::view::ViewMode;

pub const DEFAULT_HIBERNATE_AFTER_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 60 * 1000;

/// Settings the navigation core needs, handed in at construction and
/// re-applied whenever settings change.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationConfig {
    pub search_engine: String,
    pub https_only: bool,
    pub hibernation_enabled: bool,
    pub hibernate_after_ms: u64,
    pub sweep_interval_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            search_engine: SearchEngine::default().id().to_string(),
            https_only: false,
            hibernation_enabled: true,
            hibernate_after_ms: DEFAULT_HIBERNATE_AFTER_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

/// Trait defining the navigation operations of the tab store.
pub trait TabManagerTrait {
    fn create_tab(&mut self, is_private: bool, group_id: Option<&str>) -> String;
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn navigate_tab(&mut self, raw_input: Option<&str>, options: NavigateOptions) -> String;
    fn handle_internal_navigate(&mut self, reported_url: &str) -> InternalNavigation;
    fn reload_tab(&mut self);
    fn go_back(&mut self) -> bool;
    fn go_forward(&mut self) -> bool;
    fn mark_loaded(&mut self, tab_id: &str, reported_url: Option<&str>) -> bool;
    fn toggle_pin_tab(&mut self, tab_id: &str) -> Result<bool, TabError>;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn active_tab(&self) -> &Tab;
    fn tabs(&self) -> &[Tab];
    fn tab_count(&self) -> usize;
}

/// In-memory tab store.
pub struct TabManager {
    tabs: Vec<Tab>,
    groups: TabGroupStore,
    active_tab_id: String,
    router: ViewRouter,
    config: NavigationConfig,
    clock: Arc<dyn Clock>,
    schedule: HibernationSchedule,
}

impl TabManager {
    /// Creates a store holding a single fresh home tab.
    pub fn new(config: NavigationConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_millis();
        let schedule = HibernationSchedule::new(config.sweep_interval_ms, now);
        let mut manager = Self {
            tabs: Vec::new(),
            groups: TabGroupStore::new(),
            active_tab_id: String::new(),
            router: ViewRouter::new(),
            config,
            clock,
            schedule,
        };
        let first = manager.new_tab_record(false, None);
        manager.active_tab_id = first.id.clone();
        manager.tabs.push(first);
        manager
    }

    pub fn with_system_clock(config: NavigationConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Replaces the navigation config; later navigations use the new values.
    pub fn apply_config(&mut self, config: NavigationConfig) {
        self.schedule.set_interval(config.sweep_interval_ms);
        self.config = config;
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut ViewRouter {
        &mut self.router
    }

    pub fn active_tab_id(&self) -> &str {
        &self.active_tab_id
    }

    /// Tabs with pinned ones first; relative order is otherwise preserved.
    pub fn ordered_tabs(&self) -> Vec<&Tab> {
        let pinned = self.tabs.iter().filter(|t| t.pinned);
        let unpinned = self.tabs.iter().filter(|t| !t.pinned);
        pinned.chain(unpinned).collect()
    }

    /// Wraps the active page in the translation proxy for `lang`.
    /// Returns the new URL, or `None` for internal pages.
    pub fn translate_active_tab(&mut self, lang: &str) -> Option<String> {
        let current = self.active_tab().url.clone();
        if is_internal(&current) {
            return None;
        }
        let wrapped = translation::wrap(&original_of(&current), lang);
        Some(self.navigate_tab(Some(&wrapped), NavigateOptions { is_translation: true }))
    }

    /// Navigates a translated tab back to the page it was translating.
    pub fn revert_translation(&mut self) -> Option<String> {
        let tab = self.active_tab();
        if !tab.is_translated {
            return None;
        }
        let original = tab.original_url.clone()?;
        Some(self.navigate_tab(Some(&original), NavigateOptions::default()))
    }

    // --- tab groups ---

    pub fn groups(&self) -> &[TabGroup] {
        self.groups.groups()
    }

    pub fn create_group(&mut self, title: &str, color: GroupColor) -> String {
        let now = self.clock.now_millis();
        self.groups.create(title, color, now)
    }

    pub fn update_group(
        &mut self,
        group_id: &str,
        title: Option<&str>,
        color: Option<GroupColor>,
    ) -> Result<(), TabError> {
        self.groups.update(group_id, title, color)
    }

    /// Deletes a group. Its tabs stay open and become ungrouped.
    pub fn delete_group(&mut self, group_id: &str) -> Result<(), TabError> {
        self.groups.remove(group_id)?;
        for tab in self.tabs.iter_mut() {
            if tab.group_id.as_deref() == Some(group_id) {
                tab.group_id = None;
            }
        }
        Ok(())
    }

    pub fn assign_tab_to_group(&mut self, tab_id: &str, group_id: &str) -> Result<(), TabError> {
        if !self.groups.contains(group_id) {
            return Err(TabError::GroupNotFound(group_id.to_string()));
        }
        let tab = self.find_tab_mut(tab_id)?;
        tab.group_id = Some(group_id.to_string());
        Ok(())
    }

    pub fn remove_tab_from_group(&mut self, tab_id: &str) -> Result<(), TabError> {
        self.find_tab_mut(tab_id)?.group_id = None;
        Ok(())
    }

    pub fn tabs_in_group(&self, group_id: &str) -> Vec<&Tab> {
        self.tabs
            .iter()
            .filter(|t| t.group_id.as_deref() == Some(group_id))
            .collect()
    }

    // --- hibernation ---

    /// Runs the hibernation sweep if the sweep interval has elapsed.
    /// Returns how many tabs went to sleep.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_millis();
        if !self.schedule.is_due(now) {
            return 0;
        }
        self.schedule.mark_run(now);
        self.sweep_hibernation()
    }

    /// Marks inactive tabs untouched for longer than the threshold as hibernating.
    pub fn sweep_hibernation(&mut self) -> usize {
        if !self.config.hibernation_enabled {
            return 0;
        }
        let now = self.clock.now_millis();
        let threshold = self.config.hibernate_after_ms;
        let mut count = 0;
        for tab in self.tabs.iter_mut() {
            if tab.id == self.active_tab_id || tab.is_hibernating {
                continue;
            }
            if now.saturating_sub(tab.last_accessed) > threshold {
                tab.is_hibernating = true;
                count += 1;
            }
        }
        if count > 0 {
            debug!("hibernated {} inactive tab(s)", count);
        }
        count
    }

    // --- internals ---

    fn new_tab_record(&self, is_private: bool, group_id: Option<String>) -> Tab {
        let now = self.clock.now_millis();
        Tab {
            id: Uuid::new_v4().to_string(),
            url: HOME_URL.to_string(),
            title: derive_title(HOME_URL),
            history: vec![HOME_URL.to_string()],
            current_index: 0,
            is_loading: false,
            is_private,
            is_hibernating: false,
            pinned: false,
            group_id,
            render_id: 0,
            is_translated: false,
            original_url: None,
            last_accessed: now,
            created_at: now,
        }
    }

    fn find_tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    fn active_index(&self) -> usize {
        let idx = self.tabs.iter().position(|t| t.id == self.active_tab_id);
        debug_assert!(idx.is_some(), "active tab id must resolve to a tab");
        idx.unwrap_or(self.tabs.len() - 1)
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        let idx = self.active_index();
        &mut self.tabs[idx]
    }

    /// Activates `tab_id`, waking it and stamping both it and the tab being
    /// left with the current time.
    fn activate(&mut self, tab_id: &str) {
        let now = self.clock.now_millis();
        let previous = std::mem::replace(&mut self.active_tab_id, tab_id.to_string());
        for tab in self.tabs.iter_mut() {
            if tab.id == tab_id {
                tab.is_hibernating = false;
                tab.last_accessed = now;
            } else if tab.id == previous {
                tab.last_accessed = now;
            }
        }
    }
}

impl TabManagerTrait for TabManager {
    /// Appends a new home tab, activates it and shows the browser view.
    fn create_tab(&mut self, is_private: bool, group_id: Option<&str>) -> String {
        let group_id = match group_id {
            Some(gid) if self.groups.contains(gid) => Some(gid.to_string()),
            Some(gid) => {
                warn!("ignoring unknown group {} for new tab", gid);
                None
            }
            None => None,
        };
        let tab = self.new_tab_record(is_private, group_id);
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.activate(&id);
        self.router.navigate_to(ViewMode::Browser);
        info!("created tab {} (private: {})", id, is_private);
        id
    }

    /// Closes a tab. Closing the active tab activates the last tab in the
    /// list; closing the only tab replaces it with a fresh home tab.
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        let idx = self
            .tabs
            .iter()
            .position(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        let was_active = self.active_tab_id == tab_id;
        self.tabs.remove(idx);
        info!("closed tab {}", tab_id);

        if self.tabs.is_empty() {
            let fresh = self.new_tab_record(false, None);
            self.active_tab_id = fresh.id.clone();
            self.tabs.push(fresh);
            return Ok(());
        }

        if was_active {
            let last = self.tabs[self.tabs.len() - 1].id.clone();
            self.activate(&last);
        }
        Ok(())
    }

    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if !self.tabs.iter().any(|t| t.id == tab_id) {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.activate(tab_id);
        Ok(())
    }

    /// Navigates the active tab. Forward entries past the current index are
    /// discarded. `render_id` is left alone so the live frame survives.
    fn navigate_tab(&mut self, raw_input: Option<&str>, options: NavigateOptions) -> String {
        let url = normalize(raw_input, &self.config.search_engine, self.config.https_only);
        let now = self.clock.now_millis();
        let tab = self.active_tab_mut();
        push_entry(tab, &url);
        tab.is_loading = true;
        tab.is_hibernating = false;
        tab.last_accessed = now;
        if options.is_translation {
            tab.is_translated = true;
            tab.original_url = Some(original_of(&url));
        } else {
            derive_translation_state(tab);
        }
        debug!("tab {} -> {}", tab.id, url);
        url
    }

    /// Folds a URL reported by the content frame back into the active tab.
    fn handle_internal_navigate(&mut self, reported_url: &str) -> InternalNavigation {
        let reported = reported_url.trim();
        if reported.is_empty()
            || is_internal(reported)
            || reported.to_ascii_lowercase().starts_with("about:")
        {
            return InternalNavigation::Ignored;
        }

        let tab = self.active_tab_mut();
        if tab.url == reported {
            return InternalNavigation::Unchanged;
        }

        if tab.current_index > 0 && tab.history[tab.current_index - 1] == reported {
            tab.current_index -= 1;
            tab.url = reported.to_string();
            tab.title = derive_title(reported);
            derive_translation_state(tab);
            debug!("tab {} implicit back to {}", tab.id, reported);
            return InternalNavigation::ImplicitBack;
        }

        // Loading and hibernation stay as they are: the frame is already
        // showing this page and its own load event settles `is_loading`.
        push_entry(tab, reported);
        derive_translation_state(tab);
        debug!("tab {} in-frame navigation to {}", tab.id, reported);
        InternalNavigation::Forward
    }

    /// Hard refresh: the only ordinary path that remounts the content frame.
    fn reload_tab(&mut self) {
        let tab = self.active_tab_mut();
        tab.is_loading = true;
        tab.render_id += 1;
    }

    fn go_back(&mut self) -> bool {
        let tab = self.active_tab_mut();
        if tab.current_index == 0 {
            return false;
        }
        let target = tab.current_index - 1;
        jump_to(tab, target);
        true
    }

    fn go_forward(&mut self) -> bool {
        let tab = self.active_tab_mut();
        if tab.current_index + 1 >= tab.history.len() {
            return false;
        }
        let target = tab.current_index + 1;
        jump_to(tab, target);
        true
    }

    /// Clears the loading flag. A load for a URL the tab has since moved away
    /// from is stale and ignored.
    fn mark_loaded(&mut self, tab_id: &str, reported_url: Option<&str>) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == tab_id) else {
            debug!("load event for closed tab {}", tab_id);
            return false;
        };
        if let Some(url) = reported_url {
            if url != tab.url {
                debug!("stale load event for {} on tab {}", url, tab_id);
                return false;
            }
        }
        tab.is_loading = false;
        true
    }

    fn toggle_pin_tab(&mut self, tab_id: &str) -> Result<bool, TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.pinned = !tab.pinned;
        Ok(tab.pinned)
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_index()]
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

/// Truncates forward entries and appends `url` as the new tip.
fn push_entry(tab: &mut Tab, url: &str) {
    tab.history.truncate(tab.current_index + 1);
    tab.history.push(url.to_string());
    tab.current_index = tab.history.len() - 1;
    tab.url = url.to_string();
    tab.title = derive_title(url);
}

/// Moves within existing history; always remounts the frame.
fn jump_to(tab: &mut Tab, index: usize) {
    tab.current_index = index;
    tab.url = tab.history[index].clone();
    tab.title = derive_title(&tab.url);
    tab.is_loading = true;
    tab.render_id += 1;
    derive_translation_state(tab);
}

fn derive_translation_state(tab: &mut Tab) {
    if translation::is_wrapped(&tab.url) {
        tab.is_translated = true;
        tab.original_url = Some(original_of(&tab.url));
    } else {
        tab.is_translated = false;
        tab.original_url = None;
    }
}

/// Peels every translation layer off `url`.
fn original_of(url: &str) -> String {
    let mut current = url.to_string();
    while translation::is_wrapped(&current) {
        let inner = translation::unwrap(&current);
        if inner == current {
            break;
        }
        current = inner;
    }
    current
}

/// Display label derived from the URL alone.
pub fn derive_title(url: &str) -> String {
    if url == HOME_URL {
        return "New Tab".to_string();
    }
    if is_internal(url) {
        let page = url[INTERNAL_SCHEME.len()..]
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        let mut chars = page.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "New Tab".to_string(),
        };
    }
    if translation::is_wrapped(url) {
        let inner = translation::unwrap(url);
        if inner != url {
            return derive_title(&inner);
        }
    }
    if let Some(query) = SearchEngine::extract_query(url) {
        return query;
    }
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}
