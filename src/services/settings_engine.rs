// Harbor Settings Engine
// Loads, saves and updates browser settings stored as JSON under a fixed key
// in the key-value store. Toggles go through the closed `SettingToggle` set.

use std::rc::Rc;

use log::info;

use super::url_normalizer::SearchEngine;
use crate::database::kv_store::{load_json, save_json, KeyValueStore, SETTINGS_KEY};
use crate::managers::tab_manager::NavigationConfig;
use crate::types::errors::SettingsError;
use crate::types::settings::{BrowserSettings, SettingToggle};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn toggle(&mut self, toggle: SettingToggle) -> Result<bool, SettingsError>;
    fn set_flag(&mut self, toggle: SettingToggle, value: bool) -> Result<(), SettingsError>;
    fn is_enabled(&self, toggle: SettingToggle) -> bool;
    fn set_search_engine(&mut self, engine_id: &str) -> Result<(), SettingsError>;
    fn set_language(&mut self, language: &str) -> Result<(), SettingsError>;
    fn set_hibernate_after_minutes(&mut self, minutes: u32) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn navigation_config(&self) -> NavigationConfig;
}

/// Settings engine persisting through a [`KeyValueStore`].
pub struct SettingsEngine {
    store: Rc<dyn KeyValueStore>,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// Creates an engine holding defaults; call `load` to read the store.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            settings: BrowserSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings. An absent key yields defaults; a malformed value is an error
    /// and leaves the in-memory settings untouched.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        self.settings = load_json(self.store.as_ref(), SETTINGS_KEY)?.unwrap_or_default();
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        save_json(self.store.as_ref(), SETTINGS_KEY, &self.settings)?;
        Ok(())
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Flips a flag, saves, and returns the new value.
    fn toggle(&mut self, toggle: SettingToggle) -> Result<bool, SettingsError> {
        let flag = self.settings.flag_mut(toggle);
        *flag = !*flag;
        let value = *flag;
        self.save()?;
        info!("setting {:?} -> {}", toggle, value);
        Ok(value)
    }

    fn set_flag(&mut self, toggle: SettingToggle, value: bool) -> Result<(), SettingsError> {
        *self.settings.flag_mut(toggle) = value;
        self.save()
    }

    fn is_enabled(&self, toggle: SettingToggle) -> bool {
        self.settings.flag(toggle)
    }

    fn set_search_engine(&mut self, engine_id: &str) -> Result<(), SettingsError> {
        let engine = SearchEngine::ALL
            .into_iter()
            .find(|e| e.id().eq_ignore_ascii_case(engine_id.trim()))
            .ok_or_else(|| SettingsError::InvalidValue(format!("Unknown search engine '{}'", engine_id)))?;
        self.settings.general.search_engine = engine.id().to_string();
        self.save()
    }

    fn set_language(&mut self, language: &str) -> Result<(), SettingsError> {
        let language = language.trim();
        if language.is_empty() {
            return Err(SettingsError::InvalidValue("Language cannot be empty".to_string()));
        }
        self.settings.general.language = language.to_string();
        self.save()
    }

    fn set_hibernate_after_minutes(&mut self, minutes: u32) -> Result<(), SettingsError> {
        if minutes == 0 {
            return Err(SettingsError::InvalidValue(
                "Hibernation delay must be at least one minute".to_string(),
            ));
        }
        self.settings.performance.hibernate_after_minutes = minutes;
        self.save()
    }

    /// Resets all settings to factory defaults and saves.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BrowserSettings::default();
        self.save()
    }

    fn navigation_config(&self) -> NavigationConfig {
        NavigationConfig {
            search_engine: self.settings.general.search_engine.clone(),
            https_only: self.settings.privacy.https_only,
            hibernation_enabled: self.settings.performance.hibernate_inactive_tabs,
            hibernate_after_ms: u64::from(self.settings.performance.hibernate_after_minutes) * 60 * 1000,
            ..NavigationConfig::default()
        }
    }
}
