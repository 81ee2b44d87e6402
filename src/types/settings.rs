use serde::{Deserialize, Serialize};

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub privacy: PrivacySettings,
    pub permissions: PermissionDefaults,
    pub performance: PerformanceSettings,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            privacy: PrivacySettings::default(),
            permissions: PermissionDefaults::default(),
            performance: PerformanceSettings::default(),
        }
    }
}

/// General browser settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Search engine id, resolved through `SearchEngine::from_id`.
    pub search_engine: String,
    /// BCP 47 tag used as the translation target.
    pub language: String,
    #[serde(default = "default_true")]
    pub search_suggestions: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            search_engine: "google".to_string(),
            language: "en".to_string(),
            search_suggestions: true,
        }
    }
}

/// Shields and data-handling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrivacySettings {
    pub https_only: bool,
    pub block_trackers: bool,
    pub block_ads: bool,
    pub data_saver: bool,
    pub save_history: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            https_only: true,
            block_trackers: true,
            block_ads: true,
            data_saver: false,
            save_history: true,
        }
    }
}

/// Global capability defaults; per-site decisions override these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionDefaults {
    pub javascript: bool,
    pub popups: bool,
    pub camera: bool,
    pub microphone: bool,
    pub geolocation: bool,
    pub autoplay: bool,
    #[serde(default = "default_true")]
    pub clipboard: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PermissionDefaults {
    fn default() -> Self {
        Self {
            javascript: true,
            popups: false,
            camera: false,
            microphone: false,
            geolocation: false,
            autoplay: false,
            clipboard: true,
        }
    }
}

/// Performance tuning settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSettings {
    pub hibernate_inactive_tabs: bool,
    pub hibernate_after_minutes: u32,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            hibernate_inactive_tabs: true,
            hibernate_after_minutes: 5,
        }
    }
}

/// Closed set of boolean settings that the UI can flip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SettingToggle {
    HttpsOnly,
    BlockTrackers,
    BlockAds,
    DataSaver,
    SaveHistory,
    SearchSuggestions,
    JavaScript,
    Popups,
    Camera,
    Microphone,
    Geolocation,
    Autoplay,
    Clipboard,
    HibernateTabs,
}

impl BrowserSettings {
    /// Returns a mutable reference to the flag behind `toggle`.
    pub fn flag_mut(&mut self, toggle: SettingToggle) -> &mut bool {
        match toggle {
            SettingToggle::HttpsOnly => &mut self.privacy.https_only,
            SettingToggle::BlockTrackers => &mut self.privacy.block_trackers,
            SettingToggle::BlockAds => &mut self.privacy.block_ads,
            SettingToggle::DataSaver => &mut self.privacy.data_saver,
            SettingToggle::SaveHistory => &mut self.privacy.save_history,
            SettingToggle::SearchSuggestions => &mut self.general.search_suggestions,
            SettingToggle::JavaScript => &mut self.permissions.javascript,
            SettingToggle::Popups => &mut self.permissions.popups,
            SettingToggle::Camera => &mut self.permissions.camera,
            SettingToggle::Microphone => &mut self.permissions.microphone,
            SettingToggle::Geolocation => &mut self.permissions.geolocation,
            SettingToggle::Autoplay => &mut self.permissions.autoplay,
            SettingToggle::Clipboard => &mut self.permissions.clipboard,
            SettingToggle::HibernateTabs => &mut self.performance.hibernate_inactive_tabs,
        }
    }

    pub fn flag(&self, toggle: SettingToggle) -> bool {
        match toggle {
            SettingToggle::HttpsOnly => self.privacy.https_only,
            SettingToggle::BlockTrackers => self.privacy.block_trackers,
            SettingToggle::BlockAds => self.privacy.block_ads,
            SettingToggle::DataSaver => self.privacy.data_saver,
            SettingToggle::SaveHistory => self.privacy.save_history,
            SettingToggle::SearchSuggestions => self.general.search_suggestions,
            SettingToggle::JavaScript => self.permissions.javascript,
            SettingToggle::Popups => self.permissions.popups,
            SettingToggle::Camera => self.permissions.camera,
            SettingToggle::Microphone => self.permissions.microphone,
            SettingToggle::Geolocation => self.permissions.geolocation,
            SettingToggle::Autoplay => self.permissions.autoplay,
            SettingToggle::Clipboard => self.permissions.clipboard,
            SettingToggle::HibernateTabs => self.performance.hibernate_inactive_tabs,
        }
    }
}
