//! Attributes handed to the embedded renderer for the active tab.
//!
//! Global settings give the defaults; per-site decisions override them.

use crate::managers::permission_manager::PermissionManager;
use crate::services::offline_snapshot::OfflineSnapshot;
use crate::services::url_normalizer::is_internal;
use crate::types::permission::PermissionKind;
use crate::types::settings::BrowserSettings;
use crate::types::tab::Tab;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource {
    Url(String),
    /// Saved markup shown instead of the live page.
    Markup(String),
    /// Nothing to render: internal page or hibernating tab.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxToken {
    AllowScripts,
    AllowSameOrigin,
    AllowForms,
    AllowPopups,
    AllowModals,
    AllowDownloads,
}

impl SandboxToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            SandboxToken::AllowScripts => "allow-scripts",
            SandboxToken::AllowSameOrigin => "allow-same-origin",
            SandboxToken::AllowForms => "allow-forms",
            SandboxToken::AllowPopups => "allow-popups",
            SandboxToken::AllowModals => "allow-modals",
            SandboxToken::AllowDownloads => "allow-downloads",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFeature {
    Camera,
    Microphone,
    Geolocation,
    Autoplay,
    ClipboardWrite,
    Fullscreen,
}

impl FrameFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameFeature::Camera => "camera",
            FrameFeature::Microphone => "microphone",
            FrameFeature::Geolocation => "geolocation",
            FrameFeature::Autoplay => "autoplay",
            FrameFeature::ClipboardWrite => "clipboard-write",
            FrameFeature::Fullscreen => "fullscreen",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameAttributes {
    /// Changes exactly when the frame must be remounted.
    pub key: String,
    pub source: FrameSource,
    pub sandbox: Vec<SandboxToken>,
    pub allow: Vec<FrameFeature>,
    pub referrer_policy: &'static str,
}

impl FrameAttributes {
    pub fn sandbox_attr(&self) -> String {
        self.sandbox.iter().map(SandboxToken::as_str).collect::<Vec<_>>().join(" ")
    }

    pub fn allow_attr(&self) -> String {
        self.allow.iter().map(FrameFeature::as_str).collect::<Vec<_>>().join("; ")
    }
}

pub struct FramePolicy;

impl FramePolicy {
    pub fn compute(
        tab: &Tab,
        settings: &BrowserSettings,
        permissions: &PermissionManager,
        snapshot: Option<&OfflineSnapshot>,
    ) -> FrameAttributes {
        let source = if is_internal(&tab.url) || tab.is_hibernating {
            FrameSource::None
        } else {
            match snapshot {
                Some(snap) if snap.url == tab.url => FrameSource::Markup(snap.html.clone()),
                _ => FrameSource::Url(tab.url.clone()),
            }
        };

        let site = tab.original_url.as_deref().unwrap_or(&tab.url);
        let defaults = &settings.permissions;
        let granted = |kind: PermissionKind, global: bool| permissions.resolve(site, kind, global);

        let scripts = granted(PermissionKind::JavaScript, defaults.javascript);
        let mut sandbox = vec![
            SandboxToken::AllowSameOrigin,
            SandboxToken::AllowForms,
            SandboxToken::AllowDownloads,
        ];
        if scripts {
            sandbox.push(SandboxToken::AllowScripts);
            sandbox.push(SandboxToken::AllowModals);
        }
        if granted(PermissionKind::Popups, defaults.popups) {
            sandbox.push(SandboxToken::AllowPopups);
        }

        let mut allow = vec![FrameFeature::Fullscreen];
        let features = [
            (PermissionKind::Camera, defaults.camera, FrameFeature::Camera),
            (PermissionKind::Microphone, defaults.microphone, FrameFeature::Microphone),
            (PermissionKind::Geolocation, defaults.geolocation, FrameFeature::Geolocation),
            (PermissionKind::Clipboard, defaults.clipboard, FrameFeature::ClipboardWrite),
        ];
        for (kind, global, feature) in features {
            if granted(kind, global) {
                allow.push(feature);
            }
        }
        if !settings.privacy.data_saver && granted(PermissionKind::Autoplay, defaults.autoplay) {
            allow.push(FrameFeature::Autoplay);
        }

        let referrer_policy = if settings.privacy.block_trackers {
            "no-referrer"
        } else {
            "strict-origin-when-cross-origin"
        };

        FrameAttributes {
            key: format!("{}:{}", tab.id, tab.render_id),
            source,
            sandbox,
            allow,
            referrer_policy,
        }
    }
}
