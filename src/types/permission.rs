use serde::{Deserialize, Serialize};

/// Capabilities the content frame may be granted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionKind {
    JavaScript,
    Popups,
    Camera,
    Microphone,
    Geolocation,
    Autoplay,
    Clipboard,
}

impl PermissionKind {
    pub const ALL: [PermissionKind; 7] = [
        PermissionKind::JavaScript,
        PermissionKind::Popups,
        PermissionKind::Camera,
        PermissionKind::Microphone,
        PermissionKind::Geolocation,
        PermissionKind::Autoplay,
        PermissionKind::Clipboard,
    ];
}

/// Per-site decision. `Default` defers to the global setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PermissionState {
    Allow,
    Block,
    #[default]
    Default,
}

/// A stored decision for one host and capability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SitePermission {
    pub host: String,
    pub kind: PermissionKind,
    pub state: PermissionState,
}
