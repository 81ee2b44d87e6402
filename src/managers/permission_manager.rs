//! Permission Manager for Harbor.
//!
//! Per-site tri-state decisions (allow / block / default) for the
//! capabilities the content frame can be granted.

use std::rc::Rc;

use url::Url;

use crate::database::kv_store::{load_json_or_default, save_json, KeyValueStore, SITE_PERMISSIONS_KEY};
use crate::types::errors::PermissionError;
use crate::types::permission::{PermissionKind, PermissionState, SitePermission};

/// Trait defining permission management operations.
pub trait PermissionManagerTrait {
    fn set_permission(&mut self, site: &str, kind: PermissionKind, state: PermissionState) -> Result<(), PermissionError>;
    fn get_permission(&self, site: &str, kind: PermissionKind) -> PermissionState;
    fn site_permissions(&self, site: &str) -> Vec<&SitePermission>;
    fn reset_site(&mut self, site: &str) -> Result<(), PermissionError>;
    fn list_sites(&self) -> Vec<&str>;
}

/// Lowercase host for a URL or a bare host name.
pub fn site_host(site: &str) -> Option<String> {
    let site = site.trim();
    if site.contains("://") {
        return Url::parse(site)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase));
    }
    let host = site.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

pub struct PermissionManager {
    store: Rc<dyn KeyValueStore>,
    entries: Vec<SitePermission>,
}

impl PermissionManager {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let entries: Vec<SitePermission> = load_json_or_default(store.as_ref(), SITE_PERMISSIONS_KEY);
        Self { store, entries }
    }

    /// Resolves a capability: a site decision wins, otherwise the global default.
    pub fn resolve(&self, site: &str, kind: PermissionKind, global_default: bool) -> bool {
        match self.get_permission(site, kind) {
            PermissionState::Allow => true,
            PermissionState::Block => false,
            PermissionState::Default => global_default,
        }
    }

    fn persist(&self) -> Result<(), PermissionError> {
        save_json(self.store.as_ref(), SITE_PERMISSIONS_KEY, &self.entries)?;
        Ok(())
    }
}

impl PermissionManagerTrait for PermissionManager {
    /// Stores a decision. Setting `Default` removes the site override.
    fn set_permission(&mut self, site: &str, kind: PermissionKind, state: PermissionState) -> Result<(), PermissionError> {
        let host = site_host(site).ok_or_else(|| PermissionError::InvalidSite(site.to_string()))?;
        self.entries.retain(|e| !(e.host == host && e.kind == kind));
        if state != PermissionState::Default {
            self.entries.push(SitePermission { host, kind, state });
        }
        self.persist()
    }

    fn get_permission(&self, site: &str, kind: PermissionKind) -> PermissionState {
        let Some(host) = site_host(site) else {
            return PermissionState::Default;
        };
        self.entries
            .iter()
            .find(|e| e.host == host && e.kind == kind)
            .map(|e| e.state)
            .unwrap_or_default()
    }

    fn site_permissions(&self, site: &str) -> Vec<&SitePermission> {
        match site_host(site) {
            Some(host) => self.entries.iter().filter(|e| e.host == host).collect(),
            None => Vec::new(),
        }
    }

    fn reset_site(&mut self, site: &str) -> Result<(), PermissionError> {
        let host = site_host(site).ok_or_else(|| PermissionError::InvalidSite(site.to_string()))?;
        self.entries.retain(|e| e.host != host);
        self.persist()
    }

    fn list_sites(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.entries.iter().map(|e| e.host.as_str()).collect();
        hosts.sort_unstable();
        hosts.dedup();
        hosts
    }
}
