//! Tab groups: named, colored clusters of tabs.
//!
//! The store only holds group records. Membership lives on each tab's
//! `group_id`, so the tab store coordinates deletes.

use uuid::Uuid;

use crate::types::errors::TabError;
use crate::types::tab::{GroupColor, TabGroup};

#[derive(Debug, Default)]
pub struct TabGroupStore {
    groups: Vec<TabGroup>,
}

impl TabGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }

    pub fn get(&self, group_id: &str) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Adds a group and returns its id. Blank titles become "Group N".
    pub fn create(&mut self, title: &str, color: GroupColor, now: u64) -> String {
        let title = match title.trim() {
            "" => format!("Group {}", self.groups.len() + 1),
            t => t.to_string(),
        };
        let id = Uuid::new_v4().to_string();
        self.groups.push(TabGroup {
            id: id.clone(),
            title,
            color,
            created_at: now,
        });
        id
    }

    pub fn update(
        &mut self,
        group_id: &str,
        title: Option<&str>,
        color: Option<GroupColor>,
    ) -> Result<(), TabError> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| TabError::GroupNotFound(group_id.to_string()))?;
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            group.title = title.to_string();
        }
        if let Some(color) = color {
            group.color = color;
        }
        Ok(())
    }

    pub fn remove(&mut self, group_id: &str) -> Result<TabGroup, TabError> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| TabError::GroupNotFound(group_id.to_string()))?;
        Ok(self.groups.remove(idx))
    }
}
