use serde::{Deserialize, Serialize};

/// One browsing context with its own synthetic navigation history.
///
/// `history[current_index]` is always the entry shown; `url` mirrors it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    pub history: Vec<String>,
    pub current_index: usize,
    pub is_loading: bool,
    pub is_private: bool,
    pub is_hibernating: bool,
    pub pinned: bool,
    pub group_id: Option<String>,
    /// Bumped only on hard reload and history jumps; the content frame
    /// remounts exactly when this changes.
    pub render_id: u64,
    pub is_translated: bool,
    pub original_url: Option<String>,
    /// Milliseconds on the store clock.
    pub last_accessed: u64,
    pub created_at: u64,
}

impl Tab {
    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_index + 1 < self.history.len()
    }
}

/// A named, colored cluster of tabs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabGroup {
    pub id: String,
    pub title: String,
    pub color: GroupColor,
    pub created_at: u64,
}

/// Palette available for tab groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
}

/// Options for `navigate_tab`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// The destination is a translation-proxy wrapper of the current page.
    pub is_translation: bool,
}

/// How `handle_internal_navigate` classified a frame-reported URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalNavigation {
    /// Internal, empty or `about:` URL; nothing recorded.
    Ignored,
    /// Same as the current entry.
    Unchanged,
    /// Matched the previous entry; the index moved back.
    ImplicitBack,
    /// Appended as a new entry.
    Forward,
}
