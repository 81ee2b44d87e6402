use serde::{Deserialize, Serialize};

/// Top-level screen currently shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browser,
    TabSwitcher,
    Settings,
    Bookmarks,
    History,
    Downloads,
    Notes,
    NoteEditor,
}

/// Where the notes flow was opened from, so back can return there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntrySource {
    Browser,
    TabSwitcher,
    Home,
}
