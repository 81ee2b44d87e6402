//! Top-level screen selection.

use crate::types::view::{EntrySource, ViewMode};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewRouter {
    mode: ViewMode,
    notes_entry: Option<EntrySource>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn notes_entry(&self) -> Option<EntrySource> {
        self.notes_entry
    }

    pub fn navigate_to(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Opens the notes library, remembering where it was opened from.
    pub fn open_notes(&mut self, entry: EntrySource) {
        self.notes_entry = Some(entry);
        self.mode = ViewMode::Notes;
    }

    /// Steps back one screen. Returns false when already on the browser view.
    pub fn back(&mut self) -> bool {
        self.mode = match self.mode {
            ViewMode::Browser => return false,
            ViewMode::NoteEditor => ViewMode::Notes,
            ViewMode::Notes => match self.notes_entry.take() {
                Some(EntrySource::TabSwitcher) => ViewMode::TabSwitcher,
                Some(EntrySource::Browser) | Some(EntrySource::Home) | None => ViewMode::Browser,
            },
            _ => ViewMode::Browser,
        };
        true
    }
}
