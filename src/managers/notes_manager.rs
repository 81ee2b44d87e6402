//! Notes library and the scratch note buffer.

use std::rc::Rc;
use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::database::kv_store::{
    load_json_or_default, save_json, KeyValueStore, NOTES_KEY, SCRATCH_NOTE_KEY,
};
use crate::services::clock::Clock;
use crate::types::errors::NoteError;
use crate::types::note::Note;

const PROMOTED_TITLE_CHARS: usize = 40;

pub trait NotesManagerTrait {
    fn create_note(&mut self, title: &str, content: &str, source_url: Option<&str>) -> Result<String, NoteError>;
    fn update_note(&mut self, id: &str, title: Option<&str>, content: Option<&str>) -> Result<(), NoteError>;
    fn delete_note(&mut self, id: &str) -> Result<(), NoteError>;
    fn get_note(&self, id: &str) -> Option<&Note>;
    fn list_notes(&self) -> Vec<&Note>;
    fn search_notes(&self, query: &str) -> Vec<&Note>;
    fn scratch(&self) -> &str;
    fn set_scratch(&mut self, text: &str) -> Result<(), NoteError>;
    fn promote_scratch(&mut self, title: Option<&str>) -> Result<String, NoteError>;
}

pub struct NotesManager {
    store: Rc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    notes: Vec<Note>,
    scratch: String,
}

impl NotesManager {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let notes: Vec<Note> = load_json_or_default(store.as_ref(), NOTES_KEY);
        let scratch: String = load_json_or_default(store.as_ref(), SCRATCH_NOTE_KEY);
        Self {
            store,
            clock,
            notes,
            scratch,
        }
    }

    fn persist_notes(&self) -> Result<(), NoteError> {
        save_json(self.store.as_ref(), NOTES_KEY, &self.notes)?;
        Ok(())
    }

    fn persist_scratch(&self) -> Result<(), NoteError> {
        save_json(self.store.as_ref(), SCRATCH_NOTE_KEY, &self.scratch)?;
        Ok(())
    }

    /// First non-empty line, cut to a short title.
    fn title_from(text: &str) -> String {
        let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("Untitled");
        line.chars().take(PROMOTED_TITLE_CHARS).collect()
    }
}

impl NotesManagerTrait for NotesManager {
    fn create_note(&mut self, title: &str, content: &str, source_url: Option<&str>) -> Result<String, NoteError> {
        let now = self.clock.now_millis();
        let title = match title.trim() {
            "" => Self::title_from(content),
            t => t.to_string(),
        };
        let id = Uuid::new_v4().to_string();
        self.notes.push(Note {
            id: id.clone(),
            title,
            content: content.to_string(),
            source_url: source_url.map(str::to_string),
            created_at: now,
            updated_at: now,
        });
        self.persist_notes()?;
        debug!("created note {}", id);
        Ok(id)
    }

    fn update_note(&mut self, id: &str, title: Option<&str>, content: Option<&str>) -> Result<(), NoteError> {
        let now = self.clock.now_millis();
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        if let Some(title) = title {
            note.title = title.to_string();
        }
        if let Some(content) = content {
            note.content = content.to_string();
        }
        note.updated_at = now;
        self.persist_notes()
    }

    fn delete_note(&mut self, id: &str) -> Result<(), NoteError> {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        self.notes.remove(idx);
        self.persist_notes()
    }

    fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Most recently edited first.
    fn list_notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    fn search_notes(&self, query: &str) -> Vec<&Note> {
        let needle = query.trim().to_lowercase();
        self.list_notes()
            .into_iter()
            .filter(|n| n.title.to_lowercase().contains(&needle) || n.content.to_lowercase().contains(&needle))
            .collect()
    }

    fn scratch(&self) -> &str {
        &self.scratch
    }

    fn set_scratch(&mut self, text: &str) -> Result<(), NoteError> {
        self.scratch = text.to_string();
        self.persist_scratch()
    }

    /// Saves the scratch buffer as a note and clears it.
    fn promote_scratch(&mut self, title: Option<&str>) -> Result<String, NoteError> {
        if self.scratch.trim().is_empty() {
            return Err(NoteError::EmptyScratch);
        }
        let content = std::mem::take(&mut self.scratch);
        let id = self.create_note(title.unwrap_or(""), &content, None)?;
        self.persist_scratch()?;
        Ok(id)
    }
}
