//! Unit tests for notes and the scratch buffer.

use std::rc::Rc;
use std::sync::Arc;

use harbor::database::MemoryStore;
use harbor::managers::notes_manager::{NotesManager, NotesManagerTrait};
use harbor::services::clock::ManualClock;
use harbor::types::errors::NoteError;

fn setup() -> (NotesManager, Rc<MemoryStore>, ManualClock) {
    let store = Rc::new(MemoryStore::new());
    let clock = ManualClock::new(0);
    let manager = NotesManager::new(store.clone(), Arc::new(clock.clone()));
    (manager, store, clock)
}

#[test]
fn test_create_and_get_note() {
    let (mut manager, _, _) = setup();
    let id = manager
        .create_note("Reading", "chapter 3", Some("https://example.com"))
        .unwrap();
    let note = manager.get_note(&id).unwrap();
    assert_eq!(note.title, "Reading");
    assert_eq!(note.source_url.as_deref(), Some("https://example.com"));
}

#[test]
fn test_blank_title_derived_from_content() {
    let (mut manager, _, _) = setup();
    let id = manager.create_note("  ", "\nShopping list\neggs", None).unwrap();
    assert_eq!(manager.get_note(&id).unwrap().title, "Shopping list");
}

#[test]
fn test_list_orders_by_last_edit() {
    let (mut manager, _, clock) = setup();
    let first = manager.create_note("First", "", None).unwrap();
    clock.advance(10);
    manager.create_note("Second", "", None).unwrap();
    clock.advance(10);
    manager.update_note(&first, None, Some("edited")).unwrap();

    let titles: Vec<&str> = manager.list_notes().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert_eq!(manager.get_note(&first).unwrap().updated_at, 20);
}

#[test]
fn test_delete_and_search() {
    let (mut manager, _, _) = setup();
    let id = manager.create_note("Rust", "ownership notes", None).unwrap();
    manager.create_note("Other", "misc", None).unwrap();

    assert_eq!(manager.search_notes("OWNERSHIP").len(), 1);
    manager.delete_note(&id).unwrap();
    assert!(manager.search_notes("ownership").is_empty());
    assert!(matches!(manager.delete_note(&id), Err(NoteError::NotFound(_))));
    assert!(matches!(
        manager.update_note(&id, Some("x"), None),
        Err(NoteError::NotFound(_))
    ));
}

#[test]
fn test_scratch_promotion() {
    let (mut manager, store, clock) = setup();
    assert!(matches!(manager.promote_scratch(None), Err(NoteError::EmptyScratch)));

    manager.set_scratch("Quick thought\nmore detail").unwrap();
    let id = manager.promote_scratch(None).unwrap();
    assert_eq!(manager.scratch(), "");
    assert_eq!(manager.get_note(&id).unwrap().title, "Quick thought");

    manager.set_scratch("kept").unwrap();
    drop(manager);
    let reloaded = NotesManager::new(store, Arc::new(clock));
    assert_eq!(reloaded.scratch(), "kept");
    assert_eq!(reloaded.list_notes().len(), 1);
}

#[test]
fn test_promoted_title_is_truncated() {
    let (mut manager, _, _) = setup();
    manager.set_scratch(&"x".repeat(100)).unwrap();
    let id = manager.promote_scratch(None).unwrap();
    assert_eq!(manager.get_note(&id).unwrap().title.chars().count(), 40);

    manager.set_scratch("body").unwrap();
    let id = manager.promote_scratch(Some("Named")).unwrap();
    assert_eq!(manager.get_note(&id).unwrap().title, "Named");
}
