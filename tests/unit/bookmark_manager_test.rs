//! Unit tests for the bookmark library.

use std::rc::Rc;
use std::sync::Arc;

use harbor::database::MemoryStore;
use harbor::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use harbor::services::clock::ManualClock;
use harbor::types::errors::BookmarkError;

fn setup() -> (BookmarkManager, Rc<MemoryStore>) {
    let store = Rc::new(MemoryStore::new());
    let manager = BookmarkManager::new(store.clone(), Arc::new(ManualClock::new(0)));
    (manager, store)
}

#[test]
fn test_add_and_list_newest_first() {
    let (mut manager, _) = setup();
    manager.add_bookmark("https://a.com", "A").unwrap();
    manager.add_bookmark("https://b.com", "B").unwrap();
    let titles: Vec<&str> = manager.list_bookmarks().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
    assert!(manager.is_bookmarked("https://a.com"));
}

#[test]
fn test_rejects_duplicates_and_internal_pages() {
    let (mut manager, _) = setup();
    manager.add_bookmark("https://a.com", "A").unwrap();
    assert!(matches!(
        manager.add_bookmark("https://a.com", "Again"),
        Err(BookmarkError::DuplicateUrl(_))
    ));
    assert!(matches!(
        manager.add_bookmark("harbor://home", "Home"),
        Err(BookmarkError::InternalUrl(_))
    ));
    assert_eq!(manager.list_bookmarks().len(), 1);
}

#[test]
fn test_toggle_adds_then_removes() {
    let (mut manager, _) = setup();
    assert!(manager.toggle_bookmark("https://a.com", "A").unwrap());
    assert!(manager.is_bookmarked("https://a.com"));
    assert!(!manager.toggle_bookmark("https://a.com", "A").unwrap());
    assert!(!manager.is_bookmarked("https://a.com"));
}

#[test]
fn test_update_bookmark() {
    let (mut manager, _) = setup();
    let a = manager.add_bookmark("https://a.com", "A").unwrap();
    manager.add_bookmark("https://b.com", "B").unwrap();

    manager.update_bookmark(&a, Some("https://c.com"), Some("C")).unwrap();
    assert!(manager.is_bookmarked("https://c.com"));
    assert!(!manager.is_bookmarked("https://a.com"));

    assert!(matches!(
        manager.update_bookmark(&a, Some("https://b.com"), None),
        Err(BookmarkError::DuplicateUrl(_))
    ));
    assert!(matches!(
        manager.update_bookmark("missing", None, Some("x")),
        Err(BookmarkError::NotFound(_))
    ));
}

#[test]
fn test_remove_and_search() {
    let (mut manager, _) = setup();
    let id = manager.add_bookmark("https://rust-lang.org", "Rust").unwrap();
    manager.add_bookmark("https://example.com", "Example").unwrap();

    assert_eq!(manager.search_bookmarks("rust").len(), 1);
    manager.remove_bookmark(&id).unwrap();
    assert!(manager.search_bookmarks("rust").is_empty());
    assert!(matches!(manager.remove_bookmark(&id), Err(BookmarkError::NotFound(_))));
}

#[test]
fn test_bookmarks_persist() {
    let (mut manager, store) = setup();
    manager.add_bookmark("https://a.com", "A").unwrap();
    drop(manager);

    let reloaded = BookmarkManager::new(store, Arc::new(ManualClock::new(0)));
    assert!(reloaded.is_bookmarked("https://a.com"));
}
