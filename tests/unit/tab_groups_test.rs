//! Unit tests for tab groups.

use std::sync::Arc;

use harbor::managers::tab_manager::{NavigationConfig, TabManager, TabManagerTrait};
use harbor::services::clock::ManualClock;
use harbor::types::errors::TabError;
use harbor::types::tab::GroupColor;

fn setup() -> TabManager {
    TabManager::new(NavigationConfig::default(), Arc::new(ManualClock::new(0)))
}

#[test]
fn test_create_group_and_tab_in_it() {
    let mut manager = setup();
    let group = manager.create_group("Research", GroupColor::Blue);
    let tab = manager.create_tab(false, Some(&group));

    assert_eq!(manager.groups().len(), 1);
    assert_eq!(manager.groups()[0].title, "Research");
    let members = manager.tabs_in_group(&group);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, tab);
}

#[test]
fn test_create_tab_with_unknown_group_is_ungrouped() {
    let mut manager = setup();
    let tab = manager.create_tab(false, Some("ghost"));
    assert_eq!(manager.get_tab(&tab).unwrap().group_id, None);
}

#[test]
fn test_blank_titles_are_numbered() {
    let mut manager = setup();
    manager.create_group("", GroupColor::Red);
    manager.create_group("  ", GroupColor::Green);
    let titles: Vec<&str> = manager.groups().iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Group 1", "Group 2"]);
}

#[test]
fn test_update_group() {
    let mut manager = setup();
    let group = manager.create_group("Work", GroupColor::Grey);
    manager
        .update_group(&group, Some("Home"), Some(GroupColor::Purple))
        .unwrap();
    assert_eq!(manager.groups()[0].title, "Home");
    assert_eq!(manager.groups()[0].color, GroupColor::Purple);

    let err = manager.update_group("nope", Some("x"), None).unwrap_err();
    assert!(matches!(err, TabError::GroupNotFound(_)));
}

#[test]
fn test_delete_group_keeps_tabs_open() {
    let mut manager = setup();
    let group = manager.create_group("Temp", GroupColor::Yellow);
    let tab = manager.create_tab(false, Some(&group));

    manager.delete_group(&group).unwrap();
    assert!(manager.groups().is_empty());
    assert_eq!(manager.tab_count(), 2);
    assert_eq!(manager.get_tab(&tab).unwrap().group_id, None);
    assert!(manager.delete_group(&group).is_err());
}

#[test]
fn test_assign_and_remove_membership() {
    let mut manager = setup();
    let group = manager.create_group("Docs", GroupColor::Cyan);
    let tab = manager.active_tab_id().to_string();

    assert!(matches!(
        manager.assign_tab_to_group(&tab, "missing"),
        Err(TabError::GroupNotFound(_))
    ));
    assert!(matches!(
        manager.assign_tab_to_group("missing", &group),
        Err(TabError::NotFound(_))
    ));

    manager.assign_tab_to_group(&tab, &group).unwrap();
    assert_eq!(manager.tabs_in_group(&group).len(), 1);
    manager.remove_tab_from_group(&tab).unwrap();
    assert!(manager.tabs_in_group(&group).is_empty());
}
