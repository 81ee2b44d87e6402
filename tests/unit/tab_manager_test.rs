//! Unit tests for the tab store: history stack, render ids, lifecycle.

use std::sync::Arc;

use harbor::managers::tab_manager::{NavigationConfig, TabManager, TabManagerTrait};
use harbor::services::clock::{Clock, ManualClock};
use harbor::services::url_normalizer::HOME_URL;
use harbor::types::errors::TabError;
use harbor::types::tab::{InternalNavigation, NavigateOptions};
use harbor::types::view::ViewMode;

fn setup() -> (TabManager, ManualClock) {
    let clock = ManualClock::new(1_000);
    let manager = TabManager::new(NavigationConfig::default(), Arc::new(clock.clone()));
    (manager, clock)
}

fn go(manager: &mut TabManager, input: &str) -> String {
    manager.navigate_tab(Some(input), NavigateOptions::default())
}

#[test]
fn test_starts_with_single_home_tab() {
    let (manager, _) = setup();
    assert_eq!(manager.tab_count(), 1);
    let tab = manager.active_tab();
    assert_eq!(tab.url, HOME_URL);
    assert_eq!(tab.history, vec![HOME_URL.to_string()]);
    assert_eq!(tab.current_index, 0);
    assert_eq!(tab.title, "New Tab");
    assert_eq!(manager.active_tab_id(), tab.id);
}

#[test]
fn test_navigate_appends_and_keeps_render_id() {
    let (mut manager, _) = setup();
    let url = go(&mut manager, "example.com");
    assert_eq!(url, "https://example.com");

    let tab = manager.active_tab();
    assert_eq!(tab.url, "https://example.com");
    assert_eq!(tab.history.len(), 2);
    assert_eq!(tab.current_index, 1);
    assert_eq!(tab.render_id, 0);
    assert!(tab.is_loading);
    assert_eq!(tab.title, "example.com");
}

#[test]
fn test_back_then_navigate_truncates_forward_entries() {
    let (mut manager, _) = setup();
    go(&mut manager, "a.com");
    go(&mut manager, "b.com");
    assert!(manager.go_back());
    assert_eq!(manager.active_tab().url, "https://a.com");

    go(&mut manager, "c.com");
    let tab = manager.active_tab();
    assert_eq!(tab.history, vec![HOME_URL, "https://a.com", "https://c.com"]);
    assert_eq!(tab.current_index, 2);
    assert!(!manager.go_forward());
}

#[test]
fn test_history_moves_bump_render_id() {
    let (mut manager, _) = setup();
    go(&mut manager, "a.com");
    go(&mut manager, "b.com");
    let r0 = manager.active_tab().render_id;

    assert!(manager.go_back());
    let r1 = manager.active_tab().render_id;
    assert!(r1 > r0);

    assert!(manager.go_forward());
    let r2 = manager.active_tab().render_id;
    assert!(r2 > r1);
    assert_eq!(manager.active_tab().url, "https://b.com");

    manager.reload_tab();
    assert!(manager.active_tab().render_id > r2);
    assert!(manager.active_tab().is_loading);
}

#[test]
fn test_go_back_at_start_is_noop() {
    let (mut manager, _) = setup();
    let before = manager.active_tab().clone();
    assert!(!manager.go_back());
    assert_eq!(manager.active_tab(), &before);
}

#[test]
fn test_internal_navigate_implicit_back() {
    let (mut manager, _) = setup();
    go(&mut manager, "a.com");
    go(&mut manager, "b.com");
    let render = manager.active_tab().render_id;

    let outcome = manager.handle_internal_navigate("https://a.com");
    assert_eq!(outcome, InternalNavigation::ImplicitBack);
    let tab = manager.active_tab();
    assert_eq!(tab.current_index, 1);
    assert_eq!(tab.url, "https://a.com");
    assert_eq!(tab.history.len(), 3, "forward entry is kept");
    assert_eq!(tab.render_id, render);
}

#[test]
fn test_internal_navigate_forward_and_unchanged() {
    let (mut manager, _) = setup();
    go(&mut manager, "a.com");
    let render = manager.active_tab().render_id;

    assert_eq!(
        manager.handle_internal_navigate("https://a.com"),
        InternalNavigation::Unchanged
    );
    assert_eq!(
        manager.handle_internal_navigate("https://a.com/page"),
        InternalNavigation::Forward
    );
    let tab = manager.active_tab();
    assert_eq!(tab.url, "https://a.com/page");
    assert_eq!(tab.current_index, 2);
    assert_eq!(tab.render_id, render);
}

#[test]
fn test_internal_navigate_forward_leaves_loading_to_frame() {
    let (mut manager, _) = setup();
    let id = manager.active_tab_id().to_string();
    let url = go(&mut manager, "a.com");
    assert!(manager.mark_loaded(&id, Some(&url)));

    manager.handle_internal_navigate("https://a.com/next");
    assert!(!manager.active_tab().is_loading);

    go(&mut manager, "b.com");
    manager.handle_internal_navigate("https://b.com/next");
    assert!(manager.active_tab().is_loading, "pending load is not cleared");
}

#[test]
fn test_internal_navigate_ignores_blank_and_internal() {
    let (mut manager, _) = setup();
    go(&mut manager, "a.com");
    let before = manager.active_tab().clone();
    for reported in ["", "   ", "about:blank", "harbor://home"] {
        assert_eq!(manager.handle_internal_navigate(reported), InternalNavigation::Ignored);
    }
    assert_eq!(manager.active_tab(), &before);
}

#[test]
fn test_mark_loaded_ignores_stale_url() {
    let (mut manager, _) = setup();
    let id = manager.active_tab_id().to_string();
    go(&mut manager, "a.com");
    go(&mut manager, "b.com");

    assert!(!manager.mark_loaded(&id, Some("https://a.com")));
    assert!(manager.active_tab().is_loading);
    assert!(manager.mark_loaded(&id, Some("https://b.com")));
    assert!(!manager.active_tab().is_loading);
    assert!(!manager.mark_loaded("missing", None));
}

#[test]
fn test_create_tab_activates_and_shows_browser() {
    let (mut manager, _) = setup();
    manager.router_mut().navigate_to(ViewMode::TabSwitcher);
    let id = manager.create_tab(true, None);
    assert_eq!(manager.active_tab_id(), id);
    assert!(manager.active_tab().is_private);
    assert_eq!(manager.router().mode(), ViewMode::Browser);
    assert_eq!(manager.tab_count(), 2);
}

#[test]
fn test_close_last_tab_creates_fresh_home_tab() {
    let (mut manager, _) = setup();
    let only = manager.active_tab_id().to_string();
    go(&mut manager, "a.com");

    manager.close_tab(&only).unwrap();
    assert_eq!(manager.tab_count(), 1);
    let tab = manager.active_tab();
    assert_ne!(tab.id, only);
    assert_eq!(tab.url, HOME_URL);
    assert_eq!(tab.history.len(), 1);
}

#[test]
fn test_close_active_tab_activates_last() {
    let (mut manager, _) = setup();
    let first = manager.active_tab_id().to_string();
    let second = manager.create_tab(false, None);
    let third = manager.create_tab(false, None);
    manager.switch_tab(&second).unwrap();

    manager.close_tab(&second).unwrap();
    assert_eq!(manager.active_tab_id(), third);

    manager.close_tab(&first).unwrap();
    assert_eq!(manager.active_tab_id(), third);
    assert_eq!(manager.tab_count(), 1);
}

#[test]
fn test_close_unknown_tab_errors() {
    let (mut manager, _) = setup();
    let err = manager.close_tab("nope").unwrap_err();
    assert!(matches!(err, TabError::NotFound(id) if id == "nope"));
    assert_eq!(manager.tab_count(), 1);
}

#[test]
fn test_switch_tab_wakes_hibernating_tab() {
    let (mut manager, clock) = setup();
    let first = manager.active_tab_id().to_string();
    manager.create_tab(false, None);

    clock.advance(5 * 60 * 1000 + 1);
    assert_eq!(manager.sweep_hibernation(), 1);
    assert!(manager.get_tab(&first).unwrap().is_hibernating);

    manager.switch_tab(&first).unwrap();
    let tab = manager.get_tab(&first).unwrap();
    assert!(!tab.is_hibernating);
    assert_eq!(tab.last_accessed, clock.now_millis());
    assert!(manager.switch_tab("missing").is_err());
}

#[test]
fn test_pin_orders_tabs_first() {
    let (mut manager, _) = setup();
    let first = manager.active_tab_id().to_string();
    let second = manager.create_tab(false, None);
    assert!(manager.toggle_pin_tab(&second).unwrap());

    let order: Vec<&str> = manager.ordered_tabs().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec![second.as_str(), first.as_str()]);

    assert!(!manager.toggle_pin_tab(&second).unwrap());
    assert!(manager.toggle_pin_tab("missing").is_err());
}

#[test]
fn test_translate_and_revert() {
    let (mut manager, _) = setup();
    go(&mut manager, "example.org/article");

    let wrapped = manager.translate_active_tab("de").unwrap();
    let tab = manager.active_tab();
    assert!(tab.is_translated);
    assert_eq!(tab.url, wrapped);
    assert_eq!(tab.original_url.as_deref(), Some("https://example.org/article"));
    assert_eq!(tab.title, "example.org");

    let reverted = manager.revert_translation().unwrap();
    assert_eq!(reverted, "https://example.org/article");
    let tab = manager.active_tab();
    assert!(!tab.is_translated);
    assert_eq!(tab.original_url, None);
    assert_eq!(tab.history.len(), 4);
}

#[test]
fn test_translation_state_follows_history_moves() {
    let (mut manager, _) = setup();
    go(&mut manager, "example.org");
    manager.translate_active_tab("fr").unwrap();

    manager.go_back();
    assert!(!manager.active_tab().is_translated);
    manager.go_forward();
    assert!(manager.active_tab().is_translated);
    assert_eq!(manager.active_tab().original_url.as_deref(), Some("https://example.org"));
}

#[test]
fn test_translate_internal_page_is_noop() {
    let (mut manager, _) = setup();
    assert_eq!(manager.translate_active_tab("fr"), None);
    assert_eq!(manager.revert_translation(), None);
    assert_eq!(manager.active_tab().history.len(), 1);
}

#[test]
fn test_apply_config_changes_later_navigations() {
    let (mut manager, _) = setup();
    manager.apply_config(NavigationConfig {
        search_engine: "bing".to_string(),
        https_only: true,
        ..NavigationConfig::default()
    });
    assert_eq!(go(&mut manager, "rust"), "https://www.bing.com/search?q=rust");
    assert_eq!(go(&mut manager, "http://a.com"), "https://a.com");
}
