//! Unit tests for inactive-tab hibernation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use harbor::managers::hibernation::HibernationTask;
use harbor::managers::tab_manager::{NavigationConfig, TabManager, TabManagerTrait};
use harbor::services::clock::ManualClock;

const FIVE_MINUTES: u64 = 5 * 60 * 1000;

fn setup(config: NavigationConfig) -> (TabManager, ManualClock, String) {
    let clock = ManualClock::new(0);
    let mut manager = TabManager::new(config, Arc::new(clock.clone()));
    let background = manager.active_tab_id().to_string();
    manager.create_tab(false, None);
    (manager, clock, background)
}

#[test]
fn test_inactive_tab_hibernates_after_threshold() {
    let (mut manager, clock, background) = setup(NavigationConfig::default());

    clock.advance(FIVE_MINUTES);
    assert_eq!(manager.tick(), 0, "exactly at the threshold is not past it");
    assert!(!manager.get_tab(&background).unwrap().is_hibernating);

    clock.advance(60_000);
    assert_eq!(manager.tick(), 1);
    assert!(manager.get_tab(&background).unwrap().is_hibernating);
    assert!(!manager.active_tab().is_hibernating, "active tab never sleeps");
}

#[test]
fn test_tick_respects_sweep_interval() {
    let (mut manager, clock, _) = setup(NavigationConfig::default());
    clock.advance(FIVE_MINUTES + 1);
    assert_eq!(manager.tick(), 1);

    let third = manager.create_tab(false, None);
    let second = manager
        .tabs()
        .iter()
        .find(|t| t.id != third && !t.is_hibernating)
        .map(|t| t.id.clone())
        .unwrap();
    manager.switch_tab(&third).unwrap();
    clock.advance(FIVE_MINUTES + 1);
    // last sweep was a full interval ago, so this one runs
    assert_eq!(manager.tick(), 1);
    assert!(manager.get_tab(&second).unwrap().is_hibernating);
    assert_eq!(manager.tick(), 0);
}

#[test]
fn test_switching_wakes_tab() {
    let (mut manager, clock, background) = setup(NavigationConfig::default());
    clock.advance(FIVE_MINUTES + 1);
    manager.sweep_hibernation();

    manager.switch_tab(&background).unwrap();
    assert!(!manager.get_tab(&background).unwrap().is_hibernating);
}

#[test]
fn test_navigation_wakes_active_tab() {
    let (mut manager, _, _) = setup(NavigationConfig::default());
    manager.navigate_tab(Some("example.com"), Default::default());
    assert!(!manager.active_tab().is_hibernating);
}

#[test]
fn test_disabled_hibernation_never_sleeps() {
    let config = NavigationConfig {
        hibernation_enabled: false,
        ..NavigationConfig::default()
    };
    let (mut manager, clock, background) = setup(config);
    clock.advance(FIVE_MINUTES * 10);
    assert_eq!(manager.tick(), 0);
    assert!(!manager.get_tab(&background).unwrap().is_hibernating);
}

#[test]
fn test_custom_threshold() {
    let config = NavigationConfig {
        hibernate_after_ms: 1_000,
        sweep_interval_ms: 0,
        ..NavigationConfig::default()
    };
    let (mut manager, clock, background) = setup(config);
    clock.advance(1_001);
    assert_eq!(manager.tick(), 1);
    assert!(manager.get_tab(&background).unwrap().is_hibernating);
}

#[tokio::test]
async fn test_background_task_sweeps() {
    let config = NavigationConfig {
        sweep_interval_ms: 0,
        ..NavigationConfig::default()
    };
    let (manager, clock, background) = setup(config);
    let tabs = Arc::new(Mutex::new(manager));

    let task = HibernationTask::spawn(tabs.clone(), Duration::from_millis(5));
    assert!(task.is_running());
    clock.advance(FIVE_MINUTES + 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    task.stop();
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert!(!task.is_running());

    let manager = tabs.lock().unwrap();
    assert!(manager.get_tab(&background).unwrap().is_hibernating);
}
