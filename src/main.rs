//! Harbor demo driver.
//!
//! Scripts a short browsing session against the navigation core and prints
//! what the shell would render. Set `RUST_LOG=debug` to see the core's logs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use harbor::app::App;
use harbor::frame::FrameHistory;
use harbor::managers::hibernation::HibernationTask;
use harbor::managers::tab_manager::{NavigationConfig, TabManager, TabManagerTrait};
use harbor::services::clock::ManualClock;
use harbor::types::settings::SettingToggle;

/// Stands in for the embedded renderer.
struct ConsoleFrame;

impl FrameHistory for ConsoleFrame {
    fn history_back(&mut self) {
        println!("  [frame] history.back()");
    }
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_navigation(app: &mut App) {
    section("Navigation");
    for input in ["rust-lang.org", "how to cook rice", "http://example.com/#top"] {
        let url = app.navigate(input);
        app.on_frame_loaded(Some(&url));
        println!("  {:<28} -> {}", input, url);
    }

    let reported = "https://example.com/docs";
    println!("  frame reported {} -> {:?}", reported, app.on_frame_location(reported));
    app.on_frame_loaded(Some(reported));

    let mut frame = ConsoleFrame;
    for _ in 0..3 {
        println!("  back -> {:?}", app.handle_back(&mut frame));
    }
    let tab = app.tab_manager.active_tab();
    println!("  history: {:?} (index {})", tab.history, tab.current_index);
    println!();
}

fn demo_translation(app: &mut App) {
    section("Translation");
    app.navigate("example.org/article");
    if let Some(url) = app.translate_active_tab() {
        println!("  translated -> {}", url);
    }
    println!("  reverted   -> {:?}", app.revert_translation());
    println!();
}

fn demo_frame_policy(app: &mut App) {
    section("Frame Policy");
    app.apply_toggle(SettingToggle::Popups).expect("toggle failed");
    let attrs = app.frame_attributes();
    println!("  key:      {}", attrs.key);
    println!("  source:   {:?}", attrs.source);
    println!("  sandbox:  {}", attrs.sandbox_attr());
    println!("  allow:    {}", attrs.allow_attr());
    println!();
}

async fn demo_hibernation() {
    section("Hibernation");
    let clock = ManualClock::new(0);
    let config = NavigationConfig {
        sweep_interval_ms: 0,
        ..NavigationConfig::default()
    };
    let mut manager = TabManager::new(config, Arc::new(clock.clone()));
    let background = manager.active_tab_id().to_string();
    manager.create_tab(false, None);

    let tabs = Arc::new(Mutex::new(manager));
    let task = HibernationTask::spawn(tabs.clone(), Duration::from_millis(10));
    clock.advance(6 * 60 * 1000);
    tokio::time::sleep(Duration::from_millis(50)).await;
    task.stop();

    let tabs = tabs.lock().expect("tab store lock poisoned");
    let sleeping = tabs.get_tab(&background).map(|t| t.is_hibernating);
    println!("  background tab hibernating: {:?}", sleeping);
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    println!("Harbor v{} demo", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::in_memory();
    demo_navigation(&mut app);
    demo_translation(&mut app);
    demo_frame_policy(&mut app);
    demo_hibernation().await;

    println!("  suggestions for 'rust': {:?}", app.suggestions("rust"));
    app.shutdown();
}
