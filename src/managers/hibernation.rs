//! Hibernation scheduling.
//!
//! [`HibernationSchedule`] decides when a sweep is due on the store's clock.
//! [`HibernationTask`] drives the sweep from a tokio interval for hosts that
//! share the tab store across tasks; it stops when dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::tab_manager::TabManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HibernationSchedule {
    interval_ms: u64,
    last_run: u64,
}

impl HibernationSchedule {
    pub fn new(interval_ms: u64, now: u64) -> Self {
        Self {
            interval_ms,
            last_run: now,
        }
    }

    pub fn is_due(&self, now: u64) -> bool {
        now.saturating_sub(self.last_run) >= self.interval_ms
    }

    pub fn mark_run(&mut self, now: u64) {
        self.last_run = now;
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// Background driver calling [`TabManager::tick`] every `period`.
pub struct HibernationTask {
    handle: JoinHandle<()>,
}

impl HibernationTask {
    /// Starts the driver. Must be called from within a tokio runtime.
    pub fn spawn(tabs: Arc<Mutex<TabManager>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match tabs.lock() {
                    Ok(mut manager) => {
                        let slept = manager.tick();
                        if slept > 0 {
                            debug!("hibernation sweep put {} tab(s) to sleep", slept);
                        }
                    }
                    Err(_) => {
                        warn!("tab store lock poisoned; stopping hibernation driver");
                        break;
                    }
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for HibernationTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
