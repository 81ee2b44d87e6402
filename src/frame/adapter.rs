//! Content frame adapter.
//!
//! The embedded renderer's history cannot be read by the host, so the
//! adapter infers how far the user has navigated inside the frame from the
//! load events it observes and the back commands it issues. The counter
//! resets whenever the frame is remounted (tab switch or `render_id` change)
//! or removed (internal page, hibernation).

use std::sync::Arc;

use log::debug;

use crate::services::clock::Clock;
use crate::services::url_normalizer::is_internal;
use crate::types::tab::Tab;

/// Repeated back gestures closer together than this are dropped.
pub const BACK_DEBOUNCE_MS: u64 = 400;

/// Host-side handle on the embedded frame.
pub trait FrameHistory {
    /// Asks the frame to step back in its own history.
    fn history_back(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The frame was told to go back.
    Handled,
    /// Nothing to go back to, or debounced; the caller picks a fallback.
    NotHandled,
}

impl BackOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, BackOutcome::Handled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MountKey {
    tab_id: String,
    render_id: u64,
}

pub struct ContentFrameAdapter {
    clock: Arc<dyn Clock>,
    debounce_ms: u64,
    mounted: Option<MountKey>,
    depth: u32,
    /// The first load after a mount is the page itself, not a navigation.
    baseline_loaded: bool,
    pending_back: bool,
    last_back_attempt: Option<u64>,
}

impl ContentFrameAdapter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_debounce(clock, BACK_DEBOUNCE_MS)
    }

    pub fn with_debounce(clock: Arc<dyn Clock>, debounce_ms: u64) -> Self {
        Self {
            clock,
            debounce_ms,
            mounted: None,
            depth: 0,
            baseline_loaded: false,
            pending_back: false,
            last_back_attempt: None,
        }
    }

    /// Points the adapter at the active tab. Returns true when the frame must
    /// be torn down, recreated or removed, in which case the depth starts over.
    ///
    /// Internal pages and hibernating tabs have no frame at all, so the
    /// adapter holds no mount for them.
    pub fn sync_active_tab(&mut self, tab: &Tab) -> bool {
        if is_internal(&tab.url) || tab.is_hibernating {
            if self.mounted.take().is_none() {
                return false;
            }
            debug!("frame unmounted for tab {}", tab.id);
            self.reset();
            return true;
        }

        let key = MountKey {
            tab_id: tab.id.clone(),
            render_id: tab.render_id,
        };
        if self.mounted.as_ref() == Some(&key) {
            return false;
        }
        debug!("remounting frame for tab {} (render {})", key.tab_id, key.render_id);
        self.mounted = Some(key);
        self.reset();
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Forgets everything about the current frame, e.g. after it was unmounted.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.baseline_loaded = false;
        self.pending_back = false;
    }

    /// A load finished inside the frame.
    pub fn on_load(&mut self) {
        if self.mounted.is_none() {
            debug!("load event with no frame mounted");
            return;
        }
        if self.pending_back {
            self.pending_back = false;
            return;
        }
        if !self.baseline_loaded {
            self.baseline_loaded = true;
            return;
        }
        self.depth += 1;
    }

    /// A load failed. A pending synthetic back is considered settled.
    pub fn on_load_error(&mut self) {
        self.pending_back = false;
    }

    /// Tries to step back inside the frame.
    pub fn go_back(&mut self, frame: &mut dyn FrameHistory) -> BackOutcome {
        if self.depth == 0 {
            return BackOutcome::NotHandled;
        }
        // Every attempt restarts the window, including debounced ones.
        let now = self.clock.now_millis();
        if let Some(last) = self.last_back_attempt.replace(now) {
            if now.saturating_sub(last) < self.debounce_ms {
                debug!("back gesture debounced");
                return BackOutcome::NotHandled;
            }
        }
        self.pending_back = true;
        self.depth -= 1;
        frame.history_back();
        BackOutcome::Handled
    }

    /// True between issuing a back and seeing the load it causes.
    pub fn is_back_pending(&self) -> bool {
        self.pending_back
    }

    pub fn can_go_back(&self) -> bool {
        self.depth > 0
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}
