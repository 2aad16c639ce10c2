//! The application core container.

use crate::config::AppConfig;
use crate::errors::FeedError;
use crate::notifications::ToastQueue;
use crate::overlay::OverlayStack;
use crate::views::{OverlayContent, OverlayOutcome};
use tracing::debug;

/// Process-wide application state container.
///
/// Created once at startup and shared by cloning (handles are cheap).
/// Everything a render boundary needs flows out of here: the overlay
/// stack's card list and the toast queue, both observable. Feed sessions
/// are created per feed view and are deliberately not owned here; their
/// lifetime belongs to the view.
#[derive(Clone)]
pub struct AppCore {
    config: AppConfig,
    overlays: OverlayStack<OverlayContent, OverlayOutcome>,
    toasts: ToastQueue,
}

impl AppCore {
    /// Initialize the core with `config`.
    pub fn new(config: AppConfig) -> Self {
        debug!(page_size = config.feed.page_size, "app core initialized");
        Self {
            config,
            overlays: OverlayStack::new(),
            toasts: ToastQueue::new(),
        }
    }

    /// The process-wide overlay stack.
    pub fn overlays(&self) -> &OverlayStack<OverlayContent, OverlayOutcome> {
        &self.overlays
    }

    /// The toast queue.
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// The configuration this core was initialized with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Surface a failed page fetch as a toast at the right severity.
    pub fn report_feed_error(&self, error: &FeedError) {
        self.toasts.push(error.toast_level(), error.to_string());
    }

    /// Tear the core down.
    ///
    /// Settles every pending overlay with a rejection so no caller is left
    /// awaiting a dismissal that can never come.
    pub fn shutdown(&self) {
        self.overlays.shutdown();
        debug!("app core shut down");
    }
}

impl Default for AppCore {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
