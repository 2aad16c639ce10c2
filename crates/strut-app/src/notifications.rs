//! Toast lifecycle state.
//!
//! Toasts are tick-driven: the frontend calls [`ToastQueue::tick`] on a
//! fixed cadence ([`TOAST_TICK_RATE_MS`]) and durations are stored as tick
//! counts, so the core never owns a timer. A duration of
//! [`NO_AUTO_DISMISS`] produces a sticky toast that only an explicit
//! dismiss removes.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use strut_core::Observable;
use tracing::debug;

/// Cadence the frontend should drive [`ToastQueue::tick`] at.
pub const TOAST_TICK_RATE_MS: u64 = 250;

/// Default visible lifetime of a toast.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;

/// Duration value meaning "never auto-dismiss".
pub const NO_AUTO_DISMISS: u64 = 0;

/// Oldest toasts are evicted beyond this many pending.
pub const MAX_PENDING_TOASTS: usize = 4;

/// Convert a millisecond duration to ticks, rounding up.
pub fn ms_to_ticks(ms: u64) -> u32 {
    ms.div_ceil(TOAST_TICK_RATE_MS) as u32
}

/// Convert a tick count back to milliseconds.
pub fn ticks_to_ms(ticks: u32) -> u64 {
    u64::from(ticks) * TOAST_TICK_RATE_MS
}

/// Whether a duration produces an auto-dismissing toast.
pub fn will_auto_dismiss(duration_ms: u64) -> bool {
    duration_ms != NO_AUTO_DISMISS
}

/// Severity of a toast, in ascending visual weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToastLevel {
    /// Neutral notice.
    #[default]
    Info,
    /// Positive confirmation.
    Success,
    /// Something degraded but recoverable.
    Warning,
    /// Something failed.
    Error,
}

impl ToastLevel {
    /// Short label for display and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One pending toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Queue-assigned identifier, unique per push.
    pub id: u64,
    /// Severity.
    pub level: ToastLevel,
    /// Headline text.
    pub title: String,
    /// Optional supporting text.
    pub body: Option<String>,
    /// Ticks left before auto-dismiss; `None` for sticky toasts.
    pub remaining_ticks: Option<u32>,
}

struct QueueInner {
    pending: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    rendered: Observable<Vec<Toast>>,
}

/// Bounded queue of pending toasts with tick-based auto-dismiss.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<QueueInner>,
}

impl ToastQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(QueueInner {
                pending: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                rendered: Observable::new(Vec::new()),
            }),
        }
    }

    /// Push a toast with the default duration. Returns its id.
    pub fn push(&self, level: ToastLevel, title: impl Into<String>) -> u64 {
        self.push_with(level, title, None, DEFAULT_TOAST_DURATION_MS)
    }

    /// Push a toast with explicit body and duration. Returns its id.
    ///
    /// When the queue is full the oldest pending toast is evicted first.
    pub fn push_with(
        &self,
        level: ToastLevel,
        title: impl Into<String>,
        body: Option<String>,
        duration_ms: u64,
    ) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            level,
            title: title.into(),
            body,
            remaining_ticks: will_auto_dismiss(duration_ms).then(|| ms_to_ticks(duration_ms)),
        };

        {
            let mut pending = self.inner.pending.lock();
            if pending.len() >= MAX_PENDING_TOASTS {
                let evicted = pending.remove(0);
                debug!(id = evicted.id, "toast evicted, queue full");
            }
            pending.push(toast);
        }
        self.publish();
        id
    }

    /// Dismiss a toast by id. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = {
            let mut pending = self.inner.pending.lock();
            let before = pending.len();
            pending.retain(|toast| toast.id != id);
            pending.len() != before
        };
        if removed {
            self.publish();
        }
        removed
    }

    /// Advance one tick: decrement finite lifetimes, drop expired toasts.
    pub fn tick(&self) {
        let changed = {
            let mut pending = self.inner.pending.lock();
            let before = pending.len();
            let mut decremented = false;
            for toast in pending.iter_mut() {
                if let Some(ticks) = toast.remaining_ticks.as_mut() {
                    *ticks = ticks.saturating_sub(1);
                    decremented = true;
                }
            }
            pending.retain(|toast| toast.remaining_ticks != Some(0));
            decremented || pending.len() != before
        };
        if changed {
            self.publish();
        }
    }

    /// Number of pending toasts.
    pub fn len(&self) -> usize {
        self.inner.pending.lock().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.inner.pending.lock().is_empty()
    }

    /// The observable the render boundary watches.
    pub fn rendered(&self) -> Observable<Vec<Toast>> {
        self.inner.rendered.clone()
    }

    fn publish(&self) {
        let snapshot = self.inner.pending.lock().clone();
        self.inner.rendered.set(snapshot);
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_conversions() {
        assert_eq!(ms_to_ticks(3_000), 12);
        assert_eq!(ms_to_ticks(100), 1);
        assert_eq!(ticks_to_ms(12), 3_000);
    }

    #[test]
    fn test_will_auto_dismiss() {
        assert!(will_auto_dismiss(DEFAULT_TOAST_DURATION_MS));
        assert!(!will_auto_dismiss(NO_AUTO_DISMISS));
    }

    #[test]
    fn test_push_and_dismiss() {
        let queue = ToastQueue::new();
        let id = queue.push(ToastLevel::Info, "welcome back");

        assert_eq!(queue.len(), 1);
        assert!(queue.dismiss(id));
        assert!(queue.is_empty());
        assert!(!queue.dismiss(id));
    }

    #[test]
    fn test_queue_cap_evicts_oldest() {
        let queue = ToastQueue::new();
        let first = queue.push(ToastLevel::Info, "one");
        for n in 0..MAX_PENDING_TOASTS {
            queue.push(ToastLevel::Info, format!("more-{n}"));
        }

        assert_eq!(queue.len(), MAX_PENDING_TOASTS);
        assert!(!queue.dismiss(first));
    }

    #[test]
    fn test_tick_expires_finite_toasts() {
        let queue = ToastQueue::new();
        queue.push_with(ToastLevel::Success, "saved", None, TOAST_TICK_RATE_MS);
        queue.push_with(ToastLevel::Error, "sticky", None, NO_AUTO_DISMISS);

        queue.tick();
        let remaining = queue.rendered().get();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "sticky");

        // Sticky toasts survive any number of ticks.
        queue.tick();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_rendered_tracks_mutations() {
        let queue = ToastQueue::new();
        let mut watcher = queue.rendered().watch();

        queue.push(ToastLevel::Warning, "weak signal");
        let snapshot = watcher.poll().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].level, ToastLevel::Warning);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(ToastLevel::Info.label(), "info");
        assert_eq!(ToastLevel::Error.label(), "error");
    }
}
