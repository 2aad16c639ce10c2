//! Per-view wiring of a pager to its viewport watcher.
//!
//! A feed view owns exactly one [`FeedSession`]. The session attaches the
//! intersection watcher, forwards enter-viewport signals to the pager on a
//! tokio task, detaches the watcher for good once the feed exhausts, and
//! tears everything down when the view unmounts (drop).

use crate::feed::pager::{ExtendResult, FeedPager, FeedSnapshot};
use crate::feed::source::FeedSource;
use crate::feed::watcher::{IntersectionWatcher, ViewportSensor};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use strut_core::Observer;
use tracing::debug;

/// One feed view's pagination session.
///
/// Created unarmed; call [`arm`](Self::arm) once the container is mounted
/// and a platform sensor is available. All state flows out through
/// [`watch`](Self::watch)/[`snapshot`](Self::snapshot).
pub struct FeedSession<S: FeedSource> {
    pager: Arc<FeedPager<S>>,
    watcher: Mutex<Option<IntersectionWatcher>>,
}

impl<S: FeedSource + 'static> FeedSession<S> {
    /// Create a session over `source`.
    pub fn new(source: Arc<S>) -> Arc<Self> {
        Arc::new(Self {
            pager: Arc::new(FeedPager::new(source)),
            watcher: Mutex::new(None),
        })
    }

    /// Attach the viewport watcher for `container_id`.
    ///
    /// Each enter-viewport signal schedules one `extend` attempt on the
    /// current tokio runtime; the pager's single-flight guard makes bursts
    /// of signals harmless. Re-arming replaces (and detaches) any previous
    /// watcher.
    ///
    /// Must be called within a tokio runtime.
    pub fn arm<Sensor>(self: &Arc<Self>, sensor: &Sensor, container_id: impl Into<String>)
    where
        Sensor: ViewportSensor + ?Sized,
    {
        let weak: Weak<Self> = Arc::downgrade(self);
        let watcher = IntersectionWatcher::attach(sensor, container_id, move || {
            let Some(session) = weak.upgrade() else {
                return;
            };
            // The task holds the pager, not the session: an unmount mid-
            // fetch must still run the session's teardown.
            let pager = session.pager.clone();
            let weak = Weak::clone(&weak);
            drop(session);
            tokio::spawn(async move {
                pager.extend().await;
                if pager.is_exhausted() {
                    if let Some(session) = weak.upgrade() {
                        session.disarm();
                    }
                }
            });
        });
        *self.watcher.lock() = Some(watcher);
    }

    /// Fetch the next page now.
    ///
    /// Used by the watcher forwarding task and by explicit retry
    /// affordances. Once the pager reports exhaustion the watcher is
    /// detached so the sensor never fires into a finished session.
    pub async fn extend_now(&self) -> ExtendResult {
        let result = self.pager.extend().await;
        if self.pager.is_exhausted() {
            self.disarm();
        }
        result
    }

    /// Re-attempt after a failed fetch, from the same cursor.
    pub async fn retry(&self) -> ExtendResult {
        let result = self.pager.retry().await;
        if self.pager.is_exhausted() {
            self.disarm();
        }
        result
    }

    /// Detach the viewport watcher, if armed.
    pub fn disarm(&self) {
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.detach();
            debug!("feed session disarmed");
        }
    }

    /// Whether a watcher is currently attached.
    pub fn is_armed(&self) -> bool {
        self.watcher.lock().is_some()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot<S::Item> {
        self.pager.snapshot()
    }

    /// Watch for snapshot changes.
    pub fn watch(&self) -> Observer<FeedSnapshot<S::Item>> {
        self.pager.watch()
    }

    /// The underlying pager, for state inspection.
    pub fn pager(&self) -> &Arc<FeedPager<S>> {
        &self.pager
    }
}

impl<S: FeedSource> Drop for FeedSession<S> {
    fn drop(&mut self) {
        // The view unmounted: discard any in-flight response and stop the
        // sensor. The watcher also detaches itself on drop; going through
        // disarm here keeps the log trail consistent.
        self.pager.close();
        if let Some(watcher) = self.watcher.lock().take() {
            watcher.detach();
        }
    }
}
