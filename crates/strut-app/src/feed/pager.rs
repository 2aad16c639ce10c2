//! The feed pagination state machine.
//!
//! Turns enter-viewport signals into cursor-continuing fetches with two
//! hard guarantees: at most one fetch in flight per pager, and no fetch
//! ever again once the feed reports exhaustion. Both are enforced by the
//! state machine itself, not by caller discipline: the only transition
//! that dispatches a fetch is `Idle`/`Failed` to `Fetching`, taken under
//! one lock.

use crate::errors::FeedError;
use crate::feed::source::FeedSource;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strut_core::page::Cursor;
use strut_core::{Observable, Observer};
use tracing::{debug, warn};

/// Phase of a pagination session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagerPhase {
    /// Not fetching; more data possibly available.
    Idle,
    /// A page request is in flight.
    Fetching,
    /// Terminal: the feed reported end-of-data. Only recreating the pager
    /// (a new feed or filter) resets this.
    Exhausted,
    /// The last fetch failed; recoverable back to fetching via retry.
    Failed,
}

impl PagerPhase {
    /// Whether this phase permits dispatching a fetch.
    pub fn can_fetch(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    /// Whether the session is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// What the render boundary sees of a pagination session.
#[derive(Debug, Clone)]
pub struct FeedSnapshot<T> {
    /// Accumulated items, in request order across pages.
    pub items: Vec<T>,
    /// Current phase.
    pub phase: PagerPhase,
    /// Error behind a `Failed` phase, for the retry affordance.
    pub error: Option<FeedError>,
}

impl<T> Default for FeedSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: PagerPhase::Idle,
            error: None,
        }
    }
}

/// Outcome of one [`FeedPager::extend`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendResult {
    /// A page arrived and its items were appended.
    Appended {
        /// Items the page added.
        added: usize,
    },
    /// The final page arrived; the session is exhausted.
    Exhausted {
        /// Items the final page added.
        added: usize,
    },
    /// No fetch was dispatched: one was already in flight, the session is
    /// exhausted or closed, or retry found nothing to retry.
    Skipped,
    /// The fetch failed; cursor and items are unchanged.
    Failed(FeedError),
}

struct PagerState<T> {
    phase: PagerPhase,
    cursor: Cursor,
    items: Vec<T>,
    error: Option<FeedError>,
}

/// Pagination controller for one feed view.
///
/// Instantiated per feed view, lifetime matching the view's; never shared
/// across feeds. Publishes a [`FeedSnapshot`] after every state change.
pub struct FeedPager<S: FeedSource> {
    source: Arc<S>,
    state: Mutex<PagerState<S::Item>>,
    snapshot: Observable<FeedSnapshot<S::Item>>,
    /// Cleared when the owning view unmounts; late responses are then
    /// discarded instead of mutating state nobody observes.
    active: AtomicBool,
}

impl<S: FeedSource> FeedPager<S> {
    /// Create a pager starting at [`Cursor::START`].
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(PagerState {
                phase: PagerPhase::Idle,
                cursor: Cursor::START,
                items: Vec::new(),
                error: None,
            }),
            snapshot: Observable::new(FeedSnapshot::default()),
            active: AtomicBool::new(true),
        }
    }

    /// Fetch the next page if the machine allows it.
    ///
    /// This is the enter-viewport entry point. Returns
    /// [`ExtendResult::Skipped`] without touching the network when a fetch
    /// is already in flight, the session is exhausted, or the pager is
    /// closed; rapid viewport oscillation therefore costs nothing.
    pub async fn extend(&self) -> ExtendResult {
        let cursor = {
            let mut state = self.state.lock();
            if !self.active.load(Ordering::Acquire) || !state.phase.can_fetch() {
                debug!(phase = ?state.phase, "page fetch skipped");
                return ExtendResult::Skipped;
            }
            state.phase = PagerPhase::Fetching;
            self.publish_locked(&state);
            state.cursor
        };

        debug!(%cursor, "requesting next feed page");
        match self.source.fetch_page(cursor).await {
            Ok(page) => self.apply_page(page),
            Err(error) => self.apply_failure(error),
        }
    }

    /// Re-attempt after a failure.
    ///
    /// The retry affordance: only dispatches when the pager sits in
    /// `Failed`, and then reissues the fetch with the same cursor the
    /// failed attempt used.
    pub async fn retry(&self) -> ExtendResult {
        if self.phase() != PagerPhase::Failed {
            return ExtendResult::Skipped;
        }
        self.extend().await
    }

    /// Mark the owning view unmounted.
    ///
    /// In-flight responses settle into the void: state stops changing and
    /// observers see nothing further.
    pub fn close(&self) {
        self.active.store(false, Ordering::Release);
        debug!("feed pager closed");
    }

    /// Whether the owning view is still mounted.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Current phase.
    pub fn phase(&self) -> PagerPhase {
        self.state.lock().phase
    }

    /// Whether the session has reached end-of-data.
    pub fn is_exhausted(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Cursor the next fetch would use.
    pub fn cursor(&self) -> Cursor {
        self.state.lock().cursor
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> FeedSnapshot<S::Item> {
        self.snapshot.get()
    }

    /// Watch for snapshot changes.
    pub fn watch(&self) -> Observer<FeedSnapshot<S::Item>> {
        self.snapshot.watch()
    }

    fn apply_page(&self, page: strut_core::page::CursorPage<S::Item>) -> ExtendResult {
        let mut state = self.state.lock();
        if !self.active.load(Ordering::Acquire) {
            warn!("discarding page response for closed pager");
            return ExtendResult::Skipped;
        }
        if state.phase != PagerPhase::Fetching {
            warn!(phase = ?state.phase, "discarding unexpected page response");
            return ExtendResult::Skipped;
        }

        let added = page.items.len();
        state.items.extend(page.items);
        state.error = None;
        let result = match page.next_cursor {
            Some(next) => {
                state.phase = PagerPhase::Idle;
                state.cursor = next;
                debug!(added, next = %next, "feed page appended");
                ExtendResult::Appended { added }
            }
            None => {
                state.phase = PagerPhase::Exhausted;
                debug!(added, total = state.items.len(), "feed exhausted");
                ExtendResult::Exhausted { added }
            }
        };
        self.publish_locked(&state);
        result
    }

    fn apply_failure(&self, error: FeedError) -> ExtendResult {
        let mut state = self.state.lock();
        if !self.active.load(Ordering::Acquire) {
            warn!("discarding page failure for closed pager");
            return ExtendResult::Skipped;
        }
        if state.phase != PagerPhase::Fetching {
            warn!(phase = ?state.phase, "discarding unexpected page failure");
            return ExtendResult::Skipped;
        }

        // Cursor and items stay put so a retry resumes the same page.
        state.phase = PagerPhase::Failed;
        state.error = Some(error.clone());
        self.publish_locked(&state);
        warn!(%error, cursor = %state.cursor, "feed page fetch failed");
        ExtendResult::Failed(error)
    }

    fn publish_locked(&self, state: &PagerState<S::Item>) {
        self.snapshot.set(FeedSnapshot {
            items: state.items.clone(),
            phase: state.phase,
            error: state.error.clone(),
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::FeedError;
    use async_trait::async_trait;
    use futures::FutureExt;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use strut_core::page::CursorPage;
    use tokio::sync::Notify;

    /// Scripted feed endpoint: pops pre-seeded responses, counting calls.
    pub(crate) struct ScriptedSource {
        responses: Mutex<VecDeque<Result<CursorPage<u32>, FeedError>>>,
        pub calls: AtomicUsize,
        /// When set, `fetch_page` parks until released.
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        pub fn new(responses: Vec<Result<CursorPage<u32>, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                gate: None,
            })
        }

        pub fn gated(
            responses: Vec<Result<CursorPage<u32>, FeedError>>,
            gate: Arc<Notify>,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            })
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedSource {
        type Item = u32;

        async fn fetch_page(&self, _cursor: Cursor) -> Result<CursorPage<u32>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(CursorPage::end(vec![])))
        }
    }

    #[tokio::test]
    async fn test_pages_accumulate_in_request_order() {
        let source = ScriptedSource::new(vec![
            Ok(CursorPage::new(vec![1, 2, 3], Cursor::new(5))),
            Ok(CursorPage::end(vec![4, 5, 6])),
        ]);
        let pager = FeedPager::new(source.clone());

        assert_eq!(pager.cursor(), Cursor::START);
        assert_eq!(pager.extend().await, ExtendResult::Appended { added: 3 });
        assert_eq!(pager.cursor(), Cursor::new(5));
        assert_eq!(pager.phase(), PagerPhase::Idle);

        assert_eq!(pager.extend().await, ExtendResult::Exhausted { added: 3 });
        assert_eq!(pager.snapshot().items, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pager.phase(), PagerPhase::Exhausted);
    }

    #[tokio::test]
    async fn test_exhausted_is_terminal() {
        let source = ScriptedSource::new(vec![Ok(CursorPage::end(vec![1]))]);
        let pager = FeedPager::new(source.clone());

        pager.extend().await;
        assert!(pager.is_exhausted());

        // Further viewport signals never reach the network.
        assert_eq!(pager.extend().await, ExtendResult::Skipped);
        assert_eq!(pager.extend().await, ExtendResult::Skipped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_flight_under_rapid_signals() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::gated(
            vec![Ok(CursorPage::new(vec![1], Cursor::new(2)))],
            gate.clone(),
        );
        let pager = FeedPager::new(source.clone());

        let mut first = Box::pin(pager.extend());
        // First poll dispatches the fetch and parks on the gate.
        assert!((&mut first).now_or_never().is_none());
        assert_eq!(pager.phase(), PagerPhase::Fetching);

        // A second signal while the fetch is pending is ignored outright.
        assert_eq!(pager.extend().await, ExtendResult::Skipped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        gate.notify_one();
        assert_eq!(first.await, ExtendResult::Appended { added: 1 });
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_preserves_cursor_and_items() {
        let source = ScriptedSource::new(vec![
            Ok(CursorPage::new(vec![1, 2], Cursor::new(7))),
            Err(FeedError::network("timeout")),
            Ok(CursorPage::end(vec![3])),
        ]);
        let pager = FeedPager::new(source.clone());

        pager.extend().await;
        let failed = pager.extend().await;
        assert_eq!(failed, ExtendResult::Failed(FeedError::network("timeout")));
        assert_eq!(pager.phase(), PagerPhase::Failed);
        assert_eq!(pager.cursor(), Cursor::new(7));
        assert_eq!(pager.snapshot().items, vec![1, 2]);
        assert_eq!(
            pager.snapshot().error,
            Some(FeedError::network("timeout"))
        );

        // Retry reissues the same cursor and the session completes.
        assert_eq!(pager.retry().await, ExtendResult::Exhausted { added: 1 });
        assert_eq!(pager.snapshot().items, vec![1, 2, 3]);
        assert_eq!(pager.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_retry_outside_failed_is_noop() {
        let source = ScriptedSource::new(vec![Ok(CursorPage::new(vec![1], Cursor::new(2)))]);
        let pager = FeedPager::new(source.clone());

        assert_eq!(pager.retry().await, ExtendResult::Skipped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_closed_pager_discards_response() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::gated(
            vec![Ok(CursorPage::new(vec![1], Cursor::new(2)))],
            gate.clone(),
        );
        let pager = FeedPager::new(source.clone());

        let mut pending = Box::pin(pager.extend());
        assert!((&mut pending).now_or_never().is_none());

        // The view unmounts while the fetch is in flight.
        pager.close();
        gate.notify_one();
        assert_eq!(pending.await, ExtendResult::Skipped);
        assert!(pager.snapshot().items.is_empty());

        // And nothing dispatches afterwards either.
        assert_eq!(pager.extend().await, ExtendResult::Skipped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_snapshot_observer_sees_each_phase() {
        let source = ScriptedSource::new(vec![Ok(CursorPage::end(vec![9]))]);
        let pager = FeedPager::new(source);
        let mut watcher = pager.watch();

        pager.extend().await;
        let snapshot = watcher.poll().unwrap();
        assert_eq!(snapshot.phase, PagerPhase::Exhausted);
        assert_eq!(snapshot.items, vec![9]);
    }
}
