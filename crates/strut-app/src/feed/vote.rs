//! Bidirectional pagination for the vote screen.
//!
//! The vote feed scrolls both ways: upward toward older entries and
//! downward toward newer ones, with an opaque continuation per direction.
//! The machine is the same as [`FeedPager`](crate::feed::FeedPager) with
//! two lanes: one fetch in flight across both directions, per-direction
//! terminal exhaustion, `Up` pages prepended and `Down` pages appended so
//! the accumulated list stays in display order.

use crate::errors::FeedError;
use crate::feed::pager::ExtendResult;
use crate::feed::source::VoteSource;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strut_core::page::{ScrollDirection, VoteCursor, VotePage};
use strut_core::{Observable, Observer};
use tracing::{debug, warn};

/// Continuation state for one scroll direction.
#[derive(Debug, Clone, Default)]
struct Lane {
    cursor: Option<VoteCursor>,
    exhausted: bool,
}

struct VoteState<T> {
    items: Vec<T>,
    fetching: bool,
    /// False until the initial load seeds both lanes.
    primed: bool,
    up: Lane,
    down: Lane,
    error: Option<FeedError>,
}

/// What the render boundary sees of a vote pagination session.
#[derive(Debug, Clone)]
pub struct VoteSnapshot<T> {
    /// Accumulated items in display order (older first).
    pub items: Vec<T>,
    /// Whether a fetch is in flight.
    pub fetching: bool,
    /// No more pages above.
    pub up_exhausted: bool,
    /// No more pages below.
    pub down_exhausted: bool,
    /// Error behind the last failed fetch, for the retry affordance.
    pub error: Option<FeedError>,
}

impl<T> Default for VoteSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            fetching: false,
            up_exhausted: false,
            down_exhausted: false,
            error: None,
        }
    }
}

/// Pagination controller for the bidirectional vote feed.
///
/// Like the main pager, instantiated per view with a matching lifetime.
pub struct VoteFeedPager<S: VoteSource> {
    source: Arc<S>,
    state: Mutex<VoteState<S::Item>>,
    snapshot: Observable<VoteSnapshot<S::Item>>,
    active: AtomicBool,
}

impl<S: VoteSource> VoteFeedPager<S> {
    /// Create a pager; the first [`extend`](Self::extend) in either
    /// direction performs the initial load and seeds both lanes.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            state: Mutex::new(VoteState {
                items: Vec::new(),
                fetching: false,
                primed: false,
                up: Lane::default(),
                down: Lane::default(),
                error: None,
            }),
            snapshot: Observable::new(VoteSnapshot::default()),
            active: AtomicBool::new(true),
        }
    }

    /// Fetch the next page in `direction` if the machine allows it.
    ///
    /// Skips without touching the network when any fetch is in flight
    /// (across both directions), when that direction is exhausted, or when
    /// the pager is closed.
    pub async fn extend(&self, direction: ScrollDirection) -> ExtendResult {
        let cursor = {
            let mut state = self.state.lock();
            if !self.active.load(Ordering::Acquire) || state.fetching {
                debug!(%direction, "vote page fetch skipped");
                return ExtendResult::Skipped;
            }
            let lane = match direction {
                ScrollDirection::Up => &state.up,
                ScrollDirection::Down => &state.down,
            };
            if lane.exhausted {
                debug!(%direction, "vote direction exhausted, fetch skipped");
                return ExtendResult::Skipped;
            }
            let cursor = if state.primed { lane.cursor.clone() } else { None };
            state.fetching = true;
            self.publish_locked(&state);
            cursor
        };

        debug!(%direction, "requesting vote page");
        match self.source.fetch_page(direction, cursor).await {
            Ok(page) => self.apply_page(direction, page),
            Err(error) => self.apply_failure(direction, error),
        }
    }

    /// Mark the owning view unmounted; late responses are discarded.
    pub fn close(&self) {
        self.active.store(false, Ordering::Release);
        debug!("vote pager closed");
    }

    /// Whether the owning view is still mounted.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Whether a direction has no further pages.
    pub fn is_exhausted(&self, direction: ScrollDirection) -> bool {
        let state = self.state.lock();
        match direction {
            ScrollDirection::Up => state.up.exhausted,
            ScrollDirection::Down => state.down.exhausted,
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> VoteSnapshot<S::Item> {
        self.snapshot.get()
    }

    /// Watch for snapshot changes.
    pub fn watch(&self) -> Observer<VoteSnapshot<S::Item>> {
        self.snapshot.watch()
    }

    fn apply_page(&self, direction: ScrollDirection, page: VotePage<S::Item>) -> ExtendResult {
        let mut state = self.state.lock();
        if !self.active.load(Ordering::Acquire) {
            warn!("discarding vote page for closed pager");
            return ExtendResult::Skipped;
        }
        if !state.fetching {
            warn!("discarding unexpected vote page");
            return ExtendResult::Skipped;
        }

        state.fetching = false;
        state.error = None;
        let added = page.items.len();

        match direction {
            ScrollDirection::Up => {
                // Keep the page's own order; the whole block sits above
                // what is already loaded.
                let mut merged = page.items;
                merged.append(&mut state.items);
                state.items = merged;
            }
            ScrollDirection::Down => state.items.extend(page.items),
        }

        if state.primed {
            // A continuation response refreshes only its own lane.
            let lane = match direction {
                ScrollDirection::Up => &mut state.up,
                ScrollDirection::Down => &mut state.down,
            };
            lane.cursor = match direction {
                ScrollDirection::Up => page.next_cursor_to_up_scroll,
                ScrollDirection::Down => page.next_cursor_to_down_scroll,
            };
            lane.exhausted = lane.cursor.is_none();
        } else {
            // The initial load seeds both lanes.
            state.up.cursor = page.next_cursor_to_up_scroll;
            state.up.exhausted = state.up.cursor.is_none();
            state.down.cursor = page.next_cursor_to_down_scroll;
            state.down.exhausted = state.down.cursor.is_none();
            state.primed = true;
        }

        let exhausted_now = match direction {
            ScrollDirection::Up => state.up.exhausted,
            ScrollDirection::Down => state.down.exhausted,
        };
        self.publish_locked(&state);
        debug!(%direction, added, exhausted = exhausted_now, "vote page applied");

        if exhausted_now {
            ExtendResult::Exhausted { added }
        } else {
            ExtendResult::Appended { added }
        }
    }

    fn apply_failure(&self, direction: ScrollDirection, error: FeedError) -> ExtendResult {
        let mut state = self.state.lock();
        if !self.active.load(Ordering::Acquire) {
            warn!("discarding vote page failure for closed pager");
            return ExtendResult::Skipped;
        }
        if !state.fetching {
            warn!("discarding unexpected vote page failure");
            return ExtendResult::Skipped;
        }

        // Lanes stay put so a later attempt resumes the same page.
        state.fetching = false;
        state.error = Some(error.clone());
        self.publish_locked(&state);
        warn!(%direction, %error, "vote page fetch failed");
        ExtendResult::Failed(error)
    }

    fn publish_locked(&self, state: &VoteState<S::Item>) {
        self.snapshot.set(VoteSnapshot {
            items: state.items.clone(),
            fetching: state.fetching,
            up_exhausted: state.up.exhausted,
            down_exhausted: state.down.exhausted,
            error: state.error.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::FutureExt;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct ScriptedVoteSource {
        responses: Mutex<VecDeque<Result<VotePage<u32>, FeedError>>>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedVoteSource {
        fn new(responses: Vec<Result<VotePage<u32>, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                gate: None,
            })
        }

        fn gated(
            responses: Vec<Result<VotePage<u32>, FeedError>>,
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
    impl VoteSource for ScriptedVoteSource {
        type Item = u32;

        async fn fetch_page(
            &self,
            _direction: ScrollDirection,
            _cursor: Option<VoteCursor>,
        ) -> Result<VotePage<u32>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(FeedError::decode("script exhausted")))
        }
    }

    fn page(
        items: Vec<u32>,
        up: Option<&str>,
        down: Option<&str>,
        direction: ScrollDirection,
    ) -> VotePage<u32> {
        VotePage {
            items,
            next_cursor_to_up_scroll: up.map(VoteCursor::new),
            next_cursor_to_down_scroll: down.map(VoteCursor::new),
            direction,
        }
    }

    #[tokio::test]
    async fn test_initial_load_seeds_both_lanes() {
        let source = ScriptedVoteSource::new(vec![Ok(page(
            vec![5, 6],
            Some("u-1"),
            Some("d-1"),
            ScrollDirection::Down,
        ))]);
        let pager = VoteFeedPager::new(source);

        let result = pager.extend(ScrollDirection::Down).await;
        assert_eq!(result, ExtendResult::Appended { added: 2 });
        assert!(!pager.is_exhausted(ScrollDirection::Up));
        assert!(!pager.is_exhausted(ScrollDirection::Down));
        assert_eq!(pager.snapshot().items, vec![5, 6]);
    }

    #[tokio::test]
    async fn test_up_prepends_down_appends() {
        let source = ScriptedVoteSource::new(vec![
            Ok(page(
                vec![5, 6],
                Some("u-1"),
                Some("d-1"),
                ScrollDirection::Down,
            )),
            Ok(page(vec![3, 4], Some("u-2"), None, ScrollDirection::Up)),
            Ok(page(vec![7, 8], None, Some("d-2"), ScrollDirection::Down)),
        ]);
        let pager = VoteFeedPager::new(source);

        pager.extend(ScrollDirection::Down).await;
        pager.extend(ScrollDirection::Up).await;
        pager.extend(ScrollDirection::Down).await;

        assert_eq!(pager.snapshot().items, vec![3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn test_per_direction_exhaustion_is_terminal() {
        let source = ScriptedVoteSource::new(vec![
            Ok(page(
                vec![1],
                None,
                Some("d-1"),
                ScrollDirection::Down,
            )),
            Ok(page(vec![2], Some("u-9"), Some("d-2"), ScrollDirection::Down)),
        ]);
        let pager = VoteFeedPager::new(source.clone());

        // Initial load: upward lane comes back exhausted.
        pager.extend(ScrollDirection::Down).await;
        assert!(pager.is_exhausted(ScrollDirection::Up));

        // Upward signals no longer reach the network; downward still does.
        assert_eq!(pager.extend(ScrollDirection::Up).await, ExtendResult::Skipped);
        assert_eq!(
            pager.extend(ScrollDirection::Down).await,
            ExtendResult::Appended { added: 1 }
        );
        // A continuation response only refreshes its own lane.
        assert!(pager.is_exhausted(ScrollDirection::Up));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_flight_spans_both_directions() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedVoteSource::gated(
            vec![Ok(page(
                vec![1],
                Some("u-1"),
                Some("d-1"),
                ScrollDirection::Down,
            ))],
            gate.clone(),
        );
        let pager = VoteFeedPager::new(source.clone());

        let mut first = Box::pin(pager.extend(ScrollDirection::Down));
        assert!((&mut first).now_or_never().is_none());

        // The opposite direction is also blocked while a fetch is out.
        assert_eq!(pager.extend(ScrollDirection::Up).await, ExtendResult::Skipped);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        gate.notify_one();
        assert_eq!(first.await, ExtendResult::Appended { added: 1 });
    }

    #[tokio::test]
    async fn test_failure_keeps_lanes_for_retry() {
        let source = ScriptedVoteSource::new(vec![
            Ok(page(
                vec![1],
                Some("u-1"),
                Some("d-1"),
                ScrollDirection::Down,
            )),
            Err(FeedError::network("flaky link")),
            Ok(page(vec![2], Some("u-1"), Some("d-2"), ScrollDirection::Down)),
        ]);
        let pager = VoteFeedPager::new(source);

        pager.extend(ScrollDirection::Down).await;
        let failed = pager.extend(ScrollDirection::Down).await;
        assert_eq!(failed, ExtendResult::Failed(FeedError::network("flaky link")));

        let snapshot = pager.snapshot();
        assert_eq!(snapshot.items, vec![1]);
        assert!(snapshot.error.is_some());
        assert!(!snapshot.down_exhausted);

        // The same direction can re-attempt and succeed.
        assert_eq!(
            pager.extend(ScrollDirection::Down).await,
            ExtendResult::Appended { added: 1 }
        );
        assert_eq!(pager.snapshot().items, vec![1, 2]);
        assert_eq!(pager.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_closed_pager_discards_vote_response() {
        let gate = Arc::new(Notify::new());
        let source = ScriptedVoteSource::gated(
            vec![Ok(page(
                vec![1],
                Some("u-1"),
                Some("d-1"),
                ScrollDirection::Down,
            ))],
            gate.clone(),
        );
        let pager = VoteFeedPager::new(source);

        let mut pending = Box::pin(pager.extend(ScrollDirection::Down));
        assert!((&mut pending).now_or_never().is_none());

        pager.close();
        gate.notify_one();
        assert_eq!(pending.await, ExtendResult::Skipped);
        assert!(pager.snapshot().items.is_empty());
    }
}
