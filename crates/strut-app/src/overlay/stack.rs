//! The process-wide overlay stack.

use super::entry::{
    OverlayAnimation, OverlayCard, OverlayId, OverlayKind, OverlayRequest, PendingDismissal,
};
use crate::errors::OverlayError;
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use strut_core::Observable;
use tracing::{debug, warn};

/// One live entry: the render payload plus the caller's resolver.
///
/// The resolver is taken exactly once; whichever settle path runs first
/// (close, reject, shutdown) consumes it, and the entry leaves the stack
/// with it.
struct Entry<V, R> {
    id: OverlayId,
    kind: OverlayKind,
    animation: OverlayAnimation,
    view: V,
    resolver: Option<oneshot::Sender<Result<R, OverlayError>>>,
}

struct StackInner<V, R> {
    entries: Mutex<Vec<Entry<V, R>>>,
    rendered: Observable<Vec<OverlayCard<V>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

/// Process-wide ordered stack of overlay entries.
///
/// Created once at application start (see [`crate::AppCore::new`]) and
/// shared by cloning the handle; there is no ambient global. Push order is
/// z-order: the most recently opened entry is topmost and takes
/// dismiss-on-backdrop precedence in the render boundary.
///
/// `V` is the view payload the render boundary mounts; `R` is the
/// dismissal result type callers await.
pub struct OverlayStack<V, R> {
    inner: Arc<StackInner<V, R>>,
}

impl<V, R> Clone for OverlayStack<V, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V, R> Default for OverlayStack<V, R>
where
    V: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, R> OverlayStack<V, R>
where
    V: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StackInner {
                entries: Mutex::new(Vec::new()),
                rendered: Observable::new(Vec::new()),
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Push an overlay and return the handle its caller awaits.
    ///
    /// Fails only with [`OverlayError::StackClosed`] when the application
    /// is tearing down, so callers observe a rejection instead of hanging.
    /// Normal dismissal always settles the returned handle with `Ok`.
    pub fn open(&self, request: OverlayRequest<V>) -> Result<PendingDismissal<R>, OverlayError> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(OverlayError::StackClosed);
        }

        let id = OverlayId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let animation = request
            .animation
            .unwrap_or_else(|| request.kind.default_animation());
        let (sender, receiver) = oneshot::channel();

        {
            let mut entries = self.inner.entries.lock();
            // Shutdown takes this lock before draining, so a racing open
            // either lands before the drain (and gets settled by it) or
            // sees the closed flag here.
            if self.inner.closed.load(Ordering::Acquire) {
                return Err(OverlayError::StackClosed);
            }
            entries.push(Entry {
                id,
                kind: request.kind,
                animation,
                view: request.view,
                resolver: Some(sender),
            });
        }
        self.publish();
        debug!(%id, kind = ?request.kind, depth = self.depth(), "overlay pushed");

        Ok(PendingDismissal::new(id, receiver))
    }

    /// Close an entry by id, settling its caller with `result`.
    ///
    /// The entry may sit anywhere in the stack; the rest keep their
    /// relative order. A second close for the same id is a benign no-op
    /// returning `false`: racing dismiss triggers (backdrop tap plus
    /// programmatic close) must not double-settle the caller.
    pub fn close_with(&self, id: OverlayId, result: R) -> bool {
        self.settle(id, Ok(result))
    }

    /// Close an entry by id with the default "dismissed" result.
    pub fn close(&self, id: OverlayId) -> bool
    where
        R: Default,
    {
        self.close_with(id, R::default())
    }

    /// Close the topmost entry, settling it with `result`.
    ///
    /// No-op returning `false` when the stack is empty.
    pub fn close_top_with(&self, result: R) -> bool {
        match self.top() {
            Some(id) => self.close_with(id, result),
            None => false,
        }
    }

    /// Close the topmost entry with the default "dismissed" result.
    pub fn close_top(&self) -> bool
    where
        R: Default,
    {
        self.close_top_with(R::default())
    }

    /// Report that an entry's view failed before mounting.
    ///
    /// Called by the render boundary; removes the entry and settles its
    /// caller with [`OverlayError::ViewConstruction`], so the original
    /// `open` flow observes the failure.
    pub fn reject(&self, id: OverlayId, reason: impl Into<String>) -> bool {
        self.settle(id, Err(OverlayError::construction(reason)))
    }

    /// Tear the stack down.
    ///
    /// Marks the stack closed (subsequent `open` calls fail fast), removes
    /// every entry, and settles each pending caller with
    /// [`OverlayError::StackClosed`].
    pub fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::Release);
        let drained = {
            let mut entries = self.inner.entries.lock();
            std::mem::take(&mut *entries)
        };
        self.publish();
        let pending = drained.len();
        for mut entry in drained {
            if let Some(resolver) = entry.resolver.take() {
                let _ = resolver.send(Err(OverlayError::StackClosed));
            }
        }
        debug!(pending, "overlay stack shut down");
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Number of open overlays.
    pub fn depth(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Whether no overlay is open.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }

    /// Id of the topmost entry, if any.
    pub fn top(&self) -> Option<OverlayId> {
        self.inner.entries.lock().last().map(|entry| entry.id)
    }

    /// Current render snapshot, oldest first.
    pub fn cards(&self) -> Vec<OverlayCard<V>> {
        self.inner.rendered.get()
    }

    /// The observable the render boundary watches for stack changes.
    pub fn rendered(&self) -> Observable<Vec<OverlayCard<V>>> {
        self.inner.rendered.clone()
    }

    /// Remove the entry matching `id` and settle its resolver.
    fn settle(&self, id: OverlayId, outcome: Result<R, OverlayError>) -> bool {
        let mut entry = {
            let mut entries = self.inner.entries.lock();
            let Some(position) = entries.iter().position(|entry| entry.id == id) else {
                warn!(%id, "close for unknown or already-closed overlay ignored");
                return false;
            };
            entries.remove(position)
        };
        self.publish();

        if let Some(resolver) = entry.resolver.take() {
            // The caller may have dropped its handle; nothing to do then.
            let _ = resolver.send(outcome);
        }
        debug!(%id, depth = self.depth(), "overlay closed");
        true
    }

    /// Publish the current entry list for subscribers.
    fn publish(&self) {
        let cards = {
            let entries = self.inner.entries.lock();
            entries
                .iter()
                .map(|entry| OverlayCard {
                    id: entry.id,
                    kind: entry.kind,
                    animation: entry.animation,
                    view: entry.view.clone(),
                })
                .collect::<Vec<_>>()
        };
        self.inner.rendered.set(cards);
    }
}
