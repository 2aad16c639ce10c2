//! Observable values for render-boundary subscriptions.
//!
//! The application core mutates state inside discrete event callbacks (a
//! tap, a viewport-intersection signal, a network response). Render
//! boundaries redraw from snapshots. [`Observable`] is the seam between the
//! two: the core publishes a new snapshot with [`Observable::set`] or
//! [`Observable::update`], and each boundary polls its [`Observer`] for
//! changes on its own cadence.
//!
//! Subscriptions are poll-based and version-tracked rather than push-based,
//! which keeps this crate free of any async-runtime coupling. Rapid
//! consecutive updates coalesce: an observer always sees the latest
//! snapshot, never a queue of intermediate ones.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct Cell<T> {
    /// Current snapshot.
    value: RwLock<T>,
    /// Bumped on every publish; observers compare against the version they
    /// last saw.
    version: AtomicU64,
}

/// A shared value render boundaries can watch for changes.
///
/// Cloning an `Observable` clones the handle, not the value: all clones
/// publish to and read from the same cell.
#[derive(Clone)]
pub struct Observable<T> {
    cell: Arc<Cell<T>>,
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Create an observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(Cell {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Clone out the current snapshot.
    pub fn get(&self) -> T {
        self.cell.value.read().clone()
    }

    /// The number of publishes so far.
    pub fn version(&self) -> u64 {
        self.cell.version.load(Ordering::Acquire)
    }

    /// Replace the snapshot and notify observers.
    pub fn set(&self, value: T) {
        {
            let mut guard = self.cell.value.write();
            *guard = value;
        }
        self.cell.version.fetch_add(1, Ordering::Release);
    }

    /// Mutate the snapshot in place and notify observers.
    ///
    /// The closure runs under the write lock; keep it short and never call
    /// back into the observable from inside it.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut guard = self.cell.value.write();
            f(&mut guard);
        }
        self.cell.version.fetch_add(1, Ordering::Release);
    }

    /// Start watching for changes.
    ///
    /// The observer starts caught-up: it reports a change only for
    /// publishes that happen after this call.
    pub fn watch(&self) -> Observer<T> {
        Observer {
            cell: self.cell.clone(),
            seen: self.cell.version.load(Ordering::Acquire),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("version", &self.version())
            .finish()
    }
}

/// A polling subscription to an [`Observable`].
///
/// Each observer tracks the last version it delivered. [`Observer::poll`]
/// returns the new snapshot when the source has been published since, and
/// `None` otherwise.
pub struct Observer<T> {
    cell: Arc<Cell<T>>,
    seen: u64,
}

impl<T: Clone + Send + Sync + 'static> Observer<T> {
    /// Whether the source has been published since the last poll.
    pub fn has_changed(&self) -> bool {
        self.cell.version.load(Ordering::Acquire) > self.seen
    }

    /// Take the latest snapshot if one was published since the last poll.
    pub fn poll(&mut self) -> Option<T> {
        let current = self.cell.version.load(Ordering::Acquire);
        if current > self.seen {
            self.seen = current;
            Some(self.cell.value.read().clone())
        } else {
            None
        }
    }

    /// Clone out the current snapshot whether or not it changed.
    pub fn get(&self) -> T {
        self.cell.value.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let state = Observable::new(0);
        assert_eq!(state.get(), 0);

        state.set(7);
        assert_eq!(state.get(), 7);
        assert_eq!(state.version(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let names = Observable::new(vec!["a".to_string()]);
        names.update(|list| list.push("b".to_string()));

        assert_eq!(names.get(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(names.version(), 1);
    }

    #[test]
    fn test_clone_shares_cell() {
        let a = Observable::new(0);
        let b = a.clone();

        a.set(42);
        assert_eq!(b.get(), 42);
        assert_eq!(b.version(), 1);
    }

    #[test]
    fn test_observer_starts_caught_up() {
        let state = Observable::new(1);
        state.set(2);

        let mut watcher = state.watch();
        assert!(!watcher.has_changed());
        assert_eq!(watcher.poll(), None);
        assert_eq!(watcher.get(), 2);
    }

    #[test]
    fn test_observer_poll_cycle() {
        let state = Observable::new(0);
        let mut watcher = state.watch();

        state.set(1);
        assert!(watcher.has_changed());
        assert_eq!(watcher.poll(), Some(1));
        assert_eq!(watcher.poll(), None);

        state.set(2);
        assert_eq!(watcher.poll(), Some(2));
    }

    #[test]
    fn test_rapid_updates_coalesce() {
        let state = Observable::new(0);
        let mut watcher = state.watch();

        state.set(1);
        state.set(2);
        state.set(3);

        assert_eq!(watcher.poll(), Some(3));
        assert_eq!(watcher.poll(), None);
    }

    #[test]
    fn test_multiple_observers() {
        let state = Observable::new(0);
        let mut first = state.watch();
        let mut second = state.watch();

        state.set(9);
        assert_eq!(first.poll(), Some(9));
        assert_eq!(second.poll(), Some(9));
    }

    #[test]
    fn test_default() {
        let state: Observable<u32> = Observable::default();
        assert_eq!(state.get(), 0);
    }
}
