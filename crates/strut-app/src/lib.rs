//! Strut App - portable headless application core
//!
//! This crate is the behavior of the Strut client without any rendering:
//! frontends (mobile web, native shells) mount views from its observable
//! snapshots and forward user events into its operations. Two subsystems
//! carry the real invariants:
//!
//! - [`overlay`]: the process-wide modal/bottom-sheet stack. Call sites
//!   push a surface and await its dismissal result; the render boundary
//!   draws the published card list in stack order and forwards dismiss
//!   gestures back into `close`.
//! - [`feed`]: cursor pagination driven by viewport intersection, with
//!   single-flight fetches and terminal end-of-data detection, for both
//!   the one-way main feed and the bidirectional vote feed.
//!
//! Around them sit the ambient concerns every frontend needs:
//! [`notifications`] (toasts), [`errors`] (severity-routed failures),
//! [`config`], [`views`] (data-only view payloads), and [`core`] (the
//! [`AppCore`] container created once at startup).
//!
//! The HTTP layer, routing, auth, and styling are collaborators behind
//! narrow seams ([`feed::FeedSource`], [`feed::ViewportSensor`]); this
//! crate never performs I/O of its own.

#![forbid(unsafe_code)]

/// Application configuration defaults
pub mod config;

/// The application core container
pub mod core;

/// Categorized application errors
pub mod errors;

/// Feed pagination: sources, watcher, pagers, sessions
pub mod feed;

/// Toast lifecycle state
pub mod notifications;

/// The process-wide overlay stack
pub mod overlay;

/// Data-only view payload types
pub mod views;

pub use crate::core::AppCore;
pub use config::AppConfig;
pub use errors::{FeedError, OverlayError};

/// Convenience re-exports for frontend crates.
pub mod prelude {
    pub use crate::config::{AppConfig, FeedConfig};
    pub use crate::core::AppCore;
    pub use crate::errors::{FeedError, OverlayError};
    pub use crate::feed::{
        ExtendResult, FeedPager, FeedSession, FeedSnapshot, FeedSource, IntersectionWatcher,
        PagerPhase, SensorBinding, ViewportSensor, VoteFeedPager, VoteSource,
    };
    pub use crate::notifications::{Toast, ToastLevel, ToastQueue};
    pub use crate::overlay::{
        OverlayAnimation, OverlayCard, OverlayId, OverlayKind, OverlayRequest, OverlayStack,
        PendingDismissal,
    };
    pub use crate::views::{FeedItem, OverlayContent, OverlayOutcome};
    pub use strut_core::page::{Cursor, CursorPage, ScrollDirection, VoteCursor, VotePage};
    pub use strut_core::{FeedId, Observable, Observer, UserId};
}
