//! Strut Core - runtime-agnostic client primitives
//!
//! This crate holds the small, pure building blocks the Strut application
//! core is assembled from. Nothing in here knows about HTTP, rendering, or
//! an async runtime:
//!
//! - [`reactive`]: poll-based observable values. The app core publishes
//!   state snapshots; render boundaries (web, mobile) watch them on their
//!   own cadence.
//! - [`page`]: cursor continuation contracts for the paginated feed APIs,
//!   with end-of-data sentinels folded into `Option` at the serde boundary.
//! - [`identifiers`]: numeric identifier newtypes issued by the feed API.

#![forbid(unsafe_code)]

/// Feed and user identifier newtypes
pub mod identifiers;

/// Cursor continuation contracts for paginated feeds
pub mod page;

/// Poll-based observable values for render-boundary subscriptions
pub mod reactive;

pub use identifiers::{FeedId, UserId};
pub use page::{Cursor, CursorPage, ScrollDirection, VoteCursor, VotePage};
pub use reactive::{Observable, Observer};
