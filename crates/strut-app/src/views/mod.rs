//! # View State Module
//!
//! Data-only types the render boundaries mount and draw. Everything here
//! is serializable and carries no behavior beyond small invariant helpers;
//! selection, focus, and styling live in the frontends.

pub mod feed;
pub mod overlays;

pub use feed::FeedItem;
pub use overlays::{OverlayContent, OverlayOutcome};
