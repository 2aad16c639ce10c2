//! # Feed Pagination
//!
//! Orchestration for cursor-paginated feeds: viewport-intersection signals
//! in, correctly-sequenced page fetches out.
//!
//! - [`source`]: the async seams the HTTP layer implements.
//! - [`watcher`]: gates a platform viewport sensor behind an armed flag so
//!   nothing fires into torn-down state.
//! - [`pager`]: the state machine turning enter-viewport signals into
//!   single-flight, cursor-continuing fetches for the main feed.
//! - [`vote`]: the bidirectional variant for the vote screen.
//! - [`session`]: per-view wiring of a pager to its watcher.

pub mod pager;
pub mod session;
pub mod source;
pub mod vote;
pub mod watcher;

pub use pager::{ExtendResult, FeedPager, FeedSnapshot, PagerPhase};
pub use session::FeedSession;
pub use source::{FeedSource, VoteSource};
pub use vote::{VoteFeedPager, VoteSnapshot};
pub use watcher::{EnterSignal, IntersectionWatcher, SensorBinding, ViewportSensor};
