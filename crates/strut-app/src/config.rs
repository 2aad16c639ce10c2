//! Application configuration defaults.
//!
//! Frontends construct an [`AppConfig`] at startup (or take the defaults)
//! and hand it to [`crate::AppCore::new`]. Values here parameterize the
//! core's own behavior; transport-level knobs (timeouts, retries) belong
//! to the HTTP collaborator.

use crate::notifications::DEFAULT_TOAST_DURATION_MS;
use serde::{Deserialize, Serialize};

/// Items requested per feed page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Container id the feed grid renders under; the viewport sensor observes
/// this container's trailing element.
pub const DEFAULT_FEED_CONTAINER_ID: &str = "feedList";

/// Feed pagination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Items requested per page.
    pub page_size: u32,
    /// Container the intersection watcher observes.
    pub container_id: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            container_id: DEFAULT_FEED_CONTAINER_ID.to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Feed pagination settings.
    pub feed: FeedConfig,
    /// Toast visible lifetime in milliseconds.
    pub toast_duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}
