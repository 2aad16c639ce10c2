//! Overlay view payloads and dismissal outcomes.
//!
//! These are the concrete types the app instantiates the generic
//! [`OverlayStack`](crate::overlay::OverlayStack) with: what a surface
//! shows, and what it hands back to the caller that opened it.

use crate::overlay::OverlayRequest;
use crate::views::feed::FeedItem;
use serde::{Deserialize, Serialize};

/// What an overlay surface shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OverlayContent {
    /// Full-screen pager over a run of feed entries, opened from a grid
    /// tap; starts at `initial_index`.
    FeedDetail {
        /// The entries the pager swipes through.
        feeds: Vec<FeedItem>,
        /// Which entry is shown first.
        initial_index: usize,
    },
    /// Bottom-sheet editor for the profile introduction text.
    IntroduceEdit {
        /// Text the editor starts from.
        current_text: String,
    },
    /// Escape hatch for frontend-defined surfaces.
    Custom {
        /// Frontend registry key.
        name: String,
        /// Arbitrary payload forwarded untouched.
        props: serde_json::Value,
    },
}

impl OverlayContent {
    /// Request a feed detail dialog over `feeds`, opened at `initial_index`.
    pub fn feed_detail(feeds: Vec<FeedItem>, initial_index: usize) -> OverlayRequest<Self> {
        OverlayRequest::full_screen(Self::FeedDetail {
            feeds,
            initial_index,
        })
    }

    /// Request the introduction editor sheet over `current_text`.
    pub fn introduce_edit(current_text: impl Into<String>) -> OverlayRequest<Self> {
        OverlayRequest::bottom_sheet(Self::IntroduceEdit {
            current_text: current_text.into(),
        })
    }
}

/// What a dismissed overlay hands back to its opener.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "camelCase")]
pub enum OverlayOutcome {
    /// Closed without a result (backdrop tap, back navigation).
    #[default]
    Dismissed,
    /// An editor surface saved new text.
    Saved(String),
    /// Frontend-defined result payload.
    Value(serde_json::Value),
}

impl OverlayOutcome {
    /// Whether the overlay produced a result beyond plain dismissal.
    pub fn is_dismissed(&self) -> bool {
        matches!(self, Self::Dismissed)
    }
}
