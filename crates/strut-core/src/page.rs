//! Cursor continuation contracts for the paginated feed APIs.
//!
//! The feed service pages with continuation cursors. Every page response
//! carries either the cursor to request next or an end-of-data sentinel
//! (`null` or a negative number on the wire). The sentinel is folded into
//! `Option` here, at the serde boundary, so controller code can never
//! mistake it for a real cursor.
//!
//! Two feed shapes exist upstream: the main feed pages downward with a
//! numeric cursor, and the vote feed pages in both scroll directions with
//! opaque string cursors, one per direction.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ─── Main feed ───────────────────────────────────────────────

/// Continuation cursor for the main feed.
///
/// Real cursors handed back by the service are non-negative. The one
/// negative value callers ever send is [`Cursor::START`], the
/// domain-defined first-request marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(i64);

impl Cursor {
    /// First-request cursor: asks the service for the head of the feed.
    pub const START: Cursor = Cursor(-1);

    /// Wrap a continuation value received from the service.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw wire value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether this is the first-request marker.
    pub fn is_start(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cursor-{}", self.0)
    }
}

impl From<i64> for Cursor {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One page of a cursor-paginated feed response.
///
/// Constructed by the feed service per request; immutable; consumed once by
/// the pagination controller to extend the accumulated item list and decide
/// whether to continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    /// Items in display order.
    pub items: Vec<T>,
    /// Cursor for the next request, or `None` when the feed is exhausted.
    #[serde(deserialize_with = "cursor_or_end")]
    pub next_cursor: Option<Cursor>,
}

impl<T> CursorPage<T> {
    /// A page with a continuation.
    pub fn new(items: Vec<T>, next_cursor: Cursor) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor),
        }
    }

    /// The terminal page: no more data after this one.
    pub fn end(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Whether this is the last page of the feed.
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fold the wire's end-of-data sentinel (`null` or negative) into `None`.
fn cursor_or_end<'de, D>(deserializer: D) -> Result<Option<Cursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| (value >= 0).then_some(Cursor(value))))
}

// ─── Vote feed ───────────────────────────────────────────────

/// Scroll direction on the vote screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Toward older entries above the viewport.
    Up,
    /// Toward newer entries below the viewport.
    Down,
}

impl ScrollDirection {
    /// Lowercase label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Opaque continuation token for the vote feed.
///
/// Treated as a black box by clients; only the service interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteCursor(String);

impl VoteCursor {
    /// Wrap a token received from the service.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoteCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of the bidirectional vote feed.
///
/// Carries a continuation per scroll direction; an absent or empty token
/// means that direction is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePage<T> {
    /// Items in display order for the fetched direction.
    pub items: Vec<T>,
    /// Continuation toward older entries, or `None` when exhausted upward.
    #[serde(deserialize_with = "vote_cursor_or_end")]
    pub next_cursor_to_up_scroll: Option<VoteCursor>,
    /// Continuation toward newer entries, or `None` when exhausted downward.
    #[serde(deserialize_with = "vote_cursor_or_end")]
    pub next_cursor_to_down_scroll: Option<VoteCursor>,
    /// Direction the service answered for.
    pub direction: ScrollDirection,
}

impl<T> VotePage<T> {
    /// The continuation for a direction.
    pub fn cursor_for(&self, direction: ScrollDirection) -> Option<&VoteCursor> {
        match direction {
            ScrollDirection::Up => self.next_cursor_to_up_scroll.as_ref(),
            ScrollDirection::Down => self.next_cursor_to_down_scroll.as_ref(),
        }
    }

    /// Whether a direction has no further pages.
    pub fn is_last(&self, direction: ScrollDirection) -> bool {
        self.cursor_for(direction).is_none()
    }
}

/// Fold the vote feed's end sentinel (`null` or empty token) into `None`.
fn vote_cursor_or_end<'de, D>(deserializer: D) -> Result<Option<VoteCursor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|token| (!token.is_empty()).then_some(VoteCursor(token))))
}
