//! Feed service seams.
//!
//! The HTTP/query-cache layer is an external collaborator; the pagers only
//! see these traits. Implementations own transport, caching, and retries
//! of their own; the pagers own sequencing and termination.

use crate::errors::FeedError;
use async_trait::async_trait;
use strut_core::page::{Cursor, CursorPage, ScrollDirection, VoteCursor, VotePage};

/// A cursor-paginated feed endpoint.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Item type the endpoint serves.
    type Item: Clone + Send + Sync + 'static;

    /// Fetch the page continuing from `cursor`.
    ///
    /// [`Cursor::START`] asks for the head of the feed. The returned page
    /// must carry `None` as its continuation once the feed is exhausted.
    async fn fetch_page(&self, cursor: Cursor) -> Result<CursorPage<Self::Item>, FeedError>;
}

/// The bidirectional vote feed endpoint.
#[async_trait]
pub trait VoteSource: Send + Sync {
    /// Item type the endpoint serves.
    type Item: Clone + Send + Sync + 'static;

    /// Fetch the next page in `direction`.
    ///
    /// `cursor` is `None` for the initial load; the response seeds both
    /// directions' continuations.
    async fn fetch_page(
        &self,
        direction: ScrollDirection,
        cursor: Option<VoteCursor>,
    ) -> Result<VotePage<Self::Item>, FeedError>;
}
