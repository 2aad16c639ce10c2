//! Feed item view state.

use serde::{Deserialize, Serialize};
use strut_core::{FeedId, UserId};

/// One posted feed entry as the feed endpoints serve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Entry identifier.
    pub id: FeedId,
    /// Posting member.
    pub user_id: UserId,
    /// Image to render; the asset layer resolves it.
    #[serde(rename = "imageURL")]
    pub image_url: String,
    /// Post time, ms since epoch.
    pub created_at_ms: u64,
    /// Votes received so far.
    pub vote_count: u32,
}
