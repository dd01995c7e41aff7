use anyhow::Result;
use async_trait::async_trait;

use crate::board::{BoardKind, Post};
use crate::ids::PostId;
use crate::pagination::PageCursor;

/// Fields a post author may change after publication. Creation timestamp
/// and view counter are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub youtube_video_id: Option<String>,
}

/// Ordered document store backing the three boards.
///
/// Each board is one collection sorted by `(created_at_ms desc, id desc)`.
/// `fetch_page` resumes strictly after a cursor without re-scanning earlier
/// pages; no snapshot isolation is assumed between calls.
#[async_trait]
pub trait BoardStorePort: Send + Sync {
    /// Total number of posts currently in the board collection.
    async fn count(&self, board: BoardKind) -> Result<u64>;

    /// Up to `limit` posts sorting strictly after `after` (from the top of
    /// the collection when `after` is `None`), newest first.
    async fn fetch_page(
        &self,
        board: BoardKind,
        after: Option<&PageCursor>,
        limit: usize,
    ) -> Result<Vec<Post>>;

    async fn get(&self, board: BoardKind, id: &PostId) -> Result<Option<Post>>;

    async fn insert(&self, post: &Post) -> Result<()>;

    async fn update(&self, board: BoardKind, id: &PostId, changes: &PostChanges) -> Result<()>;

    async fn delete(&self, board: BoardKind, id: &PostId) -> Result<()>;

    /// Bumps the view counter and returns the post-increment value.
    async fn increment_views(&self, board: BoardKind, id: &PostId) -> Result<i64>;
}
