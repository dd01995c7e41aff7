//! DTOs handed to the rendering layer for board lists.

use serde::Serialize;

use cb_core::board::Post;
use cb_core::pagination::PageControls;

/// One list row, ready for display. No domain types leak past this point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRowView {
    /// Human-facing sequence number; `None` renders as `-`.
    pub display_rank: Option<i64>,
    pub id: String,
    pub title: String,
    pub author_display: String,
    /// `YYYY.MM.DD`.
    pub created_date: String,
    pub views: i64,
    pub has_video: bool,
}

impl PostRowView {
    pub fn from_post(post: &Post, display_rank: Option<i64>) -> Self {
        Self {
            display_rank,
            id: post.id.inner().clone(),
            title: post.title.clone(),
            author_display: post.author_display(),
            created_date: post.created_date(),
            views: post.views,
            has_video: post.youtube_video_id.is_some(),
        }
    }
}

/// One loaded page plus the navigation state around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub page_number: u32,
    pub items: Vec<PostRowView>,
    pub has_prev: bool,
    pub has_next: bool,
    pub controls: PageControls,
}
