use serde::{Deserialize, Serialize};

use crate::ids::{AuthorId, PostId};
use crate::pagination::PageCursor;

/// The three content boards of the site. Each maps to one collection
/// in the backing document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardKind {
    Notice,
    Dawn,
    Sermon,
}

impl BoardKind {
    /// Collection name in the backing store.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardKind::Notice => "notices",
            BoardKind::Dawn => "dawn",
            BoardKind::Sermon => "sermons",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "notices" => Some(BoardKind::Notice),
            "dawn" => Some(BoardKind::Dawn),
            "sermons" => Some(BoardKind::Sermon),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single board post as stored in the document collection.
///
/// Immutable from the browser's point of view, except for `views`,
/// which is bumped as a side effect of detail display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub board: BoardKind,
    pub title: String,
    pub content: String,
    pub author_uid: AuthorId,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    /// Sermon and dawn posts may embed a video; stored as the bare video id.
    pub youtube_video_id: Option<String>,
    pub created_at_ms: i64,
    pub views: i64,
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PostId,
        board: BoardKind,
        title: String,
        content: String,
        author_uid: AuthorId,
        author_name: Option<String>,
        author_email: Option<String>,
        youtube_video_id: Option<String>,
        created_at_ms: i64,
    ) -> Self {
        Self {
            id,
            board,
            title,
            content,
            author_uid,
            author_name,
            author_email,
            youtube_video_id,
            created_at_ms,
            views: 0,
        }
    }

    /// Position token for fetching the page that follows this post.
    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            created_at_ms: self.created_at_ms,
            id: self.id.clone(),
        }
    }

    /// Author name shown in lists and detail views, falling back to the
    /// account email when no display name was recorded.
    pub fn author_display(&self) -> String {
        self.author_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.author_email.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Creation date formatted as `YYYY.MM.DD`, or `-` when the
    /// timestamp does not resolve to a calendar date.
    pub fn created_date(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at_ms)
            .map(|dt| dt.format("%Y.%m.%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
