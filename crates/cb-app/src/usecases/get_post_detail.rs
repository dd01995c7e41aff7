//! Use case for the post detail view.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use cb_core::board::BoardKind;
use cb_core::ids::PostId;
use cb_core::ports::BoardStorePort;
use cb_core::youtube;

/// Detail projection for the view page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_display: String,
    /// `YYYY.MM.DD`.
    pub created_date: String,
    /// View count including this visit.
    pub views: i64,
    pub youtube_embed_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum PostDetailError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),
}

pub struct GetPostDetail {
    store: Arc<dyn BoardStorePort>,
}

impl GetPostDetail {
    pub fn new(store: Arc<dyn BoardStorePort>) -> Self {
        Self { store }
    }

    /// Fetches one post and bumps its view counter. A failed bump is logged
    /// and never fails the read; the detail then shows the stored count.
    pub async fn execute(
        &self,
        board: BoardKind,
        id: &PostId,
    ) -> Result<PostDetail, PostDetailError> {
        let post = self
            .store
            .get(board, id)
            .await
            .map_err(|err| PostDetailError::Store(err.to_string()))?
            .ok_or_else(|| PostDetailError::NotFound(id.to_string()))?;

        let views = match self.store.increment_views(board, id).await {
            Ok(views) => views,
            Err(err) => {
                tracing::warn!(board = %board, id = %id, error = %err, "view count bump failed");
                post.views
            }
        };

        let author_display = post.author_display();
        let created_date = post.created_date();
        let youtube_embed_url = post.youtube_video_id.as_deref().map(youtube::embed_url);

        Ok(PostDetail {
            id: post.id.into_inner(),
            title: post.title,
            content: post.content,
            author_display,
            created_date,
            views,
            youtube_embed_url,
        })
    }
}
