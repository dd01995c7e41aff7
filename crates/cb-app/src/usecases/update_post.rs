//! Use case for editing an existing post. Author-only.

use std::sync::Arc;

use thiserror::Error;

use cb_core::board::BoardKind;
use cb_core::ids::{AuthorId, PostId};
use cb_core::ports::{BoardStorePort, PostChanges};
use cb_core::youtube;

#[derive(Debug, Clone)]
pub struct UpdatePostInput {
    pub board: BoardKind,
    pub id: PostId,
    /// Uid of the user requesting the edit; must match the post author.
    pub editor_uid: AuthorId,
    pub title: String,
    pub content: String,
    pub youtube_link: Option<String>,
}

#[derive(Debug, Error)]
pub enum UpdatePostError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("only the author may edit a post")]
    NotAuthor,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("not a valid YouTube link: {0}")]
    InvalidYoutubeLink(String),

    #[error("store error: {0}")]
    Store(String),
}

pub struct UpdatePost {
    store: Arc<dyn BoardStorePort>,
}

impl UpdatePost {
    pub fn new(store: Arc<dyn BoardStorePort>) -> Self {
        Self { store }
    }

    /// Rewrites title, content and video link. Creation timestamp and view
    /// counter are preserved, so the post keeps its place and rank in the
    /// board order.
    pub async fn execute(&self, input: UpdatePostInput) -> Result<(), UpdatePostError> {
        let post = self
            .store
            .get(input.board, &input.id)
            .await
            .map_err(|err| UpdatePostError::Store(err.to_string()))?
            .ok_or_else(|| UpdatePostError::NotFound(input.id.to_string()))?;

        if post.author_uid != input.editor_uid {
            return Err(UpdatePostError::NotAuthor);
        }

        let title = input.title.trim().to_string();
        let content = input.content.trim().to_string();
        if title.is_empty() {
            return Err(UpdatePostError::EmptyTitle);
        }
        if content.is_empty() {
            return Err(UpdatePostError::EmptyContent);
        }

        let youtube_video_id = match input.youtube_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => Some(
                youtube::video_id_from_url(link)
                    .ok_or_else(|| UpdatePostError::InvalidYoutubeLink(link.to_string()))?,
            ),
            _ => None,
        };

        let changes = PostChanges {
            title,
            content,
            youtube_video_id,
        };
        self.store
            .update(input.board, &input.id, &changes)
            .await
            .map_err(|err| UpdatePostError::Store(err.to_string()))?;

        tracing::info!(board = %input.board, id = %input.id, "post updated");
        Ok(())
    }
}
