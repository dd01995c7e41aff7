//! Use case for publishing a new board post.

use std::sync::Arc;

use thiserror::Error;

use cb_core::board::{BoardKind, Post};
use cb_core::ids::{AuthorId, PostId};
use cb_core::ports::{BoardStorePort, ClockPort};
use cb_core::youtube;

/// Input collected from the write form. The author fields come from the
/// identity provider, which is an external collaborator.
#[derive(Debug, Clone)]
pub struct NewPostInput {
    pub board: BoardKind,
    pub title: String,
    pub content: String,
    /// Raw link as typed; validated and reduced to a video id here.
    pub youtube_link: Option<String>,
    pub author_uid: AuthorId,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

#[derive(Debug, Error)]
pub enum CreatePostError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("not a valid YouTube link: {0}")]
    InvalidYoutubeLink(String),

    #[error("store error: {0}")]
    Store(String),
}

pub struct CreatePost {
    store: Arc<dyn BoardStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl CreatePost {
    pub fn new(store: Arc<dyn BoardStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self, input: NewPostInput) -> Result<PostId, CreatePostError> {
        let title = input.title.trim().to_string();
        let content = input.content.trim().to_string();
        if title.is_empty() {
            return Err(CreatePostError::EmptyTitle);
        }
        if content.is_empty() {
            return Err(CreatePostError::EmptyContent);
        }

        let youtube_video_id = match input.youtube_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => Some(
                youtube::video_id_from_url(link)
                    .ok_or_else(|| CreatePostError::InvalidYoutubeLink(link.to_string()))?,
            ),
            _ => None,
        };

        let post = Post::new(
            PostId::new(),
            input.board,
            title,
            content,
            input.author_uid,
            input.author_name,
            input.author_email,
            youtube_video_id,
            self.clock.now_ms(),
        );

        self.store
            .insert(&post)
            .await
            .map_err(|err| CreatePostError::Store(err.to_string()))?;

        tracing::info!(board = %post.board, id = %post.id, "post published");
        Ok(post.id)
    }
}
