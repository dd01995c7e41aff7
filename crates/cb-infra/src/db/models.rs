//! Diesel row structs for the post table, plus domain mappers.

use anyhow::Result;
use diesel::prelude::{Insertable, Queryable};

use cb_core::board::{BoardKind, Post};
use cb_core::ids::{AuthorId, PostId};

use crate::db::schema::t_post;

#[derive(Debug, Clone, Queryable)]
pub struct PostRow {
    pub id: String,
    pub board: String,
    pub title: String,
    pub content: String,
    pub author_uid: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub youtube_video_id: Option<String>,
    pub created_at_ms: i64,
    pub views: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = t_post)]
pub struct NewPostRow {
    pub id: String,
    pub board: String,
    pub title: String,
    pub content: String,
    pub author_uid: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub youtube_video_id: Option<String>,
    pub created_at_ms: i64,
    pub views: i64,
}

impl PostRow {
    pub fn into_domain(self) -> Result<Post> {
        let board = BoardKind::from_str(&self.board)
            .ok_or_else(|| anyhow::anyhow!("unknown board collection: {}", self.board))?;
        let mut post = Post::new(
            PostId::from_string(self.id),
            board,
            self.title,
            self.content,
            AuthorId::from_string(self.author_uid),
            self.author_name,
            self.author_email,
            self.youtube_video_id,
            self.created_at_ms,
        );
        post.views = self.views;
        Ok(post)
    }
}

impl NewPostRow {
    pub fn from_domain(post: &Post) -> Self {
        Self {
            id: post.id.inner().clone(),
            board: post.board.as_str().to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            author_uid: post.author_uid.inner().clone(),
            author_name: post.author_name.clone(),
            author_email: post.author_email.clone(),
            youtube_video_id: post.youtube_video_id.clone(),
            created_at_ms: post.created_at_ms,
            views: post.views,
        }
    }
}
