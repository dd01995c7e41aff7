//! In-memory `BoardStorePort` used by the use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use cb_core::board::{BoardKind, Post};
use cb_core::ids::PostId;
use cb_core::pagination::PageCursor;
use cb_core::ports::{BoardStorePort, PostChanges};

#[derive(Default)]
pub struct InMemoryBoardStore {
    posts: Mutex<HashMap<(BoardKind, PostId), Post>>,
}

impl InMemoryBoardStore {
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let store = Self::default();
        {
            let mut map = store.posts.lock().unwrap();
            for post in posts {
                map.insert((post.board, post.id.clone()), post);
            }
        }
        store
    }
}

#[async_trait]
impl BoardStorePort for InMemoryBoardStore {
    async fn count(&self, board: BoardKind) -> Result<u64> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.keys().filter(|(b, _)| *b == board).count() as u64)
    }

    async fn fetch_page(
        &self,
        board: BoardKind,
        after: Option<&PageCursor>,
        limit: usize,
    ) -> Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        let mut page: Vec<Post> = posts
            .values()
            .filter(|p| p.board == board)
            .filter(|p| match after {
                Some(cursor) => cursor.precedes(p.created_at_ms, &p.id),
                None => true,
            })
            .cloned()
            .collect();
        page.sort_by(|a, b| {
            b.created_at_ms
                .cmp(&a.created_at_ms)
                .then_with(|| b.id.cmp(&a.id))
        });
        page.truncate(limit);
        Ok(page)
    }

    async fn get(&self, board: BoardKind, id: &PostId) -> Result<Option<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.get(&(board, id.clone())).cloned())
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        posts.insert((post.board, post.id.clone()), post.clone());
        Ok(())
    }

    async fn update(&self, board: BoardKind, id: &PostId, changes: &PostChanges) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&(board, id.clone()))
            .ok_or_else(|| anyhow::anyhow!("post not found: {id}"))?;
        post.title = changes.title.clone();
        post.content = changes.content.clone();
        post.youtube_video_id = changes.youtube_video_id.clone();
        Ok(())
    }

    async fn delete(&self, board: BoardKind, id: &PostId) -> Result<()> {
        let mut posts = self.posts.lock().unwrap();
        posts
            .remove(&(board, id.clone()))
            .ok_or_else(|| anyhow::anyhow!("post not found: {id}"))?;
        Ok(())
    }

    async fn increment_views(&self, board: BoardKind, id: &PostId) -> Result<i64> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .get_mut(&(board, id.clone()))
            .ok_or_else(|| anyhow::anyhow!("post not found: {id}"))?;
        post.views += 1;
        Ok(post.views)
    }
}
