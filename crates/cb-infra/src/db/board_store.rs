//! SQLite implementation of the board store.
//!
//! Pages are fetched by keyset, never by offset: the query resumes strictly
//! after the cursor's `(created_at_ms, id)` pair under the board order
//! `created_at_ms desc, id desc`, so page N + 1 costs one indexed scan
//! regardless of N.

use anyhow::Result;
use async_trait::async_trait;
use diesel::{BoolExpressionMethods, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};

use cb_core::board::{BoardKind, Post};
use cb_core::ids::PostId;
use cb_core::pagination::PageCursor;
use cb_core::ports::{BoardStorePort, PostChanges};

use crate::db::executor::DbExecutor;
use crate::db::models::{NewPostRow, PostRow};
use crate::db::schema::t_post;

pub struct DieselBoardStore<E> {
    executor: E,
}

impl<E> DieselBoardStore<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl<E> BoardStorePort for DieselBoardStore<E>
where
    E: DbExecutor,
{
    async fn count(&self, board: BoardKind) -> Result<u64> {
        self.executor.run(|conn| {
            let n: i64 = t_post::table
                .filter(t_post::board.eq(board.as_str()))
                .count()
                .get_result(conn)?;
            Ok(n as u64)
        })
    }

    async fn fetch_page(
        &self,
        board: BoardKind,
        after: Option<&PageCursor>,
        limit: usize,
    ) -> Result<Vec<Post>> {
        self.executor.run(|conn| {
            let mut query = t_post::table
                .filter(t_post::board.eq(board.as_str()))
                .into_boxed();

            if let Some(cursor) = after {
                query = query.filter(
                    t_post::created_at_ms.lt(cursor.created_at_ms).or(t_post::created_at_ms
                        .eq(cursor.created_at_ms)
                        .and(t_post::id.lt(cursor.id.inner().clone()))),
                );
            }

            let rows = query
                .order((t_post::created_at_ms.desc(), t_post::id.desc()))
                .limit(limit as i64)
                .load::<PostRow>(conn)?;

            rows.into_iter().map(PostRow::into_domain).collect()
        })
    }

    async fn get(&self, board: BoardKind, id: &PostId) -> Result<Option<Post>> {
        self.executor.run(|conn| {
            let row = t_post::table
                .filter(t_post::id.eq(id.as_ref()))
                .filter(t_post::board.eq(board.as_str()))
                .first::<PostRow>(conn)
                .optional()?;

            match row {
                Some(row) => Ok(Some(row.into_domain()?)),
                None => Ok(None),
            }
        })
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        self.executor.run(|conn| {
            diesel::insert_into(t_post::table)
                .values(&NewPostRow::from_domain(post))
                .execute(conn)?;
            Ok(())
        })
    }

    async fn update(&self, board: BoardKind, id: &PostId, changes: &PostChanges) -> Result<()> {
        self.executor.run(|conn| {
            let affected = diesel::update(
                t_post::table
                    .filter(t_post::id.eq(id.as_ref()))
                    .filter(t_post::board.eq(board.as_str())),
            )
            .set((
                t_post::title.eq(&changes.title),
                t_post::content.eq(&changes.content),
                t_post::youtube_video_id.eq(changes.youtube_video_id.as_deref()),
            ))
            .execute(conn)?;

            if affected == 0 {
                anyhow::bail!("post not found: {id}");
            }
            Ok(())
        })
    }

    async fn delete(&self, board: BoardKind, id: &PostId) -> Result<()> {
        self.executor.run(|conn| {
            let affected = diesel::delete(
                t_post::table
                    .filter(t_post::id.eq(id.as_ref()))
                    .filter(t_post::board.eq(board.as_str())),
            )
            .execute(conn)?;

            if affected == 0 {
                anyhow::bail!("post not found: {id}");
            }
            Ok(())
        })
    }

    async fn increment_views(&self, board: BoardKind, id: &PostId) -> Result<i64> {
        self.executor.run(|conn| {
            let affected = diesel::update(
                t_post::table
                    .filter(t_post::id.eq(id.as_ref()))
                    .filter(t_post::board.eq(board.as_str())),
            )
            .set(t_post::views.eq(t_post::views + 1))
            .execute(conn)?;

            if affected == 0 {
                anyhow::bail!("post not found: {id}");
            }

            let views = t_post::table
                .filter(t_post::id.eq(id.as_ref()))
                .filter(t_post::board.eq(board.as_str()))
                .select(t_post::views)
                .first::<i64>(conn)?;
            Ok(views)
        })
    }
}
