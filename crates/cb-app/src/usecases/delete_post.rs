//! Use case for removing a post. Author-only.

use std::sync::Arc;

use thiserror::Error;

use cb_core::board::BoardKind;
use cb_core::ids::{AuthorId, PostId};
use cb_core::ports::BoardStorePort;

#[derive(Debug, Error)]
pub enum DeletePostError {
    #[error("post not found: {0}")]
    NotFound(String),

    #[error("only the author may delete a post")]
    NotAuthor,

    #[error("store error: {0}")]
    Store(String),
}

pub struct DeletePost {
    store: Arc<dyn BoardStorePort>,
}

impl DeletePost {
    pub fn new(store: Arc<dyn BoardStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        board: BoardKind,
        id: &PostId,
        requester_uid: &AuthorId,
    ) -> Result<(), DeletePostError> {
        let post = self
            .store
            .get(board, id)
            .await
            .map_err(|err| DeletePostError::Store(err.to_string()))?
            .ok_or_else(|| DeletePostError::NotFound(id.to_string()))?;

        if post.author_uid != *requester_uid {
            return Err(DeletePostError::NotAuthor);
        }

        self.store
            .delete(board, id)
            .await
            .map_err(|err| DeletePostError::Store(err.to_string()))?;

        tracing::info!(board = %board, id = %id, "post deleted");
        Ok(())
    }
}
