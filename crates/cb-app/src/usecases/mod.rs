//! Business logic use cases.
//!
//! `BoardBrowser` is the stateful pagination controller; the remaining use
//! cases are one-shot operations against the board store.

pub mod browse_board;
pub mod create_post;
pub mod delete_post;
pub mod get_post_detail;
pub mod update_post;

#[cfg(test)]
pub(crate) mod test_support;

pub use browse_board::{BoardBrowser, BrowseError, PageLoad, POSTS_PER_PAGE};
pub use create_post::{CreatePost, CreatePostError, NewPostInput};
pub use delete_post::{DeletePost, DeletePostError};
pub use get_post_detail::{GetPostDetail, PostDetail, PostDetailError};
pub use update_post::{UpdatePost, UpdatePostError, UpdatePostInput};
