//! # cb-core
//!
//! Core domain models and board-browsing logic for ChurchBoard.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the post model, pagination math, and the port traits
//! implemented by the persistence layer.

// Public module exports
pub mod board;
pub mod ids;
pub mod pagination;
pub mod ports;
pub mod youtube;

// Re-export commonly used types at the crate root
pub use board::{BoardKind, Post};
pub use ids::{AuthorId, PostId};
pub use pagination::{PageButton, PageControls, PageCursor};
