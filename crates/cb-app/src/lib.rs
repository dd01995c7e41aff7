//! ChurchBoard Application Layer
//!
//! This crate contains the board use cases and the pagination controller
//! that sits between the ordered document store and the rendering surface.

pub mod models;
pub mod usecases;

pub use models::{PageResult, PostRowView};
pub use usecases::{BoardBrowser, BrowseError, PageLoad};
