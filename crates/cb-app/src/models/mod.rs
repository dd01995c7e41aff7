//! DTOs returned to the rendering layer.

mod page;

pub use page::{PageResult, PostRowView};
