//! Pagination math for the board browser.
//!
//! A board collection is ordered by `(created_at_ms desc, id desc)` and may
//! grow or shrink between queries. Pages are addressed by cursor, never by
//! offset, and display ranks are derived from a total count pinned once per
//! browsing session.

use serde::{Deserialize, Serialize};

use crate::ids::PostId;

/// Opaque position token: the sort key of the last post returned for some
/// page N. Only usable to fetch page N + 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub created_at_ms: i64,
    pub id: PostId,
}

impl PageCursor {
    /// True when `other` sorts strictly after this cursor in the board
    /// order (older timestamp, or equal timestamp with a smaller id).
    pub fn precedes(&self, created_at_ms: i64, id: &PostId) -> bool {
        created_at_ms < self.created_at_ms
            || (created_at_ms == self.created_at_ms && *id < self.id)
    }
}

/// `ceil(total_count / page_size)`; zero pages for an empty collection.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    debug_assert!(page_size > 0);
    (total_count.div_ceil(page_size as u64)) as u32
}

/// Human-facing sequence number for the item at `index_in_page` on
/// `page_number`: the newest post of the collection carries the highest
/// number, counting down to 1.
///
/// `total_count` must be the count captured when the session was sized, not
/// a per-page re-query. Returns `None` when the count is unknown/zero, or
/// when a non-positive rank signals that the pinned count has gone stale;
/// the renderer shows `-` in that case.
pub fn display_rank(
    total_count: u64,
    page_number: u32,
    index_in_page: usize,
    page_size: u32,
) -> Option<i64> {
    if total_count == 0 || page_number == 0 {
        return None;
    }
    let rank = total_count as i64
        - (page_number as i64 - 1) * page_size as i64
        - index_in_page as i64;
    if rank <= 0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            total_count,
            page_number,
            index_in_page,
            "stale total count produced a non-positive display rank"
        );
        return None;
    }
    Some(rank)
}

/// One entry of the page-number selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: u32,
    pub is_current: bool,
}

/// UI-agnostic description of the navigation controls under a board list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

impl PageControls {
    /// Pure function of the current position. An empty collection yields an
    /// empty control set: the selector is hidden, not rendered disabled.
    pub fn build(current_page: u32, total_pages: u32) -> Self {
        if total_pages == 0 {
            return Self {
                prev_enabled: false,
                next_enabled: false,
                buttons: Vec::new(),
            };
        }
        let buttons = (1..=total_pages)
            .map(|number| PageButton {
                number,
                is_current: number == current_page,
            })
            .collect();
        Self {
            prev_enabled: current_page > 1,
            next_enabled: current_page < total_pages,
            buttons,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
