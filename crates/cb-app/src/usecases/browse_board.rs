//! Cursor-paginated board browsing.
//!
//! One `BoardBrowser` serves one browsing session over one board. The total
//! count is captured once per session by `refresh_total_count` and reused
//! for every rank computation; page boundaries are remembered as cursors so
//! page N + 1 never re-scans pages 1..N. Navigation requests carry a
//! sequence number and a response that is no longer the latest is dropped
//! without touching pagination state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use cb_core::board::BoardKind;
use cb_core::pagination::{display_rank, total_pages, PageControls, PageCursor};
use cb_core::ports::BoardStorePort;

use crate::models::{PageResult, PostRowView};

/// Default window size, matching the boards' list layout.
pub const POSTS_PER_PAGE: u32 = 10;

/// A store call that hangs past this bound is treated as
/// `CollectionUnavailable`; the transport itself cannot be aborted.
const STORE_CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum BrowseError {
    /// Transport or backend failure. Retryable; the caller must keep any
    /// previously rendered rows in place.
    #[error("collection unavailable: {0}")]
    CollectionUnavailable(String),

    /// Page 0, or a jump past the cached cursors. The caller restarts
    /// pagination from page 1 rather than guessing a position.
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),
}

/// Outcome of a page load. `Superseded` means a newer navigation action won
/// the race; the result was discarded and no state changed.
#[derive(Debug)]
pub enum PageLoad {
    Loaded(PageResult),
    Superseded,
}

impl PageLoad {
    pub fn into_loaded(self) -> Option<PageResult> {
        match self {
            PageLoad::Loaded(page) => Some(page),
            PageLoad::Superseded => None,
        }
    }
}

#[derive(Debug, Default)]
struct BrowseState {
    /// Collection size captured by the last `refresh_total_count`.
    /// Ranks are pinned to this value for the whole session, even when the
    /// collection mutates underneath us; that staleness is accepted.
    total_count: Option<u64>,
    total_pages: u32,
    /// Boundary cursor of each visited page, keyed by page number.
    cursor_by_page: HashMap<u32, PageCursor>,
    current_page: u32,
}

/// Pagination controller for one board.
pub struct BoardBrowser {
    store: Arc<dyn BoardStorePort>,
    board: BoardKind,
    page_size: u32,
    state: Mutex<BrowseState>,
    latest_seq: AtomicU64,
}

impl BoardBrowser {
    pub fn new(store: Arc<dyn BoardStorePort>, board: BoardKind, page_size: u32) -> Self {
        assert!(page_size > 0, "page_size must be positive");
        Self {
            store,
            board,
            page_size,
            state: Mutex::new(BrowseState::default()),
            latest_seq: AtomicU64::new(0),
        }
    }

    pub fn board(&self) -> BoardKind {
        self.board
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn current_page(&self) -> u32 {
        self.state.lock().await.current_page
    }

    /// Re-sizes the browsing session: queries the collection count, derives
    /// the page count and invalidates all cached cursors. In-flight page
    /// loads from the previous session are superseded.
    pub async fn refresh_total_count(&self) -> Result<u64, BrowseError> {
        let count = tokio::time::timeout(STORE_CALL_TIMEOUT, self.store.count(self.board))
            .await
            .map_err(|_| BrowseError::CollectionUnavailable("count timed out".to_string()))?
            .map_err(|err| BrowseError::CollectionUnavailable(err.to_string()))?;

        self.latest_seq.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().await;
        state.total_count = Some(count);
        state.total_pages = total_pages(count, self.page_size);
        state.cursor_by_page.clear();
        state.current_page = 1;

        tracing::debug!(
            board = %self.board,
            count,
            total_pages = state.total_pages,
            "board session refreshed"
        );
        Ok(count)
    }

    /// Loads `page_number`, resuming from the cached boundary cursor of the
    /// previous page. Page 1 always starts from the top of the collection;
    /// any other page requires page N - 1 to have been visited during this
    /// session. An empty page is a valid result (the collection may have
    /// shrunk), never an error.
    pub async fn load_page(&self, page_number: u32) -> Result<PageLoad, BrowseError> {
        if page_number == 0 {
            return Err(BrowseError::InvalidPageRequest(
                "page numbers start at 1".to_string(),
            ));
        }

        let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let after = {
            let state = self.state.lock().await;
            if page_number > 1 {
                match state.cursor_by_page.get(&(page_number - 1)) {
                    Some(cursor) => Some(cursor.clone()),
                    None => {
                        return Err(BrowseError::InvalidPageRequest(format!(
                            "no cursor cached for page {}; restart from page 1",
                            page_number - 1
                        )))
                    }
                }
            } else {
                None
            }
        };

        let fetched = tokio::time::timeout(
            STORE_CALL_TIMEOUT,
            self.store
                .fetch_page(self.board, after.as_ref(), self.page_size as usize),
        )
        .await;

        let mut state = self.state.lock().await;
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(board = %self.board, page_number, "dropping superseded page load");
            return Ok(PageLoad::Superseded);
        }

        let posts = fetched
            .map_err(|_| BrowseError::CollectionUnavailable("page fetch timed out".to_string()))?
            .map_err(|err| BrowseError::CollectionUnavailable(err.to_string()))?;

        if let Some(last) = posts.last() {
            state.cursor_by_page.insert(page_number, last.cursor());
        }
        state.current_page = page_number;

        let pinned_count = state.total_count.unwrap_or(0);
        let items: Vec<PostRowView> = posts
            .iter()
            .enumerate()
            .map(|(index, post)| {
                let rank = display_rank(pinned_count, page_number, index, self.page_size);
                PostRowView::from_post(post, rank)
            })
            .collect();

        let has_prev = page_number > 1;
        // Without a sized session the page count is unknown; fall back to
        // "a full page probably has a successor".
        let has_next = if state.total_count.is_some() {
            page_number < state.total_pages
        } else {
            posts.len() == self.page_size as usize
        };
        let controls = PageControls::build(page_number, state.total_pages);

        Ok(PageLoad::Loaded(PageResult {
            page_number,
            items,
            has_prev,
            has_next,
            controls,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    use anyhow::Result;
    use async_trait::async_trait;
    use cb_core::board::Post;
    use cb_core::ids::{AuthorId, PostId};
    use cb_core::ports::PostChanges;

    struct MockBoardStore {
        posts: std::sync::Mutex<Vec<Post>>,
        fail_count: AtomicBool,
        fail_fetch: AtomicBool,
        block_first_fetch: Option<Arc<Notify>>,
        first_fetch_pending: AtomicBool,
    }

    impl MockBoardStore {
        fn new(posts: Vec<Post>) -> Self {
            Self {
                posts: std::sync::Mutex::new(posts),
                fail_count: AtomicBool::new(false),
                fail_fetch: AtomicBool::new(false),
                block_first_fetch: None,
                first_fetch_pending: AtomicBool::new(false),
            }
        }

        fn truncate_to(&self, keep_newest: usize, drop_newest: bool) {
            let mut posts = self.posts.lock().unwrap();
            if drop_newest {
                let excess = posts.len().saturating_sub(keep_newest);
                posts.drain(..excess);
            } else {
                posts.truncate(keep_newest);
            }
        }
    }

    #[async_trait]
    impl BoardStorePort for MockBoardStore {
        async fn count(&self, _board: BoardKind) -> Result<u64> {
            if self.fail_count.load(Ordering::SeqCst) {
                anyhow::bail!("backend offline");
            }
            Ok(self.posts.lock().unwrap().len() as u64)
        }

        async fn fetch_page(
            &self,
            _board: BoardKind,
            after: Option<&PageCursor>,
            limit: usize,
        ) -> Result<Vec<Post>> {
            if self.first_fetch_pending.swap(false, Ordering::SeqCst) {
                if let Some(gate) = &self.block_first_fetch {
                    gate.notified().await;
                }
            }
            if self.fail_fetch.load(Ordering::SeqCst) {
                anyhow::bail!("backend offline");
            }
            let posts = self.posts.lock().unwrap();
            Ok(posts
                .iter()
                .filter(|p| match after {
                    Some(cursor) => cursor.precedes(p.created_at_ms, &p.id),
                    None => true,
                })
                .take(limit)
                .cloned()
                .collect())
        }

        async fn get(&self, _board: BoardKind, _id: &PostId) -> Result<Option<Post>> {
            unimplemented!()
        }

        async fn insert(&self, _post: &Post) -> Result<()> {
            unimplemented!()
        }

        async fn update(
            &self,
            _board: BoardKind,
            _id: &PostId,
            _changes: &PostChanges,
        ) -> Result<()> {
            unimplemented!()
        }

        async fn delete(&self, _board: BoardKind, _id: &PostId) -> Result<()> {
            unimplemented!()
        }

        async fn increment_views(&self, _board: BoardKind, _id: &PostId) -> Result<i64> {
            unimplemented!()
        }
    }

    /// `n` posts, newest first, with strictly decreasing timestamps.
    fn make_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                Post::new(
                    PostId::from(format!("post-{i:03}").as_str()),
                    BoardKind::Notice,
                    format!("Post {i}"),
                    "content".into(),
                    AuthorId::from("uid-1"),
                    Some("Author".into()),
                    None,
                    None,
                    2_000_000_000_000 - i as i64 * 1_000,
                )
            })
            .collect()
    }

    fn browser_over(posts: Vec<Post>) -> (Arc<MockBoardStore>, BoardBrowser) {
        let store = Arc::new(MockBoardStore::new(posts));
        let browser = BoardBrowser::new(store.clone(), BoardKind::Notice, 10);
        (store, browser)
    }

    fn ranks(page: &PageResult) -> Vec<Option<i64>> {
        page.items.iter().map(|row| row.display_rank).collect()
    }

    #[tokio::test]
    async fn sequential_pages_cover_the_collection_without_overlap() {
        let (_, browser) = browser_over(make_posts(25));
        assert_eq!(browser.refresh_total_count().await.unwrap(), 25);

        let mut seen = Vec::new();
        for page_number in 1..=3 {
            let page = browser
                .load_page(page_number)
                .await
                .unwrap()
                .into_loaded()
                .unwrap();
            seen.extend(page.items.iter().map(|row| row.id.clone()));
        }

        let expected: Vec<String> = (0..25).map(|i| format!("post-{i:03}")).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn ranks_descend_from_pinned_total() {
        let (_, browser) = browser_over(make_posts(25));
        browser.refresh_total_count().await.unwrap();

        let page1 = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        let page2 = browser.load_page(2).await.unwrap().into_loaded().unwrap();
        let page3 = browser.load_page(3).await.unwrap().into_loaded().unwrap();

        assert_eq!(ranks(&page1), (16..=25).rev().map(Some).collect::<Vec<_>>());
        assert_eq!(ranks(&page2), (6..=15).rev().map(Some).collect::<Vec<_>>());
        assert_eq!(ranks(&page3), (1..=5).rev().map(Some).collect::<Vec<_>>());
        assert_eq!(page3.controls.buttons.len(), 3);
        assert!(page3.has_prev);
        assert!(!page3.has_next);
    }

    #[tokio::test]
    async fn load_page_is_idempotent_without_mutation() {
        let (_, browser) = browser_over(make_posts(12));
        browser.refresh_total_count().await.unwrap();

        let first = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        let second = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_collection_hides_pagination() {
        let (_, browser) = browser_over(Vec::new());
        assert_eq!(browser.refresh_total_count().await.unwrap(), 0);

        let page = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_prev);
        assert!(!page.has_next);
        assert!(page.controls.is_empty());
    }

    #[tokio::test]
    async fn exact_page_size_yields_a_single_page() {
        let (_, browser) = browser_over(make_posts(10));
        browser.refresh_total_count().await.unwrap();

        let page = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_prev);
        assert!(!page.has_next);
        assert_eq!(page.controls.buttons.len(), 1);
    }

    #[tokio::test]
    async fn jumping_past_cached_cursors_is_rejected() {
        let (_, browser) = browser_over(make_posts(50));
        browser.refresh_total_count().await.unwrap();

        let err = browser.load_page(5).await.unwrap_err();
        assert!(matches!(err, BrowseError::InvalidPageRequest(_)));

        let err = browser.load_page(0).await.unwrap_err();
        assert!(matches!(err, BrowseError::InvalidPageRequest(_)));
    }

    #[tokio::test]
    async fn refresh_invalidates_cached_cursors() {
        let (_, browser) = browser_over(make_posts(25));
        browser.refresh_total_count().await.unwrap();
        browser.load_page(1).await.unwrap();
        browser.load_page(2).await.unwrap();

        browser.refresh_total_count().await.unwrap();
        let err = browser.load_page(2).await.unwrap_err();
        assert!(matches!(err, BrowseError::InvalidPageRequest(_)));
    }

    #[tokio::test]
    async fn shrunken_collection_keeps_session_pinned_ranks() {
        // The collection drops from 25 to 20 mid-session; ranks keep using
        // the pinned 25. This staleness is accepted, not reconciled.
        let (store, browser) = browser_over(make_posts(25));
        browser.refresh_total_count().await.unwrap();
        browser.load_page(1).await.unwrap();
        browser.load_page(2).await.unwrap();

        store.truncate_to(20, true);

        let page3 = browser.load_page(3).await.unwrap().into_loaded().unwrap();
        assert_eq!(page3.items.len(), 5);
        assert_eq!(ranks(&page3), (1..=5).rev().map(Some).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn shrunken_collection_may_yield_an_empty_page() {
        let (store, browser) = browser_over(make_posts(25));
        browser.refresh_total_count().await.unwrap();
        browser.load_page(1).await.unwrap();
        browser.load_page(2).await.unwrap();

        // The 5 oldest posts vanish; page 3 is now past the end.
        store.truncate_to(20, false);

        let page3 = browser.load_page(3).await.unwrap().into_loaded().unwrap();
        assert!(page3.items.is_empty());
    }

    #[tokio::test]
    async fn transport_failures_surface_as_collection_unavailable() {
        let (store, browser) = browser_over(make_posts(5));
        store.fail_count.store(true, Ordering::SeqCst);
        let err = browser.refresh_total_count().await.unwrap_err();
        assert!(matches!(err, BrowseError::CollectionUnavailable(_)));

        store.fail_count.store(false, Ordering::SeqCst);
        browser.refresh_total_count().await.unwrap();

        store.fail_fetch.store(true, Ordering::SeqCst);
        let err = browser.load_page(1).await.unwrap_err();
        assert!(matches!(err, BrowseError::CollectionUnavailable(_)));
    }

    #[tokio::test]
    async fn unsized_session_renders_rows_without_ranks() {
        let (_, browser) = browser_over(make_posts(15));

        // No refresh_total_count: ranks are undefined, not fabricated.
        let page = browser.load_page(1).await.unwrap().into_loaded().unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(page.items.iter().all(|row| row.display_rank.is_none()));
        assert!(page.has_next);
        assert!(page.controls.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_store_call_times_out_as_unavailable() {
        let mut store = MockBoardStore::new(make_posts(5));
        // Gate that is never opened: the fetch hangs forever.
        store.block_first_fetch = Some(Arc::new(Notify::new()));
        store.first_fetch_pending.store(true, Ordering::SeqCst);

        let browser = BoardBrowser::new(Arc::new(store), BoardKind::Notice, 10);
        browser.refresh_total_count().await.unwrap();

        let err = browser.load_page(1).await.unwrap_err();
        assert!(matches!(err, BrowseError::CollectionUnavailable(_)));
    }

    #[tokio::test]
    async fn superseded_response_is_dropped() {
        let gate = Arc::new(Notify::new());
        let mut store = MockBoardStore::new(make_posts(25));
        store.block_first_fetch = Some(gate.clone());
        store.first_fetch_pending.store(true, Ordering::SeqCst);
        let store = Arc::new(store);

        let browser = Arc::new(BoardBrowser::new(store, BoardKind::Notice, 10));
        browser.refresh_total_count().await.unwrap();

        // First navigation stalls inside the store fetch.
        let stalled = {
            let browser = browser.clone();
            tokio::spawn(async move { browser.load_page(1).await })
        };
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        // Second navigation wins the race.
        let latest = browser.load_page(1).await.unwrap();
        assert!(matches!(latest, PageLoad::Loaded(_)));

        gate.notify_one();
        let stale = stalled.await.unwrap().unwrap();
        assert!(matches!(stale, PageLoad::Superseded));
    }
}
