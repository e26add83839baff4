//! # Catalog View State
//!
//! Front-end pagination state, kept free of any rendering or I/O so it can be
//! driven by any host (browser bindings, a CLI, tests).
//!
//! ## Infinite Scroll ([`CatalogView`])
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──start()──► Loading ──apply(Ok)──► Loaded ◄──┐                 │
//! │                        │                    │        │ apply(Ok/Err)   │
//! │                        │ apply(Err)         │ on_scroll() past 80%     │
//! │                        ▼                    ▼        │                 │
//! │                      Error            is_loading_more ┘                │
//! │                                                                         │
//! │   select_category / submit_search / clear_filters                      │
//! │     → cursor reset, generation += 1, back to Loading                   │
//! │                                                                         │
//! │   apply() with an older generation → discarded (Stale)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Navigation ([`CategoryPager`])
//! Previous/next buttons over one category, one page at a time.

use std::collections::HashSet;

use crate::types::{
    CatalogFilters, Category, PaginatedProducts, PaginationCursor, Product,
};

/// Fraction of the scrollable height that triggers the next page.
pub const SCROLL_THRESHOLD: f64 = 0.8;

// =============================================================================
// Fetch Requests
// =============================================================================

/// Whether a response replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Reset,
    Append,
}

/// A page the host must fetch and hand back through [`CatalogView::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub kind: FetchKind,
    pub filters: CatalogFilters,
    pub cursor: PaginationCursor,
}

/// What [`CatalogView::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Response belongs to a superseded filter state.
    Stale,
}

/// Loading state of the product list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Scroll position of the product container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// True once the visible bottom edge passes [`SCROLL_THRESHOLD`].
    pub fn past_threshold(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height * SCROLL_THRESHOLD
    }
}

// =============================================================================
// Catalog View
// =============================================================================

/// Infinite-scroll catalog listing with category and search filters.
#[derive(Debug, Clone)]
pub struct CatalogView {
    page_size: u32,
    filters: CatalogFilters,
    products: Vec<Product>,
    categories: Vec<Category>,
    state: LoadState,
    is_loading_more: bool,
    has_more: bool,
    next_cursor: Option<i64>,
    total: i64,
    generation: u64,
}

impl CatalogView {
    pub fn new(page_size: u32) -> Self {
        CatalogView {
            page_size,
            filters: CatalogFilters::default(),
            products: Vec::new(),
            categories: Vec::new(),
            state: LoadState::Idle,
            is_loading_more: false,
            has_more: false,
            next_cursor: None,
            total: 0,
            generation: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_cursor(&self) -> Option<i64> {
        self.next_cursor
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Initial load with the current filters.
    pub fn start(&mut self) -> FetchRequest {
        self.reset()
    }

    /// Category chips. `None` shows every category.
    pub fn select_category(&mut self, category_id: Option<i64>) -> FetchRequest {
        self.filters.category_id = category_id;
        self.reset()
    }

    /// Search box submit. A blank term removes the search filter.
    pub fn submit_search(&mut self, term: &str) -> FetchRequest {
        self.filters = self.filters.clone().with_search(Some(term));
        self.reset()
    }

    pub fn clear_filters(&mut self) -> FetchRequest {
        self.filters = CatalogFilters::default();
        self.reset()
    }

    /// Scroll handler. Returns a request only when another page should load.
    ///
    /// ## Conditions
    /// - Visible bottom edge past 80% of the content height
    /// - More results exist and a continuation cursor is known
    /// - Nothing is loading
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Option<FetchRequest> {
        if !metrics.past_threshold()
            || !self.has_more
            || self.is_loading_more
            || self.is_loading()
        {
            return None;
        }
        let cursor = self.next_cursor?;

        self.is_loading_more = true;
        Some(FetchRequest {
            generation: self.generation,
            kind: FetchKind::Append,
            filters: self.filters.clone(),
            cursor: PaginationCursor::after(cursor, self.page_size),
        })
    }

    /// Hands a fetch result back to the view.
    ///
    /// Results for a superseded generation are dropped without touching state.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        result: Result<PaginatedProducts, String>,
    ) -> ApplyOutcome {
        if request.generation != self.generation {
            return ApplyOutcome::Stale;
        }

        match (request.kind, result) {
            (FetchKind::Reset, Ok(page)) => {
                self.products = page.products;
                self.adopt_cursor(page.next_cursor, page.has_more, page.total);
                self.state = LoadState::Loaded;
            }
            (FetchKind::Reset, Err(message)) => {
                self.products.clear();
                self.has_more = false;
                self.next_cursor = None;
                self.total = 0;
                self.state = LoadState::Error(message);
            }
            (FetchKind::Append, Ok(page)) => {
                let seen: HashSet<i64> = self.products.iter().map(|p| p.id).collect();
                self.products
                    .extend(page.products.into_iter().filter(|p| !seen.contains(&p.id)));
                self.adopt_cursor(page.next_cursor, page.has_more, page.total);
                self.is_loading_more = false;
            }
            (FetchKind::Append, Err(_)) => {
                // Keep has_more so the next scroll retries.
                self.is_loading_more = false;
            }
        }

        ApplyOutcome::Applied
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    fn adopt_cursor(&mut self, next_cursor: Option<i64>, has_more: bool, total: i64) {
        self.next_cursor = next_cursor;
        self.has_more = has_more;
        self.total = total;
    }

    fn reset(&mut self) -> FetchRequest {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.is_loading_more = false;
        self.has_more = false;
        self.next_cursor = None;

        FetchRequest {
            generation: self.generation,
            kind: FetchKind::Reset,
            filters: self.filters.clone(),
            cursor: PaginationCursor::first_page(self.page_size),
        }
    }
}

// =============================================================================
// Category Pager
// =============================================================================

/// Previous/next navigation over one category.
#[derive(Debug, Clone)]
pub struct CategoryPager {
    category_id: i64,
    limit: u32,
    products: Vec<Product>,
    has_next: bool,
    has_prev: bool,
    total: i64,
}

impl CategoryPager {
    pub fn new(category_id: i64, limit: u32) -> Self {
        CategoryPager {
            category_id,
            limit,
            products: Vec::new(),
            has_next: false,
            has_prev: false,
            total: 0,
        }
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn filters(&self) -> CatalogFilters {
        CatalogFilters::category(self.category_id)
    }

    /// Cursor for the first page.
    pub fn first(&self) -> PaginationCursor {
        PaginationCursor::first_page(self.limit)
    }

    /// Cursor after the last visible product, if any.
    pub fn next(&self) -> Option<PaginationCursor> {
        self.products
            .last()
            .map(|p| PaginationCursor::after(p.id, self.limit))
    }

    /// Cursor before the first visible product, if any.
    pub fn prev(&self) -> Option<PaginationCursor> {
        self.products
            .first()
            .map(|p| PaginationCursor::before(p.id, self.limit))
    }

    pub fn apply_first(&mut self, page: PaginatedProducts) {
        self.total = page.total;
        self.has_next = page.has_more;
        self.has_prev = false;
        self.products = page.products;
    }

    /// A forward page arrived: there is always something behind it.
    pub fn apply_next(&mut self, page: PaginatedProducts) {
        self.has_next = page.has_more;
        self.has_prev = true;
        self.products = page.products;
    }

    /// A backward page arrived: there is always something ahead of it.
    pub fn apply_prev(&mut self, page: PaginatedProducts) {
        self.has_next = true;
        self.has_prev = page.has_more;
        self.products = page.products;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
