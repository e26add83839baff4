//! Drives the catalog view state machines through [`CatalogApiClient`].
//!
//! The state machines in `emporio_core::catalog_view` never do I/O; this is
//! the loop that turns their fetch requests into HTTP calls and feeds the
//! responses back.

use emporio_core::catalog_view::{
    ApplyOutcome, CatalogView, CategoryPager, FetchRequest, ScrollMetrics,
};
use emporio_core::CATALOG_PAGE_SIZE;
use tracing::warn;

use crate::client::{CatalogApiClient, ClientResult};

const LOAD_ERROR: &str = "Erro ao carregar produtos";

/// Infinite-scroll catalog backed by the HTTP API.
#[derive(Debug)]
pub struct CatalogBrowser {
    client: CatalogApiClient,
    view: CatalogView,
}

impl CatalogBrowser {
    pub fn new(client: CatalogApiClient) -> Self {
        Self::with_page_size(client, CATALOG_PAGE_SIZE)
    }

    pub fn with_page_size(client: CatalogApiClient, page_size: u32) -> Self {
        CatalogBrowser {
            client,
            view: CatalogView::new(page_size),
        }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Categories plus the first page of products.
    ///
    /// A category failure leaves the chips empty; the product list still loads.
    pub async fn load(&mut self) -> ApplyOutcome {
        match self.client.get_categories().await {
            Ok(categories) => self.view.set_categories(categories),
            Err(err) => warn!(error = %err, "Failed to load categories"),
        }
        let request = self.view.start();
        self.fetch(request).await
    }

    pub async fn select_category(&mut self, category_id: Option<i64>) -> ApplyOutcome {
        let request = self.view.select_category(category_id);
        self.fetch(request).await
    }

    pub async fn search(&mut self, term: &str) -> ApplyOutcome {
        let request = self.view.submit_search(term);
        self.fetch(request).await
    }

    pub async fn clear_filters(&mut self) -> ApplyOutcome {
        let request = self.view.clear_filters();
        self.fetch(request).await
    }

    /// Loads the next page when the scroll position asks for one.
    ///
    /// Returns `None` when no fetch was needed.
    pub async fn scroll(&mut self, metrics: ScrollMetrics) -> Option<ApplyOutcome> {
        let request = self.view.on_scroll(metrics)?;
        Some(self.fetch(request).await)
    }

    /// Runs one fetch request and hands the result to the view.
    pub async fn fetch(&mut self, request: FetchRequest) -> ApplyOutcome {
        let result = self
            .client
            .get_products(&request.filters, &request.cursor)
            .await
            .map_err(|err| {
                warn!(error = %err, generation = request.generation, "Product fetch failed");
                LOAD_ERROR.to_string()
            });
        self.view.apply(&request, result)
    }

    // -------------------------------------------------------------------------
    // Category pages
    // -------------------------------------------------------------------------

    /// First page of one category with prev/next navigation.
    pub async fn open_category(&self, category_id: i64, limit: u32) -> ClientResult<CategoryPager> {
        let mut pager = CategoryPager::new(category_id, limit);
        let page = self
            .client
            .get_products_by_category(category_id, &pager.first())
            .await?;
        pager.apply_first(page);
        Ok(pager)
    }

    /// Moves forward one page. `false` when already on the last page.
    pub async fn next_page(&self, pager: &mut CategoryPager) -> ClientResult<bool> {
        let Some(cursor) = pager.next().filter(|_| pager.has_next()) else {
            return Ok(false);
        };
        let page = self
            .client
            .get_products_by_category(pager.category_id(), &cursor)
            .await?;
        pager.apply_next(page);
        Ok(true)
    }

    /// Moves back one page. `false` when already on the first page.
    pub async fn prev_page(&self, pager: &mut CategoryPager) -> ClientResult<bool> {
        let Some(cursor) = pager.prev().filter(|_| pager.has_prev()) else {
            return Ok(false);
        };
        let page = self
            .client
            .get_products_by_category(pager.category_id(), &cursor)
            .await?;
        pager.apply_prev(page);
        Ok(true)
    }
}
