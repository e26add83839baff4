//! # Catalog Service
//!
//! The catalog operations the HTTP layer calls. Wraps [`CatalogRepository`]
//! with the failure-masking policy, the category retry and the category cache.
//!
//! ## Failure Masking
//! ```text
//! ┌──────────────────────────────┬─────────────────────────────────────────┐
//! │ Operation                    │ On store error (logged at ERROR)        │
//! ├──────────────────────────────┼─────────────────────────────────────────┤
//! │ categories                   │ retry per policy, then []               │
//! │ list_products / by_category  │ empty page, has_more = false, total = 0 │
//! │ search_products              │ empty page                              │
//! │ get_product                  │ None                                    │
//! │ count_products               │ 0                                       │
//! │ product_counts_by_category   │ {}                                      │
//! │ recommend_for_category       │ []                                      │
//! └──────────────────────────────┴─────────────────────────────────────────┘
//! ```
//!
//! Callers cannot tell "no results" from "store down". The log can.

use emporio_core::{CatalogFilters, Category, PaginatedProducts, PaginationCursor, Product};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::cache::CategoryCache;
use crate::pool::Database;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// Catalog operations with masking, retry and caching.
///
/// Cheap to clone; clones share the pool and the cache.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    cache: Arc<CategoryCache>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl CatalogService {
    /// Service with a five-minute category cache and the default retry.
    pub fn new(db: Database) -> Self {
        CatalogService {
            db,
            cache: Arc::new(CategoryCache::default()),
            retry: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_cache_ttl(self, ttl: Duration) -> Self {
        self.with_cache(CategoryCache::new(ttl))
    }

    pub fn with_cache(mut self, cache: CategoryCache) -> Self {
        self.cache = Arc::new(cache);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn cache(&self) -> &CategoryCache {
        &self.cache
    }

    /// Drops the cached category list.
    pub async fn invalidate_categories(&self) {
        self.cache.invalidate().await;
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories with in-stock counts. Cached; retried on failure.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Vec<Category> {
        if let Some(categories) = self.cache.get().await {
            return categories;
        }

        let result = self
            .retry
            .run(self.sleeper.as_ref(), "list_categories", |_| {
                let repo = self.db.catalog();
                async move { repo.list_categories().await }
            })
            .await;

        match result {
            Ok(categories) => {
                info!(count = categories.len(), "Categories loaded");
                self.cache.put(categories.clone()).await;
                categories
            }
            Err(err) => {
                error!(
                    error = %err,
                    attempts = self.retry.max_attempts(),
                    "All category lookups failed"
                );
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// One page of in-stock products matching `filters`.
    pub async fn list_products(
        &self,
        filters: &CatalogFilters,
        cursor: &PaginationCursor,
    ) -> PaginatedProducts {
        match self.db.catalog().find_products(filters, cursor).await {
            Ok(page) => page,
            Err(err) => {
                error!(error = %err, ?filters, "Failed to list products");
                PaginatedProducts::empty()
            }
        }
    }

    /// In-stock product by id; `None` when missing or on failure.
    pub async fn get_product(&self, id: i64) -> Option<Product> {
        match self.db.catalog().get_in_stock_product(id).await {
            Ok(product) => product,
            Err(err) => {
                error!(error = %err, id, "Failed to load product");
                None
            }
        }
    }

    pub async fn products_by_category(
        &self,
        category_id: i64,
        cursor: &PaginationCursor,
    ) -> PaginatedProducts {
        self.list_products(&CatalogFilters::category(category_id), cursor)
            .await
    }

    pub async fn search_products(&self, term: &str, cursor: &PaginationCursor) -> PaginatedProducts {
        self.list_products(&CatalogFilters::search(term), cursor).await
    }

    /// Number of in-stock products matching `filters`; 0 on failure.
    pub async fn count_products(&self, filters: &CatalogFilters) -> i64 {
        match self.db.catalog().count_products(filters).await {
            Ok(total) => total,
            Err(err) => {
                error!(error = %err, ?filters, "Failed to count products");
                0
            }
        }
    }

    /// `category_id → in-stock count`; empty on failure.
    pub async fn product_counts_by_category(&self) -> BTreeMap<i64, i64> {
        match self.db.catalog().product_counts_by_category().await {
            Ok(counts) => counts,
            Err(err) => {
                error!(error = %err, "Failed to count products by category");
                BTreeMap::new()
            }
        }
    }

    /// First page of in-stock products in the category named `category`.
    ///
    /// Empty when the name matches no category.
    #[instrument(skip(self))]
    pub async fn recommend_for_category(&self, category: &str, limit: u32) -> Vec<Product> {
        let found = match self.db.catalog().find_category_by_name(category).await {
            Ok(found) => found,
            Err(err) => {
                error!(error = %err, "Failed to resolve category for recommendations");
                return Vec::new();
            }
        };

        match found {
            Some(category) => {
                self.products_by_category(category.id, &PaginationCursor::first_page(limit))
                    .await
                    .products
            }
            None => Vec::new(),
        }
    }

    /// `true` when the store answers.
    pub async fn health_check(&self) -> bool {
        self.db.health_check().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
