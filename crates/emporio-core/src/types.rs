//! # Domain Types
//!
//! Catalog types shared by the data layer, the HTTP API and the front end.
//!
//! ## Wire Names
//! Field names on the wire follow the storefront front end
//! (`nome`, `preco`, `categoria_id`, `nextCursor`, ...). Rust-side names are
//! English; serde renames bridge the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_PAGE_LIMIT;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
///
/// Rows pre-exist in the store; the application never writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned integer id. Also the pagination key.
    pub id: i64,

    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,

    /// Unit price (or price per kilogram for bulk products).
    #[serde(rename = "preco")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(rename = "descricao")]
    pub description: Option<String>,

    /// Image reference (URL or path).
    #[serde(rename = "imagem")]
    pub image: Option<String>,

    #[serde(rename = "categoria_id")]
    pub category_id: i64,

    /// Units in stock.
    #[serde(rename = "estoque")]
    pub stock_quantity: i64,

    /// Kilograms in stock (bulk products only).
    #[serde(rename = "estoque_peso")]
    pub stock_weight: Option<f64>,

    /// Sold by weight.
    pub is_bulk: bool,
}

impl Product {
    /// Whether the product may be exposed by the catalog.
    ///
    /// A product is in stock when it has units left or a positive weight.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0 || self.stock_weight.is_some_and(|w| w > 0.0)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category with its derived in-stock product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "descricao")]
    pub description: Option<String>,

    /// Number of in-stock products. Computed per query, never stored.
    pub product_count: i64,
}

// =============================================================================
// Pagination
// =============================================================================

/// Direction of a cursor page.
///
/// `Forward` walks ids ascending (`id > cursor`), `Backward` walks them
/// descending (`id < cursor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaginationDirection {
    #[default]
    #[serde(rename = "next", alias = "forward")]
    Forward,
    #[serde(rename = "prev", alias = "backward")]
    Backward,
}

impl PaginationDirection {
    /// Wire value used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationDirection::Forward => "next",
            PaginationDirection::Backward => "prev",
        }
    }
}

impl fmt::Display for PaginationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" | "forward" => Ok(PaginationDirection::Forward),
            "prev" | "backward" => Ok(PaginationDirection::Backward),
            _ => Err(ValidationError::NotAllowed {
                field: "direction".to_string(),
                allowed: vec!["next".to_string(), "prev".to_string()],
            }),
        }
    }
}

/// Position and size of a requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationCursor {
    /// Last-seen product id; `None` requests the first page.
    pub cursor: Option<i64>,
    pub limit: u32,
    pub direction: PaginationDirection,
}

impl PaginationCursor {
    /// First page in the forward direction.
    pub fn first_page(limit: u32) -> Self {
        PaginationCursor {
            cursor: None,
            limit,
            direction: PaginationDirection::Forward,
        }
    }

    /// Page of ids strictly greater than `id`.
    pub fn after(id: i64, limit: u32) -> Self {
        PaginationCursor {
            cursor: Some(id),
            limit,
            direction: PaginationDirection::Forward,
        }
    }

    /// Page of ids strictly smaller than `id`.
    pub fn before(id: i64, limit: u32) -> Self {
        PaginationCursor {
            cursor: Some(id),
            limit,
            direction: PaginationDirection::Backward,
        }
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        PaginationCursor::first_page(DEFAULT_PAGE_LIMIT)
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Optional catalog filters. Every present filter narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogFilters {
    pub category_id: Option<i64>,

    /// Case-insensitive substring of name or description.
    pub search: Option<String>,

    #[ts(type = "number | null")]
    pub min_price: Option<Money>,

    #[ts(type = "number | null")]
    pub max_price: Option<Money>,
}

impl CatalogFilters {
    /// Filters for one category.
    pub fn category(category_id: i64) -> Self {
        CatalogFilters {
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    /// Filters for a search term. Blank terms produce no search filter.
    pub fn search(term: &str) -> Self {
        CatalogFilters {
            search: non_blank(term),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_search(mut self, term: Option<&str>) -> Self {
        self.search = term.and_then(non_blank);
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.search.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// In-memory evaluation of the same predicate the store applies.
    ///
    /// Includes the in-stock rule.
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_in_stock() {
            return false;
        }
        if let Some(category_id) = self.category_id {
            if product.category_id != category_id {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = fold_case(term);
            let in_name = fold_case(&product.name).contains(&term);
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| fold_case(d).contains(&term));
            if !in_name && !in_description {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}

/// Unicode lowercase used for every case-insensitive comparison.
///
/// The store keeps a folded copy of each searchable column, so SQL never has
/// to fold (SQLite's `LOWER` and `LIKE` only know ASCII).
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn non_blank(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_string())
}

// =============================================================================
// Paginated Result
// =============================================================================

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedProducts {
    pub products: Vec<Product>,

    /// Cursor for the following page (forward pages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,

    /// Cursor for the preceding page (backward pages only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<i64>,

    /// More rows exist past this page in the requested direction.
    pub has_more: bool,

    /// Count of all matching rows, independent of the cursor.
    pub total: i64,
}

impl PaginatedProducts {
    /// The page returned when the store cannot be queried.
    pub fn empty() -> Self {
        PaginatedProducts::default()
    }

    pub fn first_id(&self) -> Option<i64> {
        self.products.first().map(|p| p.id)
    }

    pub fn last_id(&self) -> Option<i64> {
        self.products.last().map(|p| p.id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
