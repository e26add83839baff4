//! Catalog endpoints.
//!
//! Query parameters arrive as raw strings and go through
//! `emporio_core::validation` so every malformed value gets its own 400
//! message instead of a generic extractor rejection.

use axum::extract::{Path, Query, State};
use axum::Json;
use emporio_core::validation::{
    parse_cursor, parse_direction, parse_id, parse_optional_id, parse_page_limit,
    parse_price_bound, validate_search_query,
};
use emporio_core::{CatalogFilters, Category, PaginatedProducts, PaginationCursor, Product};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Cursor parameters shared by both listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub cursor: Option<String>,
    pub direction: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    fn cursor(&self) -> Result<PaginationCursor, ApiError> {
        Ok(PaginationCursor {
            cursor: parse_cursor(self.cursor.as_deref())?,
            limit: parse_page_limit(self.limit.as_deref())?,
            direction: parse_direction(self.direction.as_deref())?,
        })
    }
}

/// `GET /api/catalog/products` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    #[serde(flatten)]
    pub page: PageQuery,
}

impl ProductsQuery {
    fn filters(&self) -> Result<CatalogFilters, ApiError> {
        let search = validate_search_query(self.search.as_deref())?;
        Ok(CatalogFilters::default()
            .with_category(parse_optional_id(self.category_id.as_deref(), "category_id")?)
            .with_search(search.as_deref())
            .with_price_range(
                parse_price_bound(self.min_price.as_deref(), "min_price")?,
                parse_price_bound(self.max_price.as_deref(), "max_price")?,
            ))
    }
}

/// `GET /api/catalog/categories`
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let categories = state.catalog.categories().await;
    debug!(count = categories.len(), "Categories listed");
    Json(categories)
}

/// `GET /api/catalog/products`
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<PaginatedProducts>, ApiError> {
    let filters = query.filters()?;
    let cursor = query.page.cursor()?;

    let page = state.catalog.list_products(&filters, &cursor).await;
    info!(
        ?filters,
        cursor = ?cursor.cursor,
        direction = %cursor.direction,
        returned = page.products.len(),
        total = page.total,
        has_more = page.has_more,
        "Products listed"
    );
    Ok(Json(page))
}

/// `GET /api/catalog/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id, "product_id")?;

    match state.catalog.get_product(id).await {
        Some(product) => Ok(Json(product)),
        None => {
            debug!(product_id = id, "Product not found");
            Err(ApiError::product_not_found())
        }
    }
}

/// `GET /api/catalog/categories/{id}/products`
pub async fn products_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedProducts>, ApiError> {
    let category_id = parse_id(&raw_id, "category_id")?;
    let cursor = query.cursor()?;

    let page = state.catalog.products_by_category(category_id, &cursor).await;
    info!(
        category_id,
        cursor = ?cursor.cursor,
        returned = page.products.len(),
        has_more = page.has_more,
        "Category products listed"
    );
    Ok(Json(page))
}
