//! # Catalog API Client
//!
//! Typed wrapper over the storefront's own HTTP API, for hosts that drive the
//! catalog views from outside the server (see [`crate::browser`]).
//!
//! ```text
//! CatalogApiClient::get_products(filters, cursor)
//!     └──► GET {base}/api/catalog/products?category_id=..&search=..&cursor=..
//!              ├── 2xx  → PaginatedProducts
//!              └── else → ClientError::Api { status, message }
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use emporio_core::{
    CatalogFilters, Category, Money, PaginatedProducts, PaginationCursor, Product,
    DEFAULT_PAGE_LIMIT,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::ApiErrorBody;

/// Client-side failures.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(String),

    /// Non-success answer; `message` is the server's `error` field when present.
    #[error("http {status}: {message}")]
    Api { status: u16, message: String },

    #[error("json error: {0}")]
    Serde(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// HTTP client for `/api/catalog`.
#[derive(Debug, Clone)]
pub struct CatalogApiClient {
    http: Client,
    base_url: String,
}

impl CatalogApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// `base_url` is the server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(CatalogApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    pub async fn get_categories(&self) -> ClientResult<Vec<Category>> {
        self.get_json("/api/catalog/categories", &[]).await
    }

    pub async fn get_products(
        &self,
        filters: &CatalogFilters,
        cursor: &PaginationCursor,
    ) -> ClientResult<PaginatedProducts> {
        let mut params = filter_params(filters);
        params.extend(cursor_params(cursor));
        self.get_json("/api/catalog/products", &params).await
    }

    /// `None` when the server answers 404.
    pub async fn get_product_by_id(&self, id: i64) -> ClientResult<Option<Product>> {
        let response = self
            .send(&format!("/api/catalog/products/{}", id), &[])
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    pub async fn get_products_by_category(
        &self,
        category_id: i64,
        cursor: &PaginationCursor,
    ) -> ClientResult<PaginatedProducts> {
        self.get_json(
            &format!("/api/catalog/categories/{}/products", category_id),
            &cursor_params(cursor),
        )
        .await
    }

    /// First page of products matching `term`.
    pub async fn search_products(&self, term: &str) -> ClientResult<Vec<Product>> {
        let page = self
            .get_products(
                &CatalogFilters::search(term),
                &PaginationCursor::first_page(DEFAULT_PAGE_LIMIT),
            )
            .await?;
        Ok(page.products)
    }

    /// Count of products matching `filters`, from a one-row page.
    pub async fn get_total_products(&self, filters: &CatalogFilters) -> ClientResult<i64> {
        let page = self
            .get_products(filters, &PaginationCursor::first_page(1))
            .await?;
        Ok(page.total)
    }

    /// In-stock count per category id, from the category listing.
    pub async fn get_product_counts_by_category(&self) -> ClientResult<BTreeMap<i64, i64>> {
        let categories = self.get_categories().await?;
        Ok(categories
            .into_iter()
            .map(|category| (category.id, category.product_count))
            .collect())
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    async fn send(&self, path: &str, params: &[(&'static str, String)]) -> ClientResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?params, "Catalog API request");

        self.http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> ClientResult<T> {
        decode(self.send(path, params).await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Serde(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn filter_params(filters: &CatalogFilters) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(category_id) = filters.category_id {
        params.push(("category_id", category_id.to_string()));
    }
    if let Some(search) = &filters.search {
        params.push(("search", search.clone()));
    }
    if let Some(min) = filters.min_price {
        params.push(("min_price", price_param(min)));
    }
    if let Some(max) = filters.max_price {
        params.push(("max_price", price_param(max)));
    }
    params
}

fn cursor_params(cursor: &PaginationCursor) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("direction", cursor.direction.as_str().to_string()),
        ("limit", cursor.limit.to_string()),
    ];
    if let Some(id) = cursor.cursor {
        params.push(("cursor", id.to_string()));
    }
    params
}

/// `Money` as a plain decimal query value (`"9.90"`).
fn price_param(price: Money) -> String {
    let sign = if price.is_negative() { "-" } else { "" };
    let cents = price.cents().unsigned_abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}
