//! `GET /api/recommendations?category=&limit=`
//!
//! Served from the catalog: the first page of in-stock products of the named
//! category. Unknown or missing categories give an empty list.

use axum::extract::{Query, State};
use axum::Json;
use emporio_core::validation::parse_page_limit;
use emporio_core::Product;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Recommendations {
    pub products: Vec<Product>,
}

pub async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Recommendations>, ApiError> {
    let limit = parse_page_limit(query.limit.as_deref())?;
    let category = query.category.as_deref().map(str::trim).unwrap_or_default();

    let products = if category.is_empty() {
        Vec::new()
    } else {
        state.catalog.recommend_for_category(category, limit).await
    };
    debug!(category, count = products.len(), "Recommendations served");

    Ok(Json(Recommendations { products }))
}
