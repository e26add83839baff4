//! `POST /api/seo/optimize`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use emporio_core::seo::{SeoMarkup, SeoRequest};

use super::contact::json_body;
use crate::error::ApiError;
use crate::state::AppState;

/// Always 200 for a well-formed body: the optimizer falls back on failure.
pub async fn optimize(
    State(state): State<AppState>,
    body: Result<Json<SeoRequest>, JsonRejection>,
) -> Result<Json<SeoMarkup>, ApiError> {
    let request = json_body(body)?;
    Ok(Json(state.seo.optimize(&request).await))
}
