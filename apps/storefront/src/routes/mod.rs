//! # HTTP Routes
//!
//! ```text
//! GET  /health
//! GET  /api/catalog/categories
//! GET  /api/catalog/categories/{id}/products   ?cursor&direction&limit
//! GET  /api/catalog/products                   ?category_id&search&cursor&direction&limit&min_price&max_price
//! GET  /api/catalog/products/{id}
//! POST /api/contact
//! GET  /api/contact/whatsapp                   ?product_id
//! POST /api/contact/whatsapp
//! POST /api/seo/optimize
//! GET  /api/recommendations                    ?category&limit
//! ```
//!
//! Every handler is stateless apart from [`AppState`]. Errors are
//! `{"error": "..."}` bodies (see [`crate::error`]); a panicking handler
//! answers with the same generic 500.

pub mod catalog;
pub mod contact;
pub mod health;
pub mod recommendations;
pub mod seo;

use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::state::AppState;

/// Builds the storefront router.
pub fn create_router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{id}/products", get(catalog::products_by_category))
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/catalog", catalog_routes)
        .route("/api/contact", post(contact::submit_form))
        .route(
            "/api/contact/whatsapp",
            get(contact::inquiry_link).post(contact::compose_whatsapp),
        )
        .route("/api/seo/optimize", post(seo::optimize))
        .route("/api/recommendations", get(recommendations::recommend))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
