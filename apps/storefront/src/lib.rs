//! # Empório Storefront
//!
//! HTTP API for the storefront plus a typed client for it.
//!
//! ## Modules
//! - [`config`]: environment configuration
//! - [`routes`]: axum router and handlers
//! - [`error`]: `{"error": ...}` responses
//! - [`ai`]: generative text flows (SEO)
//! - [`client`] / [`browser`]: catalog API client and the view driver

pub mod ai;
pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::StorefrontConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
