//! # emporio-core: Pure Domain Logic for the Empório Storefront
//!
//! Catalog types, money, validation, the front-end pagination state machine,
//! the WhatsApp composer and SEO markup parsing. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Empório Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end / API client                       │   │
//! │  │   CatalogView ──► CatalogApiClient ──► HTTP                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront (axum)                            │   │
//! │  │    /api/catalog/*, /api/contact, /api/seo/optimize              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ emporio-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────┐ ┌────────────┐ ┌─────────┐ ┌───────┐  │   │
//! │  │   │  types  │ │ money  │ │catalog_view│ │ contact │ │  seo  │  │   │
//! │  │   │ Product │ │ Money  │ │ CatalogView│ │WhatsApp │ │ meta  │  │   │
//! │  │   │ Category│ │        │ │CategoryPgr │ │FormState│ │ tags  │  │   │
//! │  │   └─────────┘ └────────┘ └────────────┘ └─────────┘ └───────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    emporio-db (Database Layer)                  │   │
//! │  │          SQLite catalog queries, retry, category cache          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, pagination, filters)
//! - [`money`] - Money in integer centavos
//! - [`error`] - Domain error types
//! - [`validation`] - Request parameter parsing
//! - [`catalog_view`] - Infinite-scroll and pager state machines
//! - [`contact`] - Contact form schema and WhatsApp deep links
//! - [`seo`] - SEO prompt and markup parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use emporio_core::validation::{parse_cursor, parse_page_limit};
//! use emporio_core::{PaginationCursor, DEFAULT_PAGE_LIMIT};
//!
//! let limit = parse_page_limit(None).unwrap();
//! assert_eq!(limit, DEFAULT_PAGE_LIMIT);
//!
//! let cursor = parse_cursor(Some("24")).unwrap().unwrap();
//! let page = PaginationCursor::after(cursor, limit);
//! assert_eq!(page.cursor, Some(24));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog_view;
pub mod contact;
pub mod error;
pub mod money;
pub mod seo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Page size of the infinite-scroll catalog listing.
pub const CATALOG_PAGE_SIZE: u32 = 20;

/// Largest page a client may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Longest accepted search term, in characters.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Store number used for WhatsApp links when none is configured.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5581991676177";
