//! # emporio-db: Catalog Data Layer for Empório
//!
//! SQLite access for the storefront catalog, through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Empório Data Flow                                │
//! │                                                                         │
//! │  axum handler (GET /api/catalog/products)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     emporio-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   CatalogService ── masking, retry, category cache              │   │
//! │  │        │                                                        │   │
//! │  │        ▼                                                        │   │
//! │  │   CatalogRepository ── PredicateSet ── QueryBuilder             │   │
//! │  │        │                                                        │   │
//! │  │        ▼                                                        │   │
//! │  │   Database (pool.rs) ── SqlitePool + embedded migrations        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (DATABASE_URL / DB_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`predicate`] - Filter-to-SQL predicate builder
//! - [`repository`] - Catalog queries
//! - [`retry`] - Retry policy with injectable sleeping
//! - [`cache`] - Category cache with TTL
//! - [`service`] - Catalog operations with failure masking
//!
//! ## Usage
//!
//! ```rust,ignore
//! use emporio_db::{CatalogService, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./emporio.db")).await?;
//! let catalog = CatalogService::new(db);
//!
//! let page = catalog
//!     .list_products(&CatalogFilters::search("caju"), &PaginationCursor::default())
//!     .await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod predicate;
pub mod repository;
pub mod retry;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::{CategoryCache, Clock, SystemClock};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::catalog::CatalogRepository;
pub use retry::{BackoffKind, RetryPolicy, Sleeper, TokioSleeper};
pub use service::CatalogService;
