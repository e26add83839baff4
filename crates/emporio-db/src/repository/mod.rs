//! # Repository Module
//!
//! SQL access to the catalog tables.
//!
//! ```text
//! CatalogService
//!      │  db.catalog().find_products(&filters, &cursor)
//!      ▼
//! CatalogRepository ──► PredicateSet ──► QueryBuilder ──► SQLite
//! ```
//!
//! Repositories return [`DbResult`](crate::error::DbResult) and never mask
//! errors; masking is the service's job.

pub mod catalog;
