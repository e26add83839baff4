//! # Validation Module
//!
//! Parsing and validation of catalog request parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (storefront)                                    │
//! │  ├── Raw strings from path and query                                   │
//! │  └── THIS MODULE: ids, cursors, limits, directions, prices             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Predicate builder (emporio-db)                               │
//! │  └── Every value is bound as a parameter, never spliced                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK / foreign key constraints                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Query parameters arrive as raw strings so that a malformed value becomes a
//! typed [`ValidationError`] (and a 400) instead of a generic extractor
//! rejection.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PaginationDirection;
use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, MAX_SEARCH_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifiers
// =============================================================================

/// Parses an integer id.
///
/// ## Example
/// ```rust
/// use emporio_core::validation::parse_id;
///
/// assert_eq!(parse_id("42", "product_id").unwrap(), 42);
/// assert!(parse_id("abc", "product_id").is_err());
/// assert!(parse_id("12abc", "product_id").is_err());
/// ```
pub fn parse_id(raw: &str, field: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    raw.parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "expected an integer"))
}

/// Parses an optional id from a query string. Blank means absent.
pub fn parse_optional_id(raw: Option<&str>, field: &str) -> ValidationResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(value, field).map(Some),
    }
}

/// Parses a pagination cursor (the last-seen product id).
pub fn parse_cursor(raw: Option<&str>) -> ValidationResult<Option<i64>> {
    parse_optional_id(raw, "cursor")
}

// =============================================================================
// Pagination
// =============================================================================

/// Parses a page size.
///
/// ## Rules
/// - Absent or blank: [`DEFAULT_PAGE_LIMIT`]
/// - Otherwise an integer in `1..=MAX_PAGE_LIMIT`
pub fn parse_page_limit(raw: Option<&str>) -> ValidationResult<u32> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_PAGE_LIMIT),
        Some(value) => value,
    };

    let limit: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format("limit", "expected an integer"))?;

    if limit < 1 || limit > MAX_PAGE_LIMIT as i64 {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_PAGE_LIMIT as i64,
        });
    }

    Ok(limit as u32)
}

/// Parses a page direction. Absent or blank means forward.
pub fn parse_direction(raw: Option<&str>) -> ValidationResult<PaginationDirection> {
    match raw.map(str::trim) {
        None | Some("") => Ok(PaginationDirection::Forward),
        Some(value) => value.parse(),
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Blank means "no search filter"
/// - Maximum [`MAX_SEARCH_LENGTH`] characters
///
/// ## Returns
/// The trimmed query, or `None` when blank.
pub fn validate_search_query(query: Option<&str>) -> ValidationResult<Option<String>> {
    let query = match query.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(Some(query.to_string()))
}

/// Parses an optional price bound (`min_price` / `max_price`).
pub fn parse_price_bound(raw: Option<&str>, field: &str) -> ValidationResult<Option<Money>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    let price = Money::parse(raw).map_err(|err| match err {
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason,
        },
        other => other,
    })?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(Some(price))
}

// =============================================================================
// Unit Tests
// =============================================================================
