//! # Predicate Builder
//!
//! Turns [`CatalogFilters`] and a [`PaginationCursor`] into parameterized
//! WHERE fragments for an [`sqlx::QueryBuilder`].
//!
//! ## Composition
//! ```text
//! CatalogFilters { category_id: 3, search: "caju" }   cursor: after 40
//!         │                                                │
//!         ▼                                                ▼
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ PredicateSet                                                         │
//! │   InStock              (p.stock_quantity > 0 OR ... > 0)             │
//! │   CategoryEq(3)        p.category_id = ?             [3]             │
//! │   TextContains("caju") (p.name_folded LIKE ? ...)    ["%caju%" x2]   │
//! │   IdAfter(40)          p.id > ?                      [40]            │
//! └──────────────────────────────────────────────────────────────────────┘
//!         │ push_where(&mut qb)
//!         ▼
//!  " WHERE ... AND ... AND ... AND ..."  + binds in order
//! ```
//!
//! User input never reaches the SQL text: every value is a bind, and LIKE
//! wildcards in search terms are escaped.
//!
//! Search runs against the `*_folded` columns with a term folded by
//! [`fold_case`], so accented capitals compare the same way on both sides.

use emporio_core::{fold_case, CatalogFilters, Money, PaginationCursor, PaginationDirection};
use sqlx::{QueryBuilder, Sqlite};

/// Escape character used in LIKE patterns.
const LIKE_ESCAPE: char = '\\';

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

/// One condition on the `products p` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Positive unit stock or positive weight stock.
    InStock,
    CategoryEq(i64),
    /// Case-insensitive substring of name or description.
    TextContains(String),
    PriceAtLeast(Money),
    PriceAtMost(Money),
    IdAfter(i64),
    IdBefore(i64),
}

impl Predicate {
    /// SQL text with one `?` per bind value.
    pub fn fragment(&self) -> &'static str {
        match self {
            Predicate::InStock => "(p.stock_quantity > 0 OR COALESCE(p.stock_weight, 0) > 0)",
            Predicate::CategoryEq(_) => "p.category_id = ?",
            Predicate::TextContains(_) => {
                "(p.name_folded LIKE ? ESCAPE '\\' OR COALESCE(p.description_folded, '') LIKE ? ESCAPE '\\')"
            }
            Predicate::PriceAtLeast(_) => "p.price_cents >= ?",
            Predicate::PriceAtMost(_) => "p.price_cents <= ?",
            Predicate::IdAfter(_) => "p.id > ?",
            Predicate::IdBefore(_) => "p.id < ?",
        }
    }

    /// Values for the placeholders of [`Predicate::fragment`], in order.
    pub fn binds(&self) -> Vec<BindValue> {
        match self {
            Predicate::InStock => vec![],
            Predicate::CategoryEq(id) | Predicate::IdAfter(id) | Predicate::IdBefore(id) => {
                vec![BindValue::Int(*id)]
            }
            Predicate::TextContains(term) => {
                let pattern = like_pattern(term);
                vec![BindValue::Text(pattern.clone()), BindValue::Text(pattern)]
            }
            Predicate::PriceAtLeast(price) | Predicate::PriceAtMost(price) => {
                vec![BindValue::Int(price.cents())]
            }
        }
    }
}

/// `%term%`, case-folded, with LIKE metacharacters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in fold_case(term.trim()).chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

// =============================================================================
// Predicate Set
// =============================================================================

/// Conjunction of predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// In-stock predicate plus one predicate per present filter.
    pub fn for_filters(filters: &CatalogFilters) -> Self {
        let mut set = PredicateSet {
            predicates: vec![Predicate::InStock],
        };
        if let Some(category_id) = filters.category_id {
            set.push(Predicate::CategoryEq(category_id));
        }
        if let Some(term) = filters.search.as_deref().map(str::trim) {
            if !term.is_empty() {
                set.push(Predicate::TextContains(term.to_string()));
            }
        }
        if let Some(min) = filters.min_price {
            set.push(Predicate::PriceAtLeast(min));
        }
        if let Some(max) = filters.max_price {
            set.push(Predicate::PriceAtMost(max));
        }
        set
    }

    /// Adds the cursor bound, if the cursor has one.
    pub fn with_cursor(mut self, cursor: &PaginationCursor) -> Self {
        if let Some(id) = cursor.cursor {
            self.push(match cursor.direction {
                PaginationDirection::Forward => Predicate::IdAfter(id),
                PaginationDirection::Backward => Predicate::IdBefore(id),
            });
        }
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// All bind values, in placeholder order.
    pub fn binds(&self) -> Vec<BindValue> {
        self.predicates.iter().flat_map(Predicate::binds).collect()
    }

    /// Appends ` WHERE a AND b ...` to the builder. No-op when empty.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });

            let mut binds = predicate.binds().into_iter();
            let mut parts = predicate.fragment().split('?').peekable();
            while let Some(part) = parts.next() {
                qb.push(part);
                if parts.peek().is_none() {
                    break;
                }
                match binds.next() {
                    Some(BindValue::Int(value)) => {
                        qb.push_bind(value);
                    }
                    Some(BindValue::Text(value)) => {
                        qb.push_bind(value);
                    }
                    None => {}
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
