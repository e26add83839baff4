//! # Catalog Repository
//!
//! Read queries over `categories` and `products`, plus the inserts used by the
//! seed tool and test fixtures.
//!
//! ## Cursor Pagination
//! ```text
//! ids in stock:  3  5  8  9  12  15  21  30
//!
//! forward, cursor 8, limit 3
//!   WHERE id > 8 ORDER BY id ASC LIMIT 4   → 9 12 15 21
//!   has_more = true, page = 9 12 15, next_cursor = 15
//!
//! backward, cursor 21, limit 3
//!   WHERE id < 21 ORDER BY id DESC LIMIT 4 → 15 12 9 8
//!   has_more = true, page = 9 12 15 (re-sorted), prev_cursor = 9
//! ```
//!
//! `total` comes from a separate COUNT over the filter predicates only.

use emporio_core::{
    fold_case, CatalogFilters, Category, PaginatedProducts, PaginationCursor, PaginationDirection, Product,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::DbResult;
use crate::predicate::{Predicate, PredicateSet};

/// Product columns aliased to [`Product`] field names.
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.price_cents AS price, p.description, \
     p.image_url AS image, p.category_id, p.stock_quantity, p.stock_weight, p.is_bulk";

/// Repository for catalog queries.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Categories with their in-stock product counts.
    ///
    /// Ordered by `product_count DESC, name`. Empty categories are included
    /// with a count of zero.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let sql = category_query("");
        let categories = sqlx::query_as::<_, Category>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Category whose name matches `name`, ignoring case.
    pub async fn find_category_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        let sql = category_query("WHERE c.name_folded = ?");
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(fold_case(name.trim()))
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// One page of in-stock products matching `filters`.
    pub async fn find_products(
        &self,
        filters: &CatalogFilters,
        cursor: &PaginationCursor,
    ) -> DbResult<PaginatedProducts> {
        let limit = cursor.limit.max(1) as usize;
        let predicates = PredicateSet::for_filters(filters).with_cursor(cursor);

        debug!(
            ?filters,
            cursor = ?cursor.cursor,
            direction = %cursor.direction,
            limit,
            "Finding products"
        );

        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products p"));
        predicates.push_where(&mut qb);
        qb.push(match cursor.direction {
            PaginationDirection::Forward => " ORDER BY p.id ASC",
            PaginationDirection::Backward => " ORDER BY p.id DESC",
        });
        qb.push(" LIMIT ").push_bind(limit as i64 + 1);

        let mut products: Vec<Product> = qb.build_query_as().fetch_all(&self.pool).await?;

        let has_more = products.len() > limit;
        products.truncate(limit);

        let (next_cursor, prev_cursor) = match cursor.direction {
            PaginationDirection::Forward => (products.last().map(|p| p.id), None),
            PaginationDirection::Backward => {
                let boundary = products.last().map(|p| p.id);
                products.reverse();
                (None, boundary)
            }
        };

        let total = self.count_products(filters).await?;

        debug!(returned = products.len(), has_more, total, "Products page ready");

        Ok(PaginatedProducts {
            products,
            next_cursor,
            prev_cursor,
            has_more,
            total,
        })
    }

    /// Number of in-stock products matching `filters`.
    pub async fn count_products(&self, filters: &CatalogFilters) -> DbResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products p");
        PredicateSet::for_filters(filters).push_where(&mut qb);

        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    /// In-stock product by id.
    pub async fn get_in_stock_product(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ? AND {}",
            Predicate::InStock.fragment()
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// `category_id → in-stock product count`, for categories with stock.
    pub async fn product_counts_by_category(&self) -> DbResult<BTreeMap<i64, i64>> {
        let sql = format!(
            "SELECT p.category_id, COUNT(*) FROM products p WHERE {} GROUP BY p.category_id",
            Predicate::InStock.fragment()
        );
        let rows: Vec<(i64, i64)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().collect())
    }

    // =========================================================================
    // Inserts (seed data and fixtures)
    // =========================================================================

    /// Inserts a category with an explicit id. `product_count` is ignored.
    pub async fn insert_category(&self, category: &Category) -> DbResult<()> {
        debug!(id = category.id, name = %category.name, "Inserting category");

        sqlx::query(
            "INSERT INTO categories (id, name, description, name_folded) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(fold_case(&category.name))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Inserts a product with an explicit id.
    pub async fn insert_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, stock_quantity,
                stock_weight, is_bulk, image_url, category_id,
                name_folded, description_folded
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock_quantity)
        .bind(product.stock_weight)
        .bind(product.is_bulk)
        .bind(&product.image)
        .bind(product.category_id)
        .bind(fold_case(&product.name))
        .bind(product.description.as_deref().map(fold_case))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fills folded search columns left NULL by rows written before they
    /// existed. Returns the number of rows updated.
    pub async fn backfill_folded_text(&self) -> DbResult<u64> {
        let categories: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM categories WHERE name_folded IS NULL")
                .fetch_all(&self.pool)
                .await?;
        let products: Vec<(i64, String, Option<String>)> = sqlx::query_as(
            "SELECT id, name, description FROM products \
             WHERE name_folded IS NULL \
                OR (description IS NOT NULL AND description_folded IS NULL)",
        )
        .fetch_all(&self.pool)
        .await?;

        if categories.is_empty() && products.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for (id, name) in &categories {
            sqlx::query("UPDATE categories SET name_folded = ?1 WHERE id = ?2")
                .bind(fold_case(name))
                .bind(*id)
                .execute(&mut *tx)
                .await?;
        }
        for (id, name, description) in &products {
            sqlx::query("UPDATE products SET name_folded = ?1, description_folded = ?2 WHERE id = ?3")
                .bind(fold_case(name))
                .bind(description.as_deref().map(fold_case))
                .bind(*id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        let updated = (categories.len() + products.len()) as u64;
        debug!(
            categories = categories.len(),
            products = products.len(),
            "Backfilled folded search text"
        );
        Ok(updated)
    }

    /// Number of product rows, in stock or not.
    pub async fn count_all_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Category listing with an optional WHERE clause on `c`.
fn category_query(where_clause: &str) -> String {
    format!(
        "SELECT c.id, c.name, c.description, COUNT(p.id) AS product_count \
         FROM categories c \
         LEFT JOIN products p ON p.category_id = c.id AND {} \
         {where_clause} \
         GROUP BY c.id, c.name, c.description \
         ORDER BY product_count DESC, c.name",
        Predicate::InStock.fragment()
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
