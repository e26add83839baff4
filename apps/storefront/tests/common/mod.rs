//! Seeded in-memory store shared by the integration tests.
//!
//! ```text
//! id  name              category        stock
//! 1   Castanha de Caju  1 Castanhas     10
//! 2   Castanha do Pará  1 Castanhas     0 (hidden)
//! 3   Amêndoa Torrada   1 Castanhas     5
//! 4   Damasco Seco      2 Frutas Secas  2.5 kg
//! 5   Uva Passa         2 Frutas Secas  3
//! 6   Nozes Chilenas    1 Castanhas     8
//!     (no products)     3 Vazia
//! ```

#![allow(dead_code)]

use emporio_core::{Category, Money, Product};
use emporio_db::{CatalogService, Database, DbConfig, RetryPolicy};
use storefront::AppState;

pub const VISIBLE_IDS: [i64; 5] = [1, 3, 4, 5, 6];

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: None,
        product_count: 0,
    }
}

fn product(id: i64, name: &str, category_id: i64, cents: i64, units: i64, kilograms: Option<f64>) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Money::from_cents(cents),
        description: None,
        image: None,
        category_id,
        stock_quantity: units,
        stock_weight: kilograms,
        is_bulk: kilograms.is_some(),
    }
}

pub async fn seeded_catalog() -> CatalogService {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let repo = db.catalog();

    for c in [
        category(1, "Castanhas"),
        category(2, "Frutas Secas"),
        category(3, "Vazia"),
    ] {
        repo.insert_category(&c).await.unwrap();
    }

    for p in [
        product(1, "Castanha de Caju", 1, 4590, 10, None),
        product(2, "Castanha do Pará", 1, 5290, 0, None),
        product(3, "Amêndoa Torrada", 1, 6900, 5, None),
        product(4, "Damasco Seco", 2, 8990, 0, Some(2.5)),
        product(5, "Uva Passa", 2, 1990, 3, None),
        product(6, "Nozes Chilenas", 1, 7450, 8, None),
    ] {
        repo.insert_product(&p).await.unwrap();
    }

    CatalogService::new(db).with_retry(RetryPolicy::no_retry())
}

pub async fn seeded_state() -> AppState {
    AppState::new(seeded_catalog().await)
}
