//! Catalog queries against a seeded in-memory store.
//!
//! The fixture is also kept in memory; `CatalogFilters::matches` over it is
//! the oracle for what the store must return.

use emporio_core::{CatalogFilters, Category, Money, PaginationCursor, Product};
use emporio_db::{CatalogService, Database, DbConfig};
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "Castanha de Caju",
    "Chá de Hibisco",
    "Granola Tradicional",
    "Castanha do Pará",
    "Uva Passa",
    "Damasco Seco",
    "Amêndoa Laminada",
    "Óleo de Coco",
    "Água de Coco",
];

fn fixture() -> (Vec<Category>, Vec<Product>) {
    let categories = (1..=4)
        .map(|id| Category {
            id,
            name: if id == 4 {
                "Óleos e Águas".to_string()
            } else {
                format!("Categoria {}", id)
            },
            description: None,
            product_count: 0,
        })
        .collect();

    let products = (1..=60)
        .map(|i: i64| {
            let id = i * 3;
            let (stock_quantity, stock_weight) = if i % 7 == 0 {
                (0, None)
            } else if i % 5 == 0 {
                (0, Some(1.5))
            } else {
                (i % 9 + 1, None)
            };
            Product {
                id,
                name: format!("{} {}", NAMES[(i as usize) % NAMES.len()], i),
                price: Money::from_cents(500 + (i * 37) % 3000),
                description: (i % 2 == 0).then(|| "Produto natural selecionado".to_string()),
                image: None,
                category_id: i % 4 + 1,
                stock_quantity,
                stock_weight,
                is_bulk: stock_weight.is_some(),
            }
        })
        .collect();

    (categories, products)
}

async fn seeded() -> (CatalogService, Vec<Product>) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let (categories, products) = fixture();
    let repo = db.catalog();
    for category in &categories {
        repo.insert_category(category).await.unwrap();
    }
    for product in &products {
        repo.insert_product(product).await.unwrap();
    }
    (CatalogService::new(db), products)
}

fn expected_ids(products: &[Product], filters: &CatalogFilters) -> Vec<i64> {
    products
        .iter()
        .filter(|p| filters.matches(p))
        .map(|p| p.id)
        .collect()
}

/// Follows `next_cursor` until `has_more` is false, checking every page.
async fn walk_forward(service: &CatalogService, filters: &CatalogFilters, limit: u32) -> Vec<i64> {
    let mut ids = Vec::new();
    let mut cursor = PaginationCursor::first_page(limit);

    loop {
        let page = service.list_products(filters, &cursor).await;
        assert!(page.products.len() <= limit as usize);
        for product in &page.products {
            assert!(product.is_in_stock(), "out-of-stock product {} exposed", product.id);
            assert!(filters.matches(product), "product {} violates {:?}", product.id, filters);
        }
        ids.extend(page.products.iter().map(|p| p.id));

        if !page.has_more {
            return ids;
        }
        let next = page.next_cursor.expect("non-final page has a next cursor");
        cursor = PaginationCursor::after(next, limit);
    }
}

#[tokio::test]
async fn forward_pages_concatenate_to_the_full_sequence() {
    let (service, products) = seeded().await;

    let cases = [
        CatalogFilters::default(),
        CatalogFilters::category(2),
        CatalogFilters::search("castanha"),
        CatalogFilters::search("natural").with_category(Some(3)),
        CatalogFilters::default()
            .with_price_range(Some(Money::from_cents(1000)), Some(Money::from_cents(2500))),
    ];

    for filters in &cases {
        let expected = expected_ids(&products, filters);
        assert!(!expected.is_empty(), "fixture has no match for {:?}", filters);

        for limit in [1, 4, 12, 100] {
            assert_eq!(walk_forward(&service, filters, limit).await, expected, "{:?} limit {}", filters, limit);
        }
    }
}

#[tokio::test]
async fn has_more_is_false_exactly_on_the_last_page() {
    let (service, products) = seeded().await;
    let filters = CatalogFilters::default();
    let expected = expected_ids(&products, &filters);
    let last = *expected.last().unwrap();

    let mut cursor = PaginationCursor::first_page(5);
    loop {
        let page = service.list_products(&filters, &cursor).await;
        let holds_last = page.last_id() == Some(last);
        assert_eq!(!page.has_more, holds_last);
        assert_eq!(page.total, expected.len() as i64);
        if !page.has_more {
            break;
        }
        cursor = PaginationCursor::after(page.next_cursor.unwrap(), 5);
    }

    // A limit that divides the set exactly still ends on a full page.
    let exact = expected.len() as u32;
    let page = service
        .list_products(&filters, &PaginationCursor::first_page(exact))
        .await;
    assert!(!page.has_more);
    assert_eq!(page.products.len(), expected.len());
}

#[tokio::test]
async fn backward_pages_walk_down_from_a_cursor() {
    let (service, products) = seeded().await;
    let filters = CatalogFilters::category(1);
    let expected = expected_ids(&products, &filters);

    let mut collected = Vec::new();
    let mut cursor = PaginationCursor::before(i64::MAX, 3);
    loop {
        let page = service.list_products(&filters, &cursor).await;
        let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "page not ascending: {:?}", ids);
        assert_eq!(page.prev_cursor, ids.first().copied());

        let mut chunk = ids;
        chunk.extend(collected);
        collected = chunk;

        if !page.has_more {
            break;
        }
        cursor = PaginationCursor::before(page.prev_cursor.unwrap(), 3);
    }

    assert_eq!(collected, expected);
}

#[tokio::test]
async fn total_ignores_the_cursor() {
    let (service, products) = seeded().await;
    let filters = CatalogFilters::search("caju");
    let expected = expected_ids(&products, &filters).len() as i64;

    let first = service
        .list_products(&filters, &PaginationCursor::first_page(2))
        .await;
    let later = service
        .list_products(&filters, &PaginationCursor::after(first.next_cursor.unwrap(), 2))
        .await;

    assert_eq!(first.total, expected);
    assert_eq!(later.total, expected);
    assert_eq!(service.count_products(&filters).await, expected);
}

#[tokio::test]
async fn accented_capitals_search_like_the_oracle() {
    let (service, products) = seeded().await;

    for term in ["óleo", "ÓLEO", "Óleo", "água", "ÁGUA", "Água de COCO", "de coco"] {
        let filters = CatalogFilters::search(term);
        let expected = expected_ids(&products, &filters);
        assert!(!expected.is_empty(), "fixture has no match for {:?}", term);
        assert_eq!(walk_forward(&service, &filters, 7).await, expected, "{:?}", term);
        assert_eq!(service.count_products(&filters).await, expected.len() as i64, "{:?}", term);
    }
}

#[tokio::test]
async fn category_lookup_folds_accented_capitals() {
    let (service, products) = seeded().await;

    let picks = service.recommend_for_category("ÓLEOS E ÁGUAS", 100).await;
    let expected = expected_ids(&products, &CatalogFilters::category(4));
    assert!(!expected.is_empty());
    assert_eq!(picks.iter().map(|p| p.id).collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn like_wildcards_are_literal() {
    let (service, _) = seeded().await;

    for term in ["%", "_", "caju%"] {
        let page = service
            .search_products(term, &PaginationCursor::first_page(100))
            .await;
        assert!(page.products.is_empty(), "{:?} matched {:?}", term, page.products);
    }
}

#[tokio::test]
async fn category_counts_match_the_fixture() {
    let (service, products) = seeded().await;

    let counts = service.product_counts_by_category().await;
    for category_id in 1..=4 {
        let expected = products
            .iter()
            .filter(|p| p.category_id == category_id && p.is_in_stock())
            .count() as i64;
        assert_eq!(counts.get(&category_id).copied().unwrap_or(0), expected);
    }

    let categories = service.categories().await;
    assert_eq!(categories.len(), 4);
    assert!(categories
        .windows(2)
        .all(|w| w[0].product_count >= w[1].product_count));
}

#[tokio::test]
async fn missing_and_out_of_stock_products_are_none() {
    let (service, products) = seeded().await;

    let hidden = products.iter().find(|p| !p.is_in_stock()).unwrap();
    assert_eq!(service.get_product(hidden.id).await, None);
    assert_eq!(service.get_product(1).await, None);

    let visible = products.iter().find(|p| p.is_in_stock()).unwrap();
    assert_eq!(service.get_product(visible.id).await.as_ref(), Some(visible));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 16,
        ..ProptestConfig::default()
    })]

    /// Property: every page obeys the filters and the pages cover the set.
    #[test]
    fn any_filter_combination_pages_to_the_oracle(
        category in proptest::option::of(1i64..=5),
        min in proptest::option::of(0i64..3500),
        span in 0i64..3500,
        use_max in any::<bool>(),
        term in proptest::option::of(prop::sample::select(vec!["castanha", "chá", "CHÁ", "uva", "natural", "óleo", "ÁGUA", "zzz"])),
        limit in 1u32..=15,
    ) {
        let max = use_max.then(|| min.unwrap_or(0) + span);
        let filters = CatalogFilters::default()
            .with_category(category)
            .with_search(term)
            .with_price_range(min.map(Money::from_cents), max.map(Money::from_cents));

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (walked, expected) = runtime.block_on(async {
            let (service, products) = seeded().await;
            (walk_forward(&service, &filters, limit).await, expected_ids(&products, &filters))
        });

        prop_assert_eq!(walked, expected);
    }
}
