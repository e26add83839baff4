//! Catalog API client and view driver against a live server on an
//! ephemeral port.

mod common;

use emporio_core::catalog_view::{ApplyOutcome, LoadState, ScrollMetrics};
use emporio_core::{CatalogFilters, PaginationCursor, PaginationDirection};
use storefront::browser::CatalogBrowser;
use storefront::client::{CatalogApiClient, ClientError};
use storefront::create_router;

async fn serve() -> CatalogApiClient {
    let app = create_router(common::seeded_state().await);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    CatalogApiClient::new(format!("http://{}", addr)).unwrap()
}

fn ids(products: &[emporio_core::Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

const BOTTOM: ScrollMetrics = ScrollMetrics {
    scroll_top: 900.0,
    client_height: 100.0,
    scroll_height: 1000.0,
};

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn client_reads_the_catalog() {
    let client = serve().await;

    let categories = client.get_categories().await.unwrap();
    assert_eq!(categories.len(), 3);

    let page = client
        .get_products(&CatalogFilters::default(), &PaginationCursor::default())
        .await
        .unwrap();
    assert_eq!(ids(&page.products), common::VISIBLE_IDS.to_vec());
    assert_eq!(page.total, 5);
    assert!(!page.has_more);

    let product = client.get_product_by_id(5).await.unwrap().unwrap();
    assert_eq!(product.name, "Uva Passa");
    assert_eq!(product.price.cents(), 1990);
}

#[tokio::test]
async fn client_maps_404_to_none() {
    let client = serve().await;
    assert_eq!(client.get_product_by_id(2).await.unwrap(), None);
    assert_eq!(client.get_product_by_id(404).await.unwrap(), None);
}

#[tokio::test]
async fn client_pages_a_category() {
    let client = serve().await;

    let first = client
        .get_products_by_category(1, &PaginationCursor::first_page(2))
        .await
        .unwrap();
    assert_eq!(ids(&first.products), vec![1, 3]);
    assert!(first.has_more);

    let back = client
        .get_products_by_category(1, &PaginationCursor::before(6, 1))
        .await
        .unwrap();
    assert_eq!(ids(&back.products), vec![3]);
    assert_eq!(back.prev_cursor, Some(3));
}

#[tokio::test]
async fn client_search_and_counts() {
    let client = serve().await;

    let found = client.search_products("castanha").await.unwrap();
    assert_eq!(ids(&found), vec![1]);

    let total = client
        .get_total_products(&CatalogFilters::category(2))
        .await
        .unwrap();
    assert_eq!(total, 2);

    let counts = client.get_product_counts_by_category().await.unwrap();
    assert_eq!(counts.get(&1), Some(&3));
    assert_eq!(counts.get(&2), Some(&2));
    assert_eq!(counts.get(&3), Some(&0));
}

#[tokio::test]
async fn client_surfaces_server_errors() {
    let client = serve().await;
    let cursor = PaginationCursor {
        cursor: None,
        limit: 0,
        direction: PaginationDirection::Forward,
    };

    let err = client
        .get_products(&CatalogFilters::default(), &cursor)
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("limite"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn client_reports_unreachable_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CatalogApiClient::new(format!("http://{}", addr)).unwrap();
    let err = client.get_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

// =============================================================================
// Browser
// =============================================================================

#[tokio::test]
async fn browser_scrolls_to_the_end() {
    let mut browser = CatalogBrowser::with_page_size(serve().await, 2);

    assert_eq!(browser.load().await, ApplyOutcome::Applied);
    assert_eq!(browser.view().state(), &LoadState::Loaded);
    assert_eq!(browser.view().categories().len(), 3);
    assert_eq!(ids(browser.view().products()), vec![1, 3]);

    assert_eq!(browser.scroll(BOTTOM).await, Some(ApplyOutcome::Applied));
    assert_eq!(ids(browser.view().products()), vec![1, 3, 4, 5]);

    assert_eq!(browser.scroll(BOTTOM).await, Some(ApplyOutcome::Applied));
    assert_eq!(ids(browser.view().products()), common::VISIBLE_IDS.to_vec());
    assert!(!browser.view().has_more());

    assert_eq!(browser.scroll(BOTTOM).await, None);

    let top = ScrollMetrics {
        scroll_top: 0.0,
        ..BOTTOM
    };
    assert_eq!(browser.scroll(top).await, None);
}

#[tokio::test]
async fn browser_filters_reset_the_list() {
    let mut browser = CatalogBrowser::with_page_size(serve().await, 2);
    browser.load().await;
    browser.scroll(BOTTOM).await;

    browser.select_category(Some(2)).await;
    assert_eq!(ids(browser.view().products()), vec![4, 5]);
    assert_eq!(browser.view().total(), 2);

    browser.search("uva").await;
    assert_eq!(ids(browser.view().products()), vec![5]);

    browser.clear_filters().await;
    assert_eq!(ids(browser.view().products()), vec![1, 3]);
    assert!(browser.view().has_more());
}

#[tokio::test]
async fn browser_pages_a_category() {
    let browser = CatalogBrowser::new(serve().await);

    let mut pager = browser.open_category(1, 2).await.unwrap();
    assert_eq!(ids(pager.products()), vec![1, 3]);
    assert!(pager.has_next());
    assert!(!pager.has_prev());
    assert_eq!(pager.total(), 3);

    assert!(browser.next_page(&mut pager).await.unwrap());
    assert_eq!(ids(pager.products()), vec![6]);
    assert!(!pager.has_next());
    assert!(pager.has_prev());

    assert!(!browser.next_page(&mut pager).await.unwrap());

    assert!(browser.prev_page(&mut pager).await.unwrap());
    assert_eq!(ids(pager.products()), vec![1, 3]);
    assert!(!pager.has_prev());
    assert!(pager.has_next());

    assert!(!browser.prev_page(&mut pager).await.unwrap());
}
