//! Router tests: requests go through the full axum stack via `oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use emporio_core::seo::SeoMarkup;
use serde_json::{json, Value};
use storefront::create_router;
use storefront::error::{INVALID_CATEGORY_ID, INVALID_PRODUCT_ID, PRODUCT_NOT_FOUND};
use storefront::routes::contact::INVALID_BODY;
use tower::ServiceExt;

async fn app() -> Router {
    create_router(common::seeded_state().await)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
}

fn ids(page: &Value) -> Vec<i64> {
    page["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_database() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn categories_are_ordered_by_in_stock_count() {
    let app = app().await;
    let (status, body) = get(&app, "/api/catalog/categories").await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<(String, i64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["nome"].as_str().unwrap().to_string(),
                c["product_count"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Castanhas".to_string(), 3),
            ("Frutas Secas".to_string(), 2),
            ("Vazia".to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn products_default_page_hides_out_of_stock() {
    let app = app().await;
    let (status, body) = get(&app, "/api/catalog/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), common::VISIBLE_IDS.to_vec());
    assert_eq!(body["total"], 5);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn products_follow_the_next_cursor() {
    let app = app().await;

    let (_, first) = get(&app, "/api/catalog/products?limit=2").await;
    assert_eq!(ids(&first), vec![1, 3]);
    assert_eq!(first["hasMore"], true);
    assert_eq!(first["nextCursor"], 3);

    let (_, second) = get(&app, "/api/catalog/products?limit=2&cursor=3&direction=next").await;
    assert_eq!(ids(&second), vec![4, 5]);

    let (_, last) = get(&app, "/api/catalog/products?limit=2&cursor=5").await;
    assert_eq!(ids(&last), vec![6]);
    assert_eq!(last["hasMore"], false);
    assert_eq!(last["total"], 5);
}

#[tokio::test]
async fn products_backward_page() {
    let app = app().await;
    let (status, body) = get(&app, "/api/catalog/products?limit=2&cursor=5&direction=prev").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 4]);
    assert_eq!(body["prevCursor"], 3);
    assert_eq!(body["hasMore"], true);
}

#[tokio::test]
async fn products_filters_combine() {
    let app = app().await;

    let (_, body) = get(&app, "/api/catalog/products?search=castanha").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = get(&app, "/api/catalog/products?search=AM%C3%8ANDOA").await;
    assert_eq!(ids(&body), vec![3]);

    let (_, body) = get(&app, "/api/catalog/products?category_id=2").await;
    assert_eq!(ids(&body), vec![4, 5]);

    let (_, body) = get(&app, "/api/catalog/products?min_price=50&max_price=80").await;
    assert_eq!(ids(&body), vec![3, 6]);

    let (_, body) = get(&app, "/api/catalog/products?category_id=1&search=zzz").await;
    assert!(ids(&body).is_empty());
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn products_reject_bad_parameters() {
    let app = app().await;

    let (status, body) = get(&app, "/api/catalog/products?category_id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": INVALID_CATEGORY_ID }));

    for query in ["limit=0", "limit=500", "cursor=x", "direction=sideways", "min_price=-1"] {
        let (status, body) = get(&app, &format!("/api/catalog/products?{}", query)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", query);
        assert!(body["error"].is_string(), "{}", query);
    }
}

#[tokio::test]
async fn product_detail() {
    let app = app().await;

    let (status, body) = get(&app, "/api/catalog/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], "Castanha de Caju");
    assert_eq!(body["preco"], 45.9);

    let (status, body) = get(&app, "/api/catalog/products/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": INVALID_PRODUCT_ID }));
}

#[tokio::test]
async fn missing_or_out_of_stock_product_is_404() {
    let app = app().await;
    for id in [2, 999] {
        let (status, body) = get(&app, &format!("/api/catalog/products/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": PRODUCT_NOT_FOUND }));
    }
}

#[tokio::test]
async fn category_products() {
    let app = app().await;

    let (status, body) = get(&app, "/api/catalog/categories/1/products?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 3]);
    assert_eq!(body["hasMore"], true);
    assert_eq!(body["total"], 3);

    let (_, body) = get(&app, "/api/catalog/categories/3/products").await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn category_products_reject_non_numeric_id() {
    let app = app().await;
    let (status, body) = get(&app, "/api/catalog/categories/abc/products").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "ID da categoria inválido" }));
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn contact_form_accepts_valid_submission() {
    let app = app().await;
    let form = json!({
        "name": "Ana",
        "phone": "81999999999",
        "message": "Vocês entregam em Recife?"
    });
    let (status, body) = post(&app, "/api/contact", form.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn contact_form_reports_field_errors() {
    let app = app().await;
    let form = json!({ "name": "A", "phone": "123", "message": "Oi" });
    let (status, body) = post(&app, "/api/contact", form.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    for field in ["name", "phone", "message"] {
        assert!(body["errors"][field].is_array(), "missing error for {}", field);
    }
}

#[tokio::test]
async fn contact_form_rejects_malformed_json() {
    let app = app().await;
    let (status, body) = post(&app, "/api/contact", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": INVALID_BODY }));
}

#[tokio::test]
async fn whatsapp_link_contains_every_field() {
    let app = app().await;
    let form = json!({ "name": "Ana", "phone": "81999999999", "message": "Oi" });
    let (status, body) = post(&app, "/api/contact/whatsapp", form.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "open");
    assert_eq!(body["target"], "new_context");

    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/"));
    for fragment in ["Ana", "81999999999", "Oi"] {
        assert!(url.contains(fragment), "{} not in {}", fragment, url);
    }
    assert!(!url.contains(' '));
}

#[tokio::test]
async fn whatsapp_blank_fields_notify_without_link() {
    let app = app().await;
    let form = json!({ "name": "Ana", "phone": "", "message": "Oi" });
    let (status, body) = post(&app, "/api/contact/whatsapp", form.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "notify");
    assert!(body.get("url").is_none());
}

#[tokio::test]
async fn whatsapp_inquiry_links() {
    let app = app().await;

    let (status, body) = get(&app, "/api/contact/whatsapp?product_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().contains("Castanha%20de%20Caju"));

    let (status, body) = get(&app, "/api/contact/whatsapp").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().starts_with("https://wa.me/"));

    let (status, _) = get(&app, "/api/contact/whatsapp?product_id=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// AI helpers
// =============================================================================

#[tokio::test]
async fn seo_without_generator_returns_fallback() {
    let app = app().await;
    let request = json!({ "websiteContent": "<h1>Loja</h1>", "keyword": "castanhas" });
    let (status, body) = post(&app, "/api/seo/optimize", request.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let markup: SeoMarkup = serde_json::from_value(body).unwrap();
    assert_eq!(markup, SeoMarkup::fallback("castanhas"));
}

#[tokio::test]
async fn recommendations_come_from_the_named_category() {
    let app = app().await;

    let (status, body) = get(&app, "/api/recommendations?category=castanhas").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 3, 6]);

    let (_, body) = get(&app, "/api/recommendations?category=castanhas&limit=1").await;
    assert_eq!(ids(&body), vec![1]);

    for uri in ["/api/recommendations?category=inexistente", "/api/recommendations"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ids(&body).is_empty(), "{}", uri);
    }
}
