//! Integration tests for backend outages and order rejections.
//!
//! The store page must stay up when the catalog is down, and a failed
//! order submission must never lose the customer's cart.

use axum::http::StatusCode;

use school_merch_integration_tests::{MockBackend, MockBackendConfig, TestApp, hoodie_json};

// =============================================================================
// Catalog Outage
// =============================================================================

#[tokio::test]
async fn test_store_page_degrades_when_catalog_down() {
    let backend = MockBackend::spawn(MockBackendConfig {
        unavailable: true,
        ..MockBackendConfig::default()
    })
    .await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("temporarily unavailable");
    // The cart panel still renders from the session
    response.assert_contains("Your cart is empty.");
}

#[tokio::test]
async fn test_add_fails_as_bad_gateway_when_catalog_down() {
    let backend = MockBackend::spawn(MockBackendConfig {
        unavailable: true,
        ..MockBackendConfig::default()
    })
    .await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/cart/add",
            &[
                ("product_id", "p1"),
                ("color", "green"),
                ("quantity", "1"),
                ("embroidery_text", ""),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_out_of_stock_product_cannot_be_added() {
    let mut product = hoodie_json();
    product["in_stock"] = serde_json::Value::Bool(false);

    let backend = MockBackend::spawn(MockBackendConfig {
        products: vec![product],
        ..MockBackendConfig::default()
    })
    .await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/cart/add",
            &[
                ("product_id", "p1"),
                ("color", "green"),
                ("quantity", "1"),
                ("embroidery_text", ""),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Checkout Failures
// =============================================================================

async fn store_with_hoodie_in_cart(
    order_response: Result<serde_json::Value, (u16, serde_json::Value)>,
) -> (MockBackend, TestApp) {
    let backend = MockBackend::spawn(MockBackendConfig {
        products: vec![hoodie_json()],
        order_response,
        ..MockBackendConfig::default()
    })
    .await;
    let mut app = TestApp::new(&backend.base_url);

    app.post_form(
        "/cart/add",
        &[
            ("product_id", "p1"),
            ("color", "green"),
            ("quantity", "1"),
            ("embroidery_text", ""),
        ],
    )
    .await;

    (backend, app)
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/cart/checkout",
            &[
                ("customer_name", "Sam Parent"),
                ("customer_email", "sam@example.com"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    response.assert_contains("your cart is empty");
    assert!(backend.orders().await.is_empty());
}

#[tokio::test]
async fn test_customer_details_validated_before_empty_cart() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/cart/checkout",
            &[("customer_name", "   "), ("customer_email", "")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    response.assert_contains("please enter your name");
}

#[tokio::test]
async fn test_invalid_email_keeps_cart() {
    let (backend, mut app) = store_with_hoodie_in_cart(Ok(serde_json::json!({
        "grand_total": 35.0
    })))
    .await;

    let response = app
        .post_form(
            "/cart/checkout",
            &[
                ("customer_name", "Sam Parent"),
                ("customer_email", "not-an-email"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.orders().await.is_empty());

    let count = app.get("/cart/count").await;
    count.assert_contains("Cart: 1");
}

#[tokio::test]
async fn test_backend_rejection_surfaces_detail_and_keeps_cart() {
    let (backend, mut app) = store_with_hoodie_in_cart(Err((
        422,
        serde_json::json!({"detail": "Green hoodies are sold out"}),
    )))
    .await;

    let response = app
        .post_form(
            "/cart/checkout",
            &[
                ("customer_name", "Sam Parent"),
                ("customer_email", "sam@example.com"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    response.assert_contains("Green hoodies are sold out");
    // The rejected submission reached the backend but the cart survives
    assert_eq!(backend.orders().await.len(), 1);

    let count = app.get("/cart/count").await;
    count.assert_contains("Cart: 1");
}
