//! Integration tests for admin product creation.

use axum::http::StatusCode;

use school_merch_integration_tests::{MockBackend, MockBackendConfig, TestApp};

#[tokio::test]
async fn test_new_product_form_renders_palette() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app.get("/admin/products/new").await;
    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("New Product");
    response.assert_contains("Green");
    response.assert_contains("Black");
    response.assert_contains("Yellow");
    response.assert_contains("White");
}

#[tokio::test]
async fn test_create_product_posts_to_backend_and_redirects() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/admin/products",
            &[
                ("title", "Track Jacket"),
                ("category", "Jacket"),
                ("base_price", "45.00"),
                ("image", "https://cdn.example/jacket.jpg"),
                ("description", "Warm-up jacket"),
                ("color_green", "on"),
                ("color_white", "on"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let created = backend.created_products().await;
    assert_eq!(created.len(), 1);
    let product = &created[0];
    assert_eq!(product["title"], "Track Jacket");
    assert_eq!(product["category"], "jacket");
    assert_eq!(product["base_price"], 45.0);
    assert_eq!(product["colors"], serde_json::json!(["green", "white"]));
    assert_eq!(product["images"], serde_json::json!(["https://cdn.example/jacket.jpg"]));
    assert_eq!(product["in_stock"], true);
}

#[tokio::test]
async fn test_create_product_requires_title() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/admin/products",
            &[
                ("title", "   "),
                ("category", "shirt"),
                ("base_price", "15.00"),
                ("color_green", "on"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Title is required");
    assert!(backend.created_products().await.is_empty());
}

#[tokio::test]
async fn test_create_product_requires_a_color() {
    let backend = MockBackend::spawn(MockBackendConfig::default()).await;
    let mut app = TestApp::new(&backend.base_url);

    let response = app
        .post_form(
            "/admin/products",
            &[
                ("title", "Shirt"),
                ("category", "shirt"),
                ("base_price", "15.00"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Pick at least one color");
    assert!(backend.created_products().await.is_empty());
}
