//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store page (catalog + cart + checkout)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart/items             - Cart items panel (fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/add               - Add line (returns count fragment, triggers cart-updated)
//! POST /cart/remove            - Remove line (returns count fragment, triggers cart-updated)
//! POST /cart/checkout          - Submit order (returns order_result fragment)
//!
//! # Admin
//! GET  /admin/products/new     - New product form
//! POST /admin/products         - Create product, redirect to /
//! ```

pub mod admin;
pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products/new", get(admin::new_product_page))
        .route("/products", post(admin::create_product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/admin", admin_routes())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build the full application router with sessions and tracing applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(create_session_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
