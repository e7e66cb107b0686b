//! Store page route handler.
//!
//! The whole storefront is a single page: the catalog grid, the cart
//! panel, and the checkout form all render here, with HTMX fragments
//! keeping the cart side current after mutations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use tower_sessions::Session;
use tracing::instrument;

use school_merch_core::{Product, color_key};

use crate::filters;
use crate::routes::cart::{CartView, load_cart};
use crate::state::AppState;

/// Color option display data for templates.
#[derive(Clone)]
pub struct ColorOptionView {
    pub key: String,
    pub label: String,
    pub swatch: String,
}

impl ColorOptionView {
    /// Build a view for a color key, falling back to the raw key and a
    /// neutral swatch when the key is not in the known palette.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        color_key(key).map_or_else(
            || Self {
                key: key.to_string(),
                label: key.to_string(),
                swatch: "#d1d5db".to_string(),
            },
            |known| Self {
                key: known.key.to_string(),
                label: known.label.to_string(),
                swatch: known.swatch.to_string(),
            },
        )
    }
}

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub colors: Vec<ColorOptionView>,
    pub in_stock: bool,
}

impl From<Product> for ProductCardView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title,
            category: product.category,
            description: product.description,
            price: product.base_price,
            image: product.images.into_iter().next(),
            colors: product
                .colors
                .iter()
                .map(|key| ColorOptionView::for_key(key))
                .collect(),
            in_stock: product.in_stock,
        }
    }
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub catalog_unavailable: bool,
    pub cart: CartView,
    pub count: u32,
}

/// Display the store page.
///
/// A catalog outage degrades to an empty grid with a notice; the cart and
/// checkout panel still render from the session.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let (products, catalog_unavailable) = match state.backend().list_products().await {
        Ok(products) => (
            products.into_iter().map(ProductCardView::from).collect(),
            false,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch catalog for store page");
            (Vec::new(), true)
        }
    };

    let cart = load_cart(&session).await;
    let count = cart.unit_count();

    HomeTemplate {
        products,
        catalog_unavailable,
        cart: CartView::from(&cart),
        count,
    }
}
