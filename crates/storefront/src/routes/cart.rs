//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The whole cart is stored in the session; totals are derived from it on
//! every request and never stored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use school_merch_core::{
    CartState, CustomerDetails, LineItem, LineItemId, build_order_request, color_key,
};

use crate::backend::BackendError;
use crate::error::{AppError, Result};
use crate::filters::format_price;
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub color: String,
    pub color_label: String,
    pub swatch: String,
    pub quantity: u32,
    pub embroidery_text: Option<String>,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub embroidery_fee: String,
    pub grand_total: String,
    pub unit_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartState::new())
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        let totals = cart.totals();

        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_price(&totals.subtotal),
            embroidery_fee: format_price(&totals.embroidery_fee),
            grand_total: format_price(&totals.grand_total),
            unit_count: cart.unit_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        let (color_label, swatch) = color_key(&line.color).map_or_else(
            || (line.color.clone(), "#d1d5db".to_string()),
            |key| (key.label.to_string(), key.swatch.to_string()),
        );

        Self {
            id: line.id.to_string(),
            title: line.product.title.clone(),
            category: line.product.category.clone(),
            color: line.color.clone(),
            color_label,
            swatch,
            quantity: line.quantity,
            embroidery_text: line.embroidery_text.clone(),
            line_total: format_price(&line.line_total()),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to an empty cart.
pub async fn load_cart(session: &Session) -> CartState {
    session
        .get::<CartState>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart to the session.
async fn save_cart(session: &Session, cart: &CartState) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add to cart form data.
///
/// `quantity` stays a raw string: whatever the browser sends is coerced
/// by [`parse_quantity`] rather than rejected at deserialization.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub color: String,
    pub quantity: Option<String>,
    pub embroidery_text: Option<String>,
}

/// Coerce raw quantity input to the nearest integer.
///
/// Unparseable or missing input falls back to 1; non-positive values pass
/// through and are clamped by the cart. Quantity input never causes a
/// request to be rejected.
fn parse_quantity(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 1;
    };

    if let Ok(quantity) = raw.parse::<i64>() {
        return quantity;
    }

    match raw.parse::<f64>() {
        Ok(quantity) if quantity.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let rounded = quantity.round().clamp(1.0, 1_000_000.0) as i64;
            rounded
        }
        _ => 1,
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: Uuid,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub notes: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Order submission result fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_result.html")]
pub struct OrderResultTemplate {
    pub ok: bool,
    pub message: String,
}

/// Get the cart items panel (HTMX).
#[instrument(skip(session))]
pub async fn items(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartItemsTemplate {
        cart: CartView::from(&cart),
    }
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    CartCountTemplate {
        count: cart.unit_count(),
    }
}

/// Add an item to the cart (HTMX).
///
/// Fetches the catalog to snapshot the product at add time, then appends a
/// new line to the session cart. Returns the cart count fragment with an
/// HTMX trigger so the items panel refreshes itself.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let products = state.backend().list_products().await?;
    let product = products
        .into_iter()
        .find(|p| p.id.as_str() == form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    if !product.in_stock {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            product.title
        )));
    }

    let mut cart = load_cart(&session).await;
    cart.add(
        product,
        &form.color,
        parse_quantity(form.quantity.as_deref()),
        form.embroidery_text.as_deref(),
    )?;
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.unit_count(),
        },
    )
        .into_response())
}

/// Remove a line from the cart (HTMX).
///
/// Removing an unknown line id is a no-op; the response is the same either
/// way.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    cart.remove(LineItemId::from(form.line_id));
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.unit_count(),
        },
    )
        .into_response())
}

/// Submit the cart as an order (HTMX).
///
/// Validation failures and backend rejections render inline in the order
/// result panel and leave the cart untouched; only a confirmed order
/// clears it.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let cart = load_cart(&session).await;

    let customer = CustomerDetails {
        name: form.customer_name,
        email: form.customer_email,
        notes: form.notes.unwrap_or_default(),
    };

    let order = match build_order_request(&customer, cart.items()) {
        Ok(order) => order,
        Err(e) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                OrderResultTemplate {
                    ok: false,
                    message: e.to_string(),
                },
            )
                .into_response());
        }
    };

    match state.backend().submit_order(&order).await {
        Ok(confirmation) => {
            let mut cart = cart;
            cart.clear();
            save_cart(&session, &cart).await?;

            Ok((
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                OrderResultTemplate {
                    ok: true,
                    message: format!(
                        "Order placed! Total: {}",
                        format_price(&confirmation.grand_total)
                    ),
                },
            )
                .into_response())
        }
        Err(BackendError::Api { status, message }) => {
            tracing::warn!(status, %message, "Order rejected by backend");

            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                OrderResultTemplate {
                    ok: false,
                    message,
                },
            )
                .into_response())
        }
        Err(e) => Err(AppError::from(e)),
    }
}
