//! Order request payload shaping and validation.
//!
//! [`build_order_request`] is the single place where cart lines become the
//! wire payload for the order service. It owns the user-facing validation
//! of customer details; the gateway that actually submits the payload
//! lives in the storefront crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::LineItem;
use crate::types::{Email, ProductId};

/// Raw customer input from the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDetails {
    /// Customer name for the order.
    pub name: String,
    /// Email for the receipt.
    pub email: String,
    /// Optional free-form note to the merch stand.
    #[serde(default)]
    pub notes: String,
}

/// Errors from order payload building.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Customer details are missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// Submit was attempted with no line items.
    #[error("your cart is empty")]
    EmptyCart,
}

/// One order line on the wire: `{product_id, color, quantity,
/// embroidery_text | null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Canonical product identifier captured at catalog ingestion.
    pub product_id: ProductId,
    /// Chosen color key.
    pub color: String,
    /// Units ordered.
    pub quantity: u32,
    /// Embroidery text, `null` when absent.
    pub embroidery_text: Option<String>,
}

/// The order submission payload for `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Validated customer name.
    pub customer_name: String,
    /// Validated customer email.
    pub customer_email: Email,
    /// Free-form note, empty when the customer left none.
    pub notes: String,
    /// The cart lines.
    pub items: Vec<OrderItem>,
}

/// Build the order payload from customer details and the current cart
/// lines.
///
/// # Errors
///
/// - [`OrderError::Validation`] when the trimmed name is empty or the
///   email is missing or structurally invalid.
/// - [`OrderError::EmptyCart`] when there are no line items.
pub fn build_order_request(
    customer: &CustomerDetails,
    items: &[LineItem],
) -> Result<OrderRequest, OrderError> {
    let name = customer.name.trim();
    if name.is_empty() {
        return Err(OrderError::Validation(
            "please enter your name".to_string(),
        ));
    }

    let email = match customer.email.trim() {
        "" => {
            return Err(OrderError::Validation(
                "please enter your email".to_string(),
            ));
        }
        trimmed => Email::parse(trimmed).map_err(|e| OrderError::Validation(e.to_string()))?,
    };

    if items.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    Ok(OrderRequest {
        customer_name: name.to_owned(),
        customer_email: email,
        notes: customer.notes.trim().to_owned(),
        items: items
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id.clone(),
                color: line.color.clone(),
                quantity: line.quantity,
                embroidery_text: line.embroidery_text.clone(),
            })
            .collect(),
    })
}
