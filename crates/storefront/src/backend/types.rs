//! Wire types for the catalog/order backend.
//!
//! Wire records are converted into domain types at the gateway boundary;
//! nothing outside this module sees the backend's field spellings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use school_merch_core::{Product, ProductId};

/// A catalog product as it appears on the wire.
///
/// The backend has been seen keying products by a generic `id` or by a
/// datastore-specific `_id`. Both spellings are accepted here and resolved
/// to one canonical identifier in the [`Product`] conversion; the rest of
/// the codebase never probes alternative fields.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    id: Option<String>,
    #[serde(rename = "_id")]
    datastore_id: Option<String>,
    title: String,
    category: String,
    #[serde(default)]
    description: String,
    base_price: Decimal,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default = "default_in_stock")]
    in_stock: bool,
}

const fn default_in_stock() -> bool {
    true
}

/// A product record arrived without any identifier field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("product record \"{title}\" has no identifier field")]
pub struct MissingIdentifier {
    /// Title of the offending record, for the log line.
    pub title: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = MissingIdentifier;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let ProductRecord {
            id,
            datastore_id,
            title,
            category,
            description,
            base_price,
            colors,
            images,
            in_stock,
        } = record;

        // The canonical identifier is assigned exactly once, here.
        // `id` wins when the backend sends both spellings.
        let id = id
            .or(datastore_id)
            .ok_or_else(|| MissingIdentifier {
                title: title.clone(),
            })?;

        Ok(Self {
            id: ProductId::new(id),
            title,
            category,
            description,
            base_price,
            colors,
            images,
            in_stock,
        })
    }
}

/// Request body for `POST /api/products`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    /// Display title.
    pub title: String,
    /// Category key.
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// Base price per unit.
    pub base_price: Decimal,
    /// Offered color keys.
    pub colors: Vec<String>,
    /// Image URLs.
    pub images: Vec<String>,
    /// Whether the product is immediately purchasable.
    pub in_stock: bool,
}

/// Success body of `POST /api/orders`.
///
/// Only the grand total is needed for the receipt message; other fields
/// the backend may send are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfirmation {
    /// The amount charged, as computed by the order service.
    pub grand_total: Decimal,
}
