//! Product snapshot and the color key table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog product, as seen by the storefront.
///
/// Owned by the catalog service and read-only to the client. Cart lines
/// hold the snapshot taken at add-time; it is not re-fetched when the
/// order is submitted, so a price change between add and checkout does not
/// reprice the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Canonical identifier, assigned at ingestion.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Category key (e.g. "hoodie", "beanie").
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// Base price per unit, in the store currency.
    pub base_price: Decimal,
    /// Available color keys. A cart line must pick one of these.
    pub colors: Vec<String>,
    /// Image URLs, first one is the card image.
    pub images: Vec<String>,
    /// Whether the product can currently be added to a cart.
    pub in_stock: bool,
}

impl Product {
    /// Whether `color` is one of this product's available colors.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// The primary image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A known color key with its display label and swatch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKey {
    /// Stable key stored on products and cart lines.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// CSS color for the swatch.
    pub swatch: &'static str,
}

/// Colors the store prints merchandise in.
pub const COLOR_KEYS: &[ColorKey] = &[
    ColorKey {
        key: "green",
        label: "Green",
        swatch: "#22c55e",
    },
    ColorKey {
        key: "black",
        label: "Black",
        swatch: "#111827",
    },
    ColorKey {
        key: "yellow",
        label: "Yellow",
        swatch: "#f59e0b",
    },
    ColorKey {
        key: "white",
        label: "White",
        swatch: "#f3f4f6",
    },
];

/// Look up the display metadata for a color key, if it is a known one.
#[must_use]
pub fn color_key(key: &str) -> Option<&'static ColorKey> {
    COLOR_KEYS.iter().find(|c| c.key == key)
}
