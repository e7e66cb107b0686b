//! The session cart: line items and derived totals.
//!
//! [`CartState`] is an explicit owned value. Routes load it from the
//! session, call the pure mutators here, and save it back; nothing in this
//! module performs I/O. Totals are derived on demand and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{LineItemId, Product};

/// Flat per-unit surcharge applied when a line carries embroidery text.
///
/// 8.00 in the store currency.
pub const EMBROIDERY_FEE: Decimal = Decimal::from_parts(800, 0, 0, false, 2);

/// Errors from cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested color is not offered for the product.
    #[error("color \"{color}\" is not available for this product")]
    ColorUnavailable {
        /// The rejected color key.
        color: String,
    },
}

/// One configured cart entry: product snapshot, color, quantity, and
/// optional embroidery text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// In-memory address of this line.
    pub id: LineItemId,
    /// Product snapshot taken at add-time; not re-fetched on submit.
    pub product: Product,
    /// Chosen color key, one of `product.colors`.
    pub color: String,
    /// Units ordered, always >= 1.
    pub quantity: u32,
    /// Embroidery text; `None` when absent. Never empty or
    /// whitespace-only.
    pub embroidery_text: Option<String>,
}

impl LineItem {
    /// This line's contribution to the grand total (price and, when
    /// embroidered, fee, both times quantity). Full precision; rounding is
    /// a display concern.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        let qty = Decimal::from(self.quantity);
        let mut total = self.product.base_price * qty;
        if self.embroidery_text.is_some() {
            total += EMBROIDERY_FEE * qty;
        }
        total
    }
}

/// Derived cart totals. Recomputed whenever the cart changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of unit price x quantity over all lines.
    pub subtotal: Decimal,
    /// Sum of [`EMBROIDERY_FEE`] x quantity over embroidered lines.
    pub embroidery_fee: Decimal,
    /// `subtotal + embroidery_fee`.
    pub grand_total: Decimal,
}

/// The session-scoped cart.
///
/// Lives for one session, is reset on successful order submission, and is
/// never persisted across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (for the cart badge).
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Append a new line item and return its identifier.
    ///
    /// The quantity is clamped to at least 1 rather than rejected, and
    /// embroidery text is trimmed with empty input normalized to absent.
    /// Duplicate product+color combinations stay distinct lines; existing
    /// lines are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ColorUnavailable`] when `color` is not in the
    /// product's color set.
    pub fn add(
        &mut self,
        product: Product,
        color: &str,
        quantity: i64,
        embroidery_text: Option<&str>,
    ) -> Result<LineItemId, CartError> {
        if !product.has_color(color) {
            return Err(CartError::ColorUnavailable {
                color: color.to_owned(),
            });
        }

        let quantity = u32::try_from(quantity).ok().filter(|q| *q >= 1).unwrap_or(1);

        let embroidery_text = embroidery_text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned);

        let id = LineItemId::generate();
        self.items.push(LineItem {
            id,
            product,
            color: color.to_owned(),
            quantity,
            embroidery_text,
        });

        Ok(id)
    }

    /// Remove the line with the given identifier. No-op when absent.
    pub fn remove(&mut self, id: LineItemId) {
        self.items.retain(|item| item.id != id);
    }

    /// Empty the cart (after a successful order submission).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compute the derived totals over the current lines.
    ///
    /// Pure and order-independent. Amounts accumulate in full decimal
    /// precision; two-decimal rounding is applied only at presentation.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let mut subtotal = Decimal::ZERO;
        let mut embroidery_fee = Decimal::ZERO;

        for item in &self.items {
            let qty = Decimal::from(item.quantity);
            subtotal += item.product.base_price * qty;
            if item.embroidery_text.is_some() {
                embroidery_fee += EMBROIDERY_FEE * qty;
            }
        }

        Totals {
            subtotal,
            embroidery_fee,
            grand_total: subtotal + embroidery_fee,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            category: "hoodie".to_string(),
            description: String::new(),
            base_price: Decimal::new(price_cents, 2),
            colors: vec!["green".to_string(), "black".to_string()],
            images: vec![],
            in_stock: true,
        }
    }

    #[test]
    fn test_embroidery_fee_value() {
        assert_eq!(EMBROIDERY_FEE, Decimal::new(800, 2));
    }

    #[test]
    fn test_totals_scenario_from_receipt() {
        // 35.00 x 2 embroidered + 20.00 x 1 plain
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 2, Some("Sam")).unwrap();
        cart.add(product("p2", 2000), "black", 1, None).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Decimal::new(9000, 2));
        assert_eq!(totals.embroidery_fee, Decimal::new(1600, 2));
        assert_eq!(totals.grand_total, Decimal::new(10600, 2));
    }

    #[test]
    fn test_totals_order_independent() {
        let mut forward = CartState::new();
        forward.add(product("p1", 3500), "green", 2, Some("Sam")).unwrap();
        forward.add(product("p2", 2000), "black", 1, None).unwrap();
        forward.add(product("p3", 1250), "green", 3, Some("Team")).unwrap();

        let mut reverse = CartState::new();
        reverse.add(product("p3", 1250), "green", 3, Some("Team")).unwrap();
        reverse.add(product("p2", 2000), "black", 1, None).unwrap();
        reverse.add(product("p1", 3500), "green", 2, Some("Sam")).unwrap();

        assert_eq!(forward.totals(), reverse.totals());
    }

    #[test]
    fn test_quantity_clamped_to_one() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 0, None).unwrap();
        cart.add(product("p2", 2000), "green", -3, None).unwrap();

        assert!(cart.items().iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_whitespace_embroidery_normalized_to_absent() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 1, Some("  ")).unwrap();

        let item = cart.items().first().unwrap();
        assert_eq!(item.embroidery_text, None);
        assert_eq!(cart.totals().embroidery_fee, Decimal::ZERO);
    }

    #[test]
    fn test_embroidery_text_trimmed() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 1, Some("  Sam ")).unwrap();

        let item = cart.items().first().unwrap();
        assert_eq!(item.embroidery_text.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 1, None).unwrap();
        let before = cart.clone();

        let id = cart.add(product("p2", 2000), "black", 2, Some("Sam")).unwrap();
        assert_eq!(cart.len(), 2);

        cart.remove(id);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 1, None).unwrap();

        cart.remove(LineItemId::generate());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_duplicate_product_color_stays_distinct() {
        let mut cart = CartState::new();
        let first = cart.add(product("p1", 3500), "green", 1, None).unwrap();
        let second = cart.add(product("p1", 3500), "green", 1, None).unwrap();

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_unknown_color_rejected() {
        let mut cart = CartState::new();
        let err = cart.add(product("p1", 3500), "mauve", 1, None).unwrap_err();
        assert_eq!(
            err,
            CartError::ColorUnavailable {
                color: "mauve".to_string()
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unit_count_sums_quantities() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 2, None).unwrap();
        cart.add(product("p2", 2000), "black", 3, None).unwrap();
        assert_eq!(cart.unit_count(), 5);
    }

    #[test]
    fn test_line_total_includes_fee_per_unit() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 2, Some("Sam")).unwrap();
        let item = cart.items().first().unwrap();
        // (35.00 + 8.00) x 2
        assert_eq!(item.line_total(), Decimal::new(8600, 2));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 1, None).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().grand_total, Decimal::ZERO);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let mut cart = CartState::new();
        cart.add(product("p1", 3500), "green", 2, Some("Sam")).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
