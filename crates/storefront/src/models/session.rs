//! Session data models.
//!
//! The shopping cart is stored whole in the session as a serialized
//! `CartState`; no other state lives there.

/// Session key constants.
pub mod keys {
    /// Key for the serialized cart state.
    pub const CART: &str = "cart";
}
