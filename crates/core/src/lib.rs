//! School Merch Core - Shared types and cart domain logic.
//!
//! This crate provides the types used across the School Merch components:
//! - `storefront` - Public-facing merch site and minimal admin page
//! - `integration-tests` - Cross-crate end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The cart ([`cart::CartState`]) and order payload building
//! ([`order::build_order_request`]) live here so they can be unit tested
//! without a web harness.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the
//!   product snapshot
//! - [`cart`] - The session cart: line items and derived totals
//! - [`order`] - Order request payload shaping and validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod types;

pub use cart::{CartError, CartState, EMBROIDERY_FEE, LineItem, Totals};
pub use order::{CustomerDetails, OrderError, OrderItem, OrderRequest, build_order_request};
pub use types::*;
