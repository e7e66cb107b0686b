//! Core types for School Merch.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod product;

pub use email::{Email, EmailError};
pub use id::{LineItemId, ProductId};
pub use product::{COLOR_KEYS, ColorKey, Product, color_key};
