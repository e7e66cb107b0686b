//! Data models for the storefront.

pub mod session;

pub use session::keys as session_keys;
