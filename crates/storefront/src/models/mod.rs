//! Session models for the storefront.

pub mod session;

pub use session::keys as session_keys;
pub use session::{cart_token, ensure_cart_token};
