//! Domain models for storefront.

pub mod session;

pub use session::{ShopperSession, session_keys};
