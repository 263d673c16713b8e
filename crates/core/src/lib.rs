//! Gridshop Core - Shared types and the cart reducer.
//!
//! This crate provides the domain types used by the storefront:
//! - `types` - Newtype wrappers for IDs, prices and quantities
//! - `cart` - Products, cart line items and the pure cart transitions
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session handling. Every cart operation returns a new [`Cart`] and leaves
//! its input untouched.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartItem, Product};
pub use types::*;
