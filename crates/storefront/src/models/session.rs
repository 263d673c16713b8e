//! Session-related types.
//!
//! Everything a shopper has done on the page lives in one [`ShopperSession`]
//! value stored under a single session key: the cart itself plus the pending
//! quantity shown on each product card.

use std::collections::HashMap;

use gridshop_core::{Cart, CartError, Product, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys for shopper data.
pub mod session_keys {
    /// Key for the shopper's cart and quantity selectors.
    pub const SHOPPER: &str = "shopper";
}

/// Per-session shopper state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperSession {
    /// The cart.
    #[serde(default)]
    pub cart: Cart,
    /// Pending quantity per product card. Missing entries mean 1.
    #[serde(default)]
    selectors: HashMap<ProductId, Quantity>,
}

impl ShopperSession {
    /// Load shopper state from the session, or a fresh one if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails or the stored value is
    /// malformed.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(session
            .get::<Self>(session_keys::SHOPPER)
            .await?
            .unwrap_or_default())
    }

    /// Write shopper state back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn save(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(session_keys::SHOPPER, self).await
    }

    /// The quantity currently shown on a product card.
    #[must_use]
    pub fn pending_quantity(&self, id: ProductId) -> Quantity {
        self.selectors.get(&id).copied().unwrap_or_default()
    }

    /// Whether a product card is locked because its product is in the cart.
    #[must_use]
    pub fn is_locked(&self, id: ProductId) -> bool {
        self.cart.contains(id)
    }

    /// Bump a card's pending quantity. No-op while the product is in the cart.
    pub fn increment(&mut self, id: ProductId) {
        if !self.is_locked(id) {
            let next = self.pending_quantity(id).increment();
            self.selectors.insert(id, next);
        }
    }

    /// Lower a card's pending quantity, never below 1. No-op while the product
    /// is in the cart.
    pub fn decrement(&mut self, id: ProductId) {
        if !self.is_locked(id) {
            let next = self.pending_quantity(id).decrement();
            self.selectors.insert(id, next);
        }
    }

    /// Add to the cart, using the card's pending quantity when none is given.
    ///
    /// Returns the quantity that was added.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from the cart transition; state is unchanged
    /// on error.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: Option<Quantity>,
    ) -> Result<Quantity, CartError> {
        let quantity = quantity.unwrap_or_else(|| self.pending_quantity(product.id));
        self.cart = self.cart.add_to_cart(product, quantity)?;
        Ok(quantity)
    }

    /// Remove a product's line. The card keeps its pending quantity.
    pub fn remove(&mut self, product: &Product) {
        self.cart = self.cart.remove_from_cart(product);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gridshop_core::Price;

    use super::*;

    fn bottle() -> Product {
        Product::new(ProductId::new(4), "Smart Water Bottle", Price::usd_cents(4_999))
    }

    #[test]
    fn test_pending_quantity_defaults_to_one() {
        let shopper = ShopperSession::default();
        assert_eq!(shopper.pending_quantity(bottle().id), Quantity::ONE);
    }

    #[test]
    fn test_selector_floor() {
        let mut shopper = ShopperSession::default();
        shopper.increment(bottle().id);
        shopper.increment(bottle().id);
        assert_eq!(shopper.pending_quantity(bottle().id).get(), 3);

        for _ in 0..5 {
            shopper.decrement(bottle().id);
        }
        assert_eq!(shopper.pending_quantity(bottle().id).get(), 1);
    }

    #[test]
    fn test_add_uses_pending_quantity() {
        let mut shopper = ShopperSession::default();
        shopper.increment(bottle().id);

        let added = shopper.add(&bottle(), None).unwrap();

        assert_eq!(added.get(), 2);
        assert_eq!(shopper.cart.get(bottle().id).unwrap().quantity.get(), 2);
    }

    #[test]
    fn test_selector_locked_while_in_cart() {
        let mut shopper = ShopperSession::default();
        shopper.add(&bottle(), None).unwrap();

        shopper.increment(bottle().id);
        assert_eq!(shopper.pending_quantity(bottle().id), Quantity::ONE);
        assert!(shopper.is_locked(bottle().id));

        shopper.remove(&bottle());
        assert!(!shopper.is_locked(bottle().id));
        shopper.increment(bottle().id);
        assert_eq!(shopper.pending_quantity(bottle().id).get(), 2);
    }

    #[test]
    fn test_explicit_quantity_overrides_selector() {
        let mut shopper = ShopperSession::default();
        shopper.add(&bottle(), Some(Quantity::new(4).unwrap())).unwrap();
        assert_eq!(shopper.cart.item_count(), 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut shopper = ShopperSession::default();
        shopper.increment(ProductId::new(2));
        shopper.add(&bottle(), None).unwrap();

        let value = serde_json::to_value(&shopper).unwrap();
        let restored: ShopperSession = serde_json::from_value(value).unwrap();
        assert_eq!(restored, shopper);
    }
}
