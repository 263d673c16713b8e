//! Cart reducer.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, at most one per product.
//! Every transition takes `&self` and returns a new cart; the input is never
//! modified.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::format_amount;
use crate::types::{Price, ProductId, Quantity};

/// Errors produced by cart transitions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Merging quantities would exceed the largest representable quantity.
    #[error("quantity for product {0} would overflow")]
    QuantityOverflow(ProductId),
    /// A serialized cart listed the same product twice.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
}

/// A purchasable product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            price,
        }
    }
}

/// One line of the cart: a product snapshot and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: Quantity,
}

impl CartItem {
    fn from_product(product: &Product, quantity: Quantity) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity.get())
    }
}

/// The shopper's cart.
///
/// Invariants:
/// - at most one item per product id
/// - every item has quantity >= 1 (guaranteed by [`Quantity`])
///
/// Deserialization re-checks the first invariant, so a cart read back from a
/// session store is as trustworthy as one built through the transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product is already in the cart its quantity grows in place and
    /// the line keeps its position. Otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity would
    /// not fit in a `u32`.
    pub fn add_to_cart(&self, product: &Product, quantity: Quantity) -> Result<Self, CartError> {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityOverflow(product.id))?;
            }
            None => items.push(CartItem::from_product(product, quantity)),
        }
        Ok(Self { items })
    }

    /// Remove the line for `product`, if any.
    #[must_use]
    pub fn remove_from_cart(&self, product: &Product) -> Self {
        self.remove_id(product.id)
    }

    /// Remove the line for a product id, if any.
    #[must_use]
    pub fn remove_id(&self, id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Sum of price x quantity over all lines, unrounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.line_total().amount)
            .sum()
    }

    /// The total formatted to exactly two decimal places, e.g. `"359.97"`.
    #[must_use]
    pub fn compute_total(&self) -> String {
        format_amount(self.total())
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for a product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether the cart has a line for this product id.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (for a cart badge).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CartError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product::new(ProductId::new(1), "Wireless Headphones", Price::usd_cents(9_999))
    }

    fn backpack() -> Product {
        Product::new(ProductId::new(2), "Leather Backpack", Price::usd_cents(12_999))
    }

    fn tracker() -> Product {
        Product::new(ProductId::new(3), "Fitness Tracker", Price::usd_cents(7_999))
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    /// A few starting carts that do not contain the tracker.
    fn carts_without_tracker() -> Vec<Cart> {
        let empty = Cart::new();
        let one = empty.add_to_cart(&headphones(), qty(1)).unwrap();
        let two = one.add_to_cart(&backpack(), qty(4)).unwrap();
        vec![empty, one, two]
    }

    #[test]
    fn test_add_new_product_appends_line() {
        for cart in carts_without_tracker() {
            let next = cart.add_to_cart(&tracker(), qty(3)).unwrap();
            assert_eq!(next.len(), cart.len() + 1);
            let last = next.items().last().unwrap();
            assert_eq!(last.id, tracker().id);
            assert_eq!(last.title, "Fitness Tracker");
            assert_eq!(last.quantity.get(), 3);
        }
    }

    #[test]
    fn test_add_existing_product_merges_in_place() {
        let cart = Cart::new()
            .add_to_cart(&headphones(), qty(1))
            .unwrap()
            .add_to_cart(&backpack(), qty(2))
            .unwrap();

        let next = cart.add_to_cart(&headphones(), qty(4)).unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next.items()[0].id, headphones().id);
        assert_eq!(next.items()[0].quantity.get(), 5);
        assert_eq!(next.items()[1], cart.items()[1]);
    }

    #[test]
    fn test_add_twice_yields_single_line() {
        let cart = Cart::new()
            .add_to_cart(&backpack(), qty(2))
            .unwrap()
            .add_to_cart(&backpack(), qty(3))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(backpack().id).unwrap().quantity.get(), 5);
    }

    #[test]
    fn test_add_does_not_mutate_input() {
        let cart = Cart::new().add_to_cart(&headphones(), qty(1)).unwrap();
        let snapshot = cart.clone();
        let _ = cart.add_to_cart(&headphones(), qty(1)).unwrap();
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn test_remove_round_trip() {
        for cart in carts_without_tracker() {
            let added = cart.add_to_cart(&tracker(), qty(2)).unwrap();
            assert_eq!(added.remove_from_cart(&tracker()), cart);
        }
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cart = Cart::new().add_to_cart(&headphones(), qty(1)).unwrap();
        assert_eq!(cart.remove_from_cart(&backpack()), cart);
        assert_eq!(Cart::new().remove_from_cart(&backpack()), Cart::new());
    }

    #[test]
    fn test_total_is_additive() {
        for cart in carts_without_tracker() {
            let added = cart.add_to_cart(&tracker(), qty(3)).unwrap();
            assert_eq!(
                added.total(),
                cart.total() + tracker().price.amount * Decimal::from(3)
            );
        }
    }

    #[test]
    fn test_checkout_scenario_totals() {
        let cart = Cart::new().add_to_cart(&headphones(), qty(1)).unwrap();
        assert_eq!(cart.compute_total(), "99.99");

        let cart = cart.add_to_cart(&backpack(), qty(2)).unwrap();
        assert_eq!(cart.compute_total(), "359.97");

        let cart = cart.remove_from_cart(&headphones());
        assert_eq!(cart.compute_total(), "259.98");
    }

    #[test]
    fn test_empty_cart_total() {
        assert_eq!(Cart::new().compute_total(), "0.00");
        assert_eq!(Cart::new().item_count(), 0);
        assert!(Cart::new().is_empty());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart::new()
            .add_to_cart(&headphones(), qty(2))
            .unwrap()
            .add_to_cart(&tracker(), qty(3))
            .unwrap();
        assert_eq!(cart.item_count(), 5);
        assert!(cart.contains(tracker().id));
        assert!(!cart.contains(backpack().id));
    }

    #[test]
    fn test_merge_overflow_is_rejected() {
        let cart = Cart::new()
            .add_to_cart(&headphones(), qty(u32::MAX))
            .unwrap();
        assert_eq!(
            cart.add_to_cart(&headphones(), qty(1)),
            Err(CartError::QuantityOverflow(headphones().id))
        );
    }

    #[test]
    fn test_line_total() {
        let cart = Cart::new().add_to_cart(&backpack(), qty(2)).unwrap();
        assert_eq!(cart.items()[0].line_total().display(), "$259.98");
    }

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let cart = Cart::new().add_to_cart(&headphones(), qty(1)).unwrap();
        let line = serde_json::to_value(&cart.items()[0]).unwrap();
        let doubled = serde_json::Value::Array(vec![line.clone(), line]);

        let err = serde_json::from_value::<Cart>(doubled).unwrap_err();
        assert!(err.to_string().contains("duplicate line item"));
    }

    #[test]
    fn test_serde_preserves_order() {
        let cart = Cart::new()
            .add_to_cart(&tracker(), qty(1))
            .unwrap()
            .add_to_cart(&headphones(), qty(2))
            .unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.items()[0].id, tracker().id);
    }
}
