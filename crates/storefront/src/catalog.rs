//! The fixed product catalog.
//!
//! The catalog is static configuration: four products defined at startup and
//! never edited at runtime.

use gridshop_core::{Price, Product, ProductId};

/// The set of purchasable products, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Product::new(
                ProductId::new(1),
                "Wireless Headphones",
                Price::usd_cents(9_999),
            ),
            Product::new(
                ProductId::new(2),
                "Leather Backpack",
                Price::usd_cents(12_999),
            ),
            Product::new(
                ProductId::new(3),
                "Fitness Tracker",
                Price::usd_cents(7_999),
            ),
            Product::new(
                ProductId::new(4),
                "Smart Water Bottle",
                Price::usd_cents(4_999),
            ),
        ])
    }
}
