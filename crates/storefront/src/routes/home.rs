//! Home page route handler.
//!
//! The whole storefront is one page: the product grid, and below it the cart
//! panel whenever the cart has at least one line.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use gridshop_core::{Cart, CartItem, Product};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::filters;
use crate::models::ShopperSession;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub price: String,
    /// Pending quantity shown between the - and + buttons.
    pub quantity: u32,
    /// Disables the selector and the add button.
    pub in_cart: bool,
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart panel display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            quantity: item.quantity.get(),
            line_price: item.line_total().display(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: format!("${}", cart.compute_total()),
            item_count: cart.item_count(),
        }
    }
}

impl ProductCardView {
    fn new(product: &Product, shopper: &ShopperSession) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            price: product.price.display(),
            quantity: shopper.pending_quantity(product.id).get(),
            in_cart: shopper.is_locked(product.id),
        }
    }
}

/// Build the card list for every catalog product.
fn product_cards(catalog: &Catalog, shopper: &ShopperSession) -> Vec<ProductCardView> {
    catalog
        .products()
        .iter()
        .map(|product| ProductCardView::new(product, shopper))
        .collect()
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// One card per catalog product, in catalog order.
    pub products: Vec<ProductCardView>,
    /// Cart panel contents.
    pub cart: CartView,
}

/// Display the storefront page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let shopper = ShopperSession::load(&session).await?;

    Ok(HomeTemplate {
        products: product_cards(state.catalog(), &shopper),
        cart: CartView::from(&shopper.cart),
    })
}
