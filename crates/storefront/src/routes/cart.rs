//! Cart route handlers.
//!
//! Cart actions are plain form posts: apply one transition to the shopper's
//! session state, then redirect back to the page (POST/redirect/GET).

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use gridshop_core::{CartItem, Product, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::ShopperSession;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    /// Falls back to the card's pending quantity when absent.
    pub quantity: Option<i64>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// One cart line in the JSON summary.
#[derive(Debug, Serialize)]
pub struct CartLineSummary {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// JSON cart summary.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLineSummary>,
    pub item_count: u64,
    pub total: String,
}

impl From<&CartItem> for CartLineSummary {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            price: item.price.amount_string(),
            quantity: item.quantity.get(),
            line_total: item.line_total().amount_string(),
        }
    }
}

/// Resolve a product id against the catalog.
pub(crate) fn find_product(catalog: &Catalog, id: ProductId) -> Result<&Product> {
    catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Add a product to the cart.
///
/// Merges into the existing line when the product is already in the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = find_product(state.catalog(), form.product_id)?;
    let quantity = form.quantity.map(Quantity::try_from).transpose()?;

    let mut shopper = ShopperSession::load(&session).await?;
    let added = shopper.add(product, quantity)?;
    shopper.save(&session).await?;

    let product_id = product.id.to_string();
    let quantity = added.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str()), ("quantity", quantity.as_str())]),
    );
    tracing::info!(
        product_id = %product.id,
        quantity = %added,
        total = %shopper.cart.compute_total(),
        "Added to cart"
    );

    Ok(Redirect::to("/"))
}

/// Remove a product's line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let product = find_product(state.catalog(), form.product_id)?;

    let mut shopper = ShopperSession::load(&session).await?;
    shopper.remove(product);
    shopper.save(&session).await?;

    let product_id = product.id.to_string();
    add_breadcrumb(
        "cart",
        "Removed from cart",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::info!(
        product_id = %product.id,
        total = %shopper.cart.compute_total(),
        "Removed from cart"
    );

    Ok(Redirect::to("/"))
}

/// Cart summary as JSON.
#[instrument(skip(session))]
pub async fn summary(session: Session) -> Result<impl IntoResponse> {
    let shopper = ShopperSession::load(&session).await?;
    let cart = &shopper.cart;

    Ok(Json(CartSummary {
        items: cart.items().iter().map(CartLineSummary::from).collect(),
        item_count: cart.item_count(),
        total: cart.compute_total(),
    }))
}
