//! Product card quantity selector handlers.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use gridshop_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::ShopperSession;
use crate::routes::cart::find_product;
use crate::state::AppState;

/// Raise a card's pending quantity by one.
#[instrument(skip(state, session))]
pub async fn increment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    let product = find_product(state.catalog(), id)?;

    let mut shopper = ShopperSession::load(&session).await?;
    shopper.increment(product.id);
    shopper.save(&session).await?;

    tracing::debug!(
        product_id = %product.id,
        quantity = %shopper.pending_quantity(product.id),
        "Selector incremented"
    );
    Ok(Redirect::to("/"))
}

/// Lower a card's pending quantity by one, stopping at 1.
#[instrument(skip(state, session))]
pub async fn decrement(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    let product = find_product(state.catalog(), id)?;

    let mut shopper = ShopperSession::load(&session).await?;
    shopper.decrement(product.id);
    shopper.save(&session).await?;

    tracing::debug!(
        product_id = %product.id,
        quantity = %shopper.pending_quantity(product.id),
        "Selector decremented"
    );
    Ok(Redirect::to("/"))
}
