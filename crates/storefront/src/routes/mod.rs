//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Product grid and cart panel
//! GET  /health                             - Health check
//!
//! # Cart (form posts, redirect back to /)
//! POST /cart/add                           - Add product (product_id, quantity?)
//! POST /cart/remove                        - Remove product line (product_id)
//!
//! # Quantity selector (form posts, redirect back to /)
//! POST /products/{id}/quantity/increment   - Pending quantity + 1
//! POST /products/{id}/quantity/decrement   - Pending quantity - 1, floor 1
//!
//! # API
//! GET  /api/cart                           - Cart summary as JSON
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the product quantity selector routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/quantity/increment", post(products::increment))
        .route("/{id}/quantity/decrement", post(products::decrement))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
        .nest("/products", product_routes())
        .route("/api/cart", get(cart::summary))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
