//! HTTP route handlers for storefront.
//!
//! All endpoints speak JSON with camelCase field names.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (catalog reachable)
//!
//! # Catalog
//! GET    /api/categories                  - Categories with product counts
//! GET    /api/categories/{slug}           - Category and its products
//! GET    /api/products[?categoryId=]      - Product listing
//! GET    /api/products/{id}               - Product detail with customization options
//! POST   /api/products/{id}/price         - Price quote for a selection
//!
//! # Cart (session)
//! GET    /api/cart                        - Cart with subtotal
//! POST   /api/cart/items                  - Add a customized product
//! PATCH  /api/cart/items/{key}            - Set quantity (below 1 removes)
//! DELETE /api/cart/items/{key}            - Remove line
//! GET    /api/cart/count                  - Total quantity
//!
//! # Wishlist (session)
//! GET    /api/wishlist                    - Saved products
//! POST   /api/wishlist/items              - Save a product
//! DELETE /api/wishlist/items/{productId}  - Remove a product
//! DELETE /api/wishlist                    - Clear
//!
//! # Checkout
//! GET    /api/bank-details                - Bank-transfer details or null
//! POST   /api/checkout                    - Place an order from the cart
//!
//! # Inquiries
//! POST   /api/inquiries                   - Record a customer inquiry
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod inquiries;
pub mod views;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::categories))
        .route("/categories/{slug}", get(catalog::category))
        .route("/products", get(catalog::products))
        .route("/products/{id}", get(catalog::product))
        .route("/products/{id}/price", post(catalog::quote))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{key}", delete(cart::remove).patch(cart::update))
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/items", post(wishlist::add))
        .route("/items/{product_id}", delete(wishlist::remove))
}

/// Create all API routes for the storefront.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .route("/bank-details", get(checkout::bank_details))
        .route("/checkout", post(checkout::place_order))
        .route("/inquiries", post(inquiries::create))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}
