//! Checkout route handlers.
//!
//! Payment is by bank transfer: the shopper pays into the configured account
//! and submits the order with the URL of an uploaded receipt. The order total
//! is computed from the session cart, never taken from the request.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use lumera_core::{BankDetails, Cart, CheckoutError, CustomerDetails, NewOrder, Order, OrderId};

use super::views::DisplayPrice;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::extract::JsonBody;
use crate::models::cart_token;
use crate::store::ShopperCollections;
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    #[serde(default)]
    pub payment_receipt_url: Option<String>,
}

/// A placed order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub total: DisplayPrice,
}

/// Bank-transfer details, or `null` when none are configured.
#[instrument(skip(state))]
pub async fn bank_details(State(state): State<AppState>) -> Json<Option<BankDetails>> {
    Json(state.bank_details().cloned())
}

/// Place an order from the session cart and empty the cart.
#[instrument(skip(state, session, request))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    JsonBody(request): JsonBody<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    let token = cart_token(&session)
        .await?
        .ok_or(AppError::Checkout(CheckoutError::EmptyCart))?;

    let CheckoutRequest {
        customer,
        payment_receipt_url,
    } = request;

    // Build the order and empty the cart under one registry lock.
    let (new_order, previous_cart) = state
        .collections()
        .try_update(token, |collections| {
            let order = NewOrder::from_checkout(customer, &collections.cart, payment_receipt_url)?;
            let next = ShopperCollections {
                cart: Cart::new(),
                wishlist: collections.wishlist,
            };
            Ok::<_, CheckoutError>((next, (order, collections.cart)))
        })
        .await?;

    let order = new_order.into_order(OrderId::generate(), Utc::now());

    if let Err(e) = state.orders().save(order.clone()).await {
        // Put the lines back unless the shopper already started a new cart.
        state
            .collections()
            .update_cart(token, |cart| if cart.is_empty() { previous_cart } else { cart })
            .await;
        return Err(e.into());
    }

    add_breadcrumb(
        "checkout",
        "Order placed",
        &[("order_id", order.id.to_string())],
    );
    tracing::info!(
        order_id = %order.id,
        total = %order.total_amount,
        lines = order.items.len(),
        "Order placed"
    );

    let total = DisplayPrice::new(order.total_amount, state.exchange_rate());
    Ok((StatusCode::CREATED, Json(OrderView { order, total })))
}
