//! Cart route handlers.
//!
//! The session holds a cart token; the cart itself lives in the collection
//! registry. Reads never issue a token, so browsing without adding anything
//! leaves no state behind.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use lumera_core::{
    Cart, CustomizationSelection, ExchangeRate, LineItem, LineKey, ProductId, ProductSnapshot,
};

use super::catalog::find_product;
use super::views::DisplayPrice;
use crate::error::{Result, add_breadcrumb};
use crate::extract::JsonBody;
use crate::models::{cart_token, ensure_cart_token};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
    #[serde(flatten)]
    pub item: LineItem,
    pub price: DisplayPrice,
    pub line_total: DisplayPrice,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItemView>,
    pub subtotal: DisplayPrice,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, rate: &ExchangeRate) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| LineItemView {
                    price: DisplayPrice::new(item.unit_price, rate),
                    line_total: DisplayPrice::new(item.line_total(), rate),
                    item: item.clone(),
                })
                .collect(),
            subtotal: DisplayPrice::new(cart.subtotal(), rate),
            item_count: cart.item_count(),
        }
    }

    /// An empty cart.
    #[must_use]
    pub fn empty(rate: &ExchangeRate) -> Self {
        Self::new(&Cart::new(), rate)
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub selection: CustomizationSelection,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let rate = state.exchange_rate();
    let view = match cart_token(&session).await? {
        Some(token) => CartView::new(&state.collections().get(token).await.cart, rate),
        None => CartView::empty(rate),
    };
    Ok(Json(view))
}

/// Add a customized product to the cart.
///
/// Adding the same product with the same effective options again increments
/// the existing line instead of creating a new one.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    JsonBody(request): JsonBody<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let (product, category) = find_product(&state, request.product_id).await?;
    let kind = category.kind;

    request.selection.validate(kind)?;
    let selection = request.selection.normalized_for(kind);
    let unit_price: Decimal = state.pricing().price_product(&product, &category, &selection);
    let customization = selection.label(kind);
    let snapshot = ProductSnapshot::from(&product);

    let token = ensure_cart_token(&session).await?;
    let cart = state
        .collections()
        .update_cart(token, |cart| {
            cart.add_line_item(product.id, kind, &selection, unit_price, customization, snapshot)
        })
        .await;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[
            ("product_id", product.id.to_string()),
            ("unit_price", unit_price.to_string()),
        ],
    );
    tracing::info!(
        product_id = %product.id,
        %unit_price,
        item_count = cart.item_count(),
        "Added to cart"
    );

    Ok((
        StatusCode::CREATED,
        Json(CartView::new(&cart, state.exchange_rate())),
    ))
}

/// Set the quantity of a cart line. Quantities below 1 remove the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
    JsonBody(request): JsonBody<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let rate = state.exchange_rate();
    let Some(token) = cart_token(&session).await? else {
        return Ok(Json(CartView::empty(rate)));
    };

    let key = LineKey::from_raw(key);
    let cart = state
        .collections()
        .update_cart(token, |cart| cart.update_quantity(&key, request.quantity))
        .await;

    Ok(Json(CartView::new(&cart, rate)))
}

/// Remove a cart line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
) -> Result<Json<CartView>> {
    let rate = state.exchange_rate();
    let Some(token) = cart_token(&session).await? else {
        return Ok(Json(CartView::empty(rate)));
    };

    let key = LineKey::from_raw(key);
    let cart = state
        .collections()
        .update_cart(token, |cart| cart.remove_line_item(&key))
        .await;

    Ok(Json(CartView::new(&cart, rate)))
}

/// Total quantity across all cart lines.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let count = match cart_token(&session).await? {
        Some(token) => state.collections().get(token).await.cart.item_count(),
        None => 0,
    };
    Ok(Json(CartCount { count }))
}
