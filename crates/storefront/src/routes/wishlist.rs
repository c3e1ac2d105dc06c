//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use lumera_core::{ExchangeRate, ProductId, Wishlist, WishlistItem};

use super::catalog::find_product;
use super::views::DisplayPrice;
use crate::error::Result;
use crate::extract::JsonBody;
use crate::models::{cart_token, ensure_cart_token};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemView {
    #[serde(flatten)]
    pub item: WishlistItem,
    pub price: DisplayPrice,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<WishlistItemView>,
    pub count: usize,
}

impl WishlistView {
    #[must_use]
    pub fn new(wishlist: &Wishlist, rate: &ExchangeRate) -> Self {
        Self {
            items: wishlist
                .items()
                .iter()
                .map(|item| WishlistItemView {
                    price: DisplayPrice::new(item.base_price, rate),
                    item: item.clone(),
                })
                .collect(),
            count: wishlist.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: ProductId,
}

/// Display the wishlist.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<WishlistView>> {
    let wishlist = match cart_token(&session).await? {
        Some(token) => state.collections().get(token).await.wishlist,
        None => Wishlist::new(),
    };
    Ok(Json(WishlistView::new(&wishlist, state.exchange_rate())))
}

/// Save a product. Saving a product twice keeps a single entry.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    JsonBody(request): JsonBody<AddToWishlistRequest>,
) -> Result<Json<WishlistView>> {
    let (product, _) = find_product(&state, request.product_id).await?;
    let item = WishlistItem::from(&product);

    let token = ensure_cart_token(&session).await?;
    let wishlist = state
        .collections()
        .update_wishlist(token, |wishlist| wishlist.add(item))
        .await;

    tracing::info!(product_id = %product.id, count = wishlist.len(), "Saved to wishlist");
    Ok(Json(WishlistView::new(&wishlist, state.exchange_rate())))
}

/// Remove a product from the wishlist.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<WishlistView>> {
    let wishlist = match cart_token(&session).await? {
        Some(token) => {
            state
                .collections()
                .update_wishlist(token, |wishlist| wishlist.remove(product_id))
                .await
        }
        None => Wishlist::new(),
    };
    Ok(Json(WishlistView::new(&wishlist, state.exchange_rate())))
}

/// Remove every saved product.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<WishlistView>> {
    if let Some(token) = cart_token(&session).await? {
        state
            .collections()
            .update_wishlist(token, Wishlist::clear)
            .await;
    }
    Ok(Json(WishlistView::new(&Wishlist::new(), state.exchange_rate())))
}
