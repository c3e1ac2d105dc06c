//! Product-keyed wishlist.
//!
//! Unlike the cart, a wishlist has no customization or quantity: it holds at
//! most one entry per product, and adding a product that is already present
//! leaves the wishlist unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::ProductSnapshot;
use crate::catalog::Product;
use crate::types::ProductId;

/// One saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    /// Base price in USD when the product was saved.
    pub base_price: Decimal,
    pub product: ProductSnapshot,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            base_price: product.base_price,
            product: ProductSnapshot::from(product),
        }
    }
}

/// A shopper's wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product_id == product_id)
    }

    /// Save a product. No-op if it is already saved.
    #[must_use]
    pub fn add(mut self, item: WishlistItem) -> Self {
        if !self.contains(item.product_id) {
            self.items.push(item);
        }
        self
    }

    /// Remove a product. No-op if it is not saved.
    #[must_use]
    pub fn remove(mut self, product_id: ProductId) -> Self {
        self.items.retain(|item| item.product_id != product_id);
        self
    }

    #[must_use]
    pub fn clear(self) -> Self {
        Self::new()
    }
}
