//! Per-shopper carts and wishlists.
//!
//! A session only holds an opaque [`CartToken`]; the collections themselves
//! live here. Every update replaces the shopper's collections as a whole while
//! holding the registry write lock, so two concurrent requests from the same
//! shopper cannot interleave a read-modify-write and lose an item.
//!
//! Entries idle out after the session expiry, so abandoned carts do not
//! outlive the cookie that pointed at them.

use std::fmt;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use lumera_core::{Cart, CartToken, Wishlist};

use crate::middleware::session::SESSION_EXPIRY_SECONDS;

/// How long an untouched shopper entry is kept.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs());

/// Everything one shopper has collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopperCollections {
    pub cart: Cart,
    pub wishlist: Wishlist,
}

impl ShopperCollections {
    fn is_empty(&self) -> bool {
        self.cart.is_empty() && self.wishlist.is_empty()
    }
}

pub struct CollectionRegistry {
    shoppers: Cache<CartToken, ShopperCollections>,
    writes: Mutex<()>,
}

impl CollectionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_idle_timeout(IDLE_TIMEOUT)
    }

    /// A registry whose entries expire after `idle` without reads or writes.
    #[must_use]
    pub fn with_idle_timeout(idle: Duration) -> Self {
        Self {
            shoppers: Cache::builder().time_to_idle(idle).build(),
            writes: Mutex::new(()),
        }
    }

    /// Current collections for `token`; empty if the shopper has none.
    pub async fn get(&self, token: CartToken) -> ShopperCollections {
        self.shoppers.get(&token).await.unwrap_or_default()
    }

    /// Replace the shopper's collections with the result of `f`.
    ///
    /// Returns the value produced alongside the new collections. Shoppers whose
    /// collections become empty are dropped from the registry.
    pub async fn update<T>(
        &self,
        token: CartToken,
        f: impl FnOnce(ShopperCollections) -> (ShopperCollections, T),
    ) -> T {
        let result: Result<T, std::convert::Infallible> =
            self.try_update(token, |current| Ok(f(current))).await;
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`update`](Self::update), but leaves the collections untouched when
    /// `f` fails.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub async fn try_update<T, E>(
        &self,
        token: CartToken,
        f: impl FnOnce(ShopperCollections) -> Result<(ShopperCollections, T), E>,
    ) -> Result<T, E> {
        let _guard = self.writes.lock().await;
        let current = self.get(token).await;

        let (next, value) = f(current)?;
        if next.is_empty() {
            self.shoppers.invalidate(&token).await;
        } else {
            self.shoppers.insert(token, next).await;
        }
        Ok(value)
    }

    /// Apply `f` to the shopper's cart and return the new cart.
    pub async fn update_cart(&self, token: CartToken, f: impl FnOnce(Cart) -> Cart) -> Cart {
        self.update(token, |collections| {
            let cart = f(collections.cart);
            (
                ShopperCollections {
                    cart: cart.clone(),
                    wishlist: collections.wishlist,
                },
                cart,
            )
        })
        .await
    }

    /// Apply `f` to the shopper's wishlist and return the new wishlist.
    pub async fn update_wishlist(
        &self,
        token: CartToken,
        f: impl FnOnce(Wishlist) -> Wishlist,
    ) -> Wishlist {
        self.update(token, |collections| {
            let wishlist = f(collections.wishlist);
            (
                ShopperCollections {
                    cart: collections.cart,
                    wishlist: wishlist.clone(),
                },
                wishlist,
            )
        })
        .await
    }

    /// Number of shoppers with a live, non-empty cart or wishlist.
    pub async fn len(&self) -> usize {
        self.shoppers.run_pending_tasks().await;
        usize::try_from(self.shoppers.entry_count()).unwrap_or(usize::MAX)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollectionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRegistry")
            .field("shoppers", &self.shoppers.entry_count())
            .finish_non_exhaustive()
    }
}
