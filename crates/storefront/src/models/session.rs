//! Session-related types.
//!
//! The session carries nothing but a pointer to the shopper's collections.

use tower_sessions::Session;

use lumera_core::CartToken;

/// Session keys for shopper data.
pub mod keys {
    /// Key for the token of the shopper's cart and wishlist.
    pub const CART_TOKEN: &str = "cart_token";
}

/// Get the shopper's cart token, if one was issued.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn cart_token(session: &Session) -> Result<Option<CartToken>, tower_sessions::session::Error> {
    session.get::<CartToken>(keys::CART_TOKEN).await
}

/// Get the shopper's cart token, issuing a new one on first use.
///
/// # Errors
///
/// Returns an error if the session store cannot be read or written.
pub async fn ensure_cart_token(session: &Session) -> Result<CartToken, tower_sessions::session::Error> {
    if let Some(token) = cart_token(session).await? {
        return Ok(token);
    }

    let token = CartToken::generate();
    session.insert(keys::CART_TOKEN, token).await?;
    tracing::debug!(cart_token = %token, "Issued cart token");
    Ok(token)
}
