//! Storage for catalog data, orders and inquiries.
//!
//! Handlers only see the traits in this module. The in-memory implementations
//! in [`memory`] back the service today; a hosted backend would implement the
//! same traits.
//!
//! Carts and wishlists are not stored here: they belong to a shopper's session
//! and live in the [`CollectionRegistry`].

use async_trait::async_trait;
use thiserror::Error;

use lumera_core::{
    Category, CategoryId, Inquiry, InquiryId, Order, OrderId, Product, ProductId,
};

pub mod collections;
pub mod memory;
pub mod seed;

pub use collections::{CollectionRegistry, ShopperCollections};
pub use memory::{InMemoryCatalogStore, InMemoryInquiryStore, InMemoryOrderStore};
pub use seed::Catalog;

/// Errors raised by a store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The catalog file could not be read.
    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid JSON for a catalog.
    #[error("catalog decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The catalog is internally inconsistent.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A record with this id already exists.
    #[error("duplicate record: {0}")]
    Duplicate(String),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All categories in display order.
    async fn categories(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn category_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;
    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError>;
    /// Products in display order, optionally restricted to one category.
    async fn products(&self, category: Option<CategoryId>)
    -> Result<Vec<Product>, RepositoryError>;
    async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;
    async fn save(&self, order: Order) -> Result<(), RepositoryError>;
    /// All orders, newest first.
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;
}

#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn find_by_id(&self, id: InquiryId) -> Result<Option<Inquiry>, RepositoryError>;
    async fn save(&self, inquiry: Inquiry) -> Result<(), RepositoryError>;
    /// All inquiries, newest first.
    async fn list(&self) -> Result<Vec<Inquiry>, RepositoryError>;
}
