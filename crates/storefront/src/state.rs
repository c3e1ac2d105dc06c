//! Application state shared across handlers.

use std::sync::Arc;

use lumera_core::{BankDetails, ExchangeRate, PricingEngine};

use crate::config::StorefrontConfig;
use crate::store::{
    Catalog, CatalogStore, CollectionRegistry, InMemoryCatalogStore, InMemoryInquiryStore,
    InMemoryOrderStore, InquiryStore, OrderStore, RepositoryError,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stores, the shopper collections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    inquiries: Arc<dyn InquiryStore>,
    collections: CollectionRegistry,
    pricing: PricingEngine,
}

impl AppState {
    /// Create application state from explicit stores.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        inquiries: Arc<dyn InquiryStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders,
                inquiries,
                collections: CollectionRegistry::new(),
                pricing: PricingEngine::new(),
            }),
        }
    }

    /// Create application state backed by in-memory stores.
    ///
    /// The catalog is read from `config.catalog_path` when set, otherwise the
    /// built-in catalog is used.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog file cannot be loaded.
    pub async fn in_memory(config: StorefrontConfig) -> Result<Self, RepositoryError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::load(path).await?;
                tracing::info!(
                    path = %path.display(),
                    categories = catalog.categories.len(),
                    products = catalog.products.len(),
                    "Catalog loaded"
                );
                catalog
            }
            None => Catalog::builtin(),
        };

        Ok(Self::new(
            config,
            Arc::new(InMemoryCatalogStore::new(catalog)),
            Arc::new(InMemoryOrderStore::default()),
            Arc::new(InMemoryInquiryStore::default()),
        ))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    #[must_use]
    pub fn inquiries(&self) -> &dyn InquiryStore {
        self.inner.inquiries.as_ref()
    }

    /// Carts and wishlists keyed by cart token.
    #[must_use]
    pub fn collections(&self) -> &CollectionRegistry {
        &self.inner.collections
    }

    #[must_use]
    pub fn pricing(&self) -> &PricingEngine {
        &self.inner.pricing
    }

    /// Conversion applied to customer-facing prices.
    #[must_use]
    pub fn exchange_rate(&self) -> &ExchangeRate {
        &self.inner.config.exchange_rate
    }

    #[must_use]
    pub fn bank_details(&self) -> Option<&BankDetails> {
        self.inner.config.bank_details.as_ref()
    }
}
