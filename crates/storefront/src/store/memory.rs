use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use lumera_core::{
    Category, CategoryId, Inquiry, InquiryId, Order, OrderId, Product, ProductId,
};

use super::{Catalog, CatalogStore, InquiryStore, OrderStore, RepositoryError};

/// Catalog held in memory, in the order it was loaded.
pub struct InMemoryCatalogStore {
    catalog: Catalog,
}

impl InMemoryCatalogStore {
    /// Wrap an already validated catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.catalog.categories.clone())
    }

    async fn category_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        Ok(self.catalog.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self.catalog.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn products(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .catalog
            .products
            .iter()
            .filter(|p| category.is_none_or(|id| p.category_id == id))
            .cloned()
            .collect())
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.catalog.products.iter().find(|p| p.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn save(&self, order: Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(RepositoryError::Duplicate(format!("order {}", order.id)));
        }
        orders.insert(order.id, order);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[derive(Default)]
pub struct InMemoryInquiryStore {
    inquiries: RwLock<HashMap<InquiryId, Inquiry>>,
}

#[async_trait]
impl InquiryStore for InMemoryInquiryStore {
    async fn find_by_id(&self, id: InquiryId) -> Result<Option<Inquiry>, RepositoryError> {
        let inquiries = self.inquiries.read().await;
        Ok(inquiries.get(&id).cloned())
    }

    async fn save(&self, inquiry: Inquiry) -> Result<(), RepositoryError> {
        let mut inquiries = self.inquiries.write().await;
        if inquiries.contains_key(&inquiry.id) {
            return Err(RepositoryError::Duplicate(format!("inquiry {}", inquiry.id)));
        }
        inquiries.insert(inquiry.id, inquiry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Inquiry>, RepositoryError> {
        let inquiries = self.inquiries.read().await;
        let mut all: Vec<Inquiry> = inquiries.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use lumera_core::{
        Cart, CategoryKind, CustomerDetails, CustomizationSelection, NewInquiry, NewOrder,
        ProductSnapshot,
    };

    use super::*;

    fn order(minutes_ago: i64) -> Order {
        let cart = Cart::new().add_line_item(
            ProductId::new(9),
            CategoryKind::Gemstone,
            &CustomizationSelection::loose(),
            Decimal::from(2200),
            "Loose Stone".to_string(),
            ProductSnapshot {
                name: "Emerald (Panna)".to_string(),
                image: String::new(),
                hint: String::new(),
                sub_heading: None,
            },
        );
        let details = CustomerDetails {
            name: "Asha".to_string(),
            email: "asha@example.in".to_string(),
            mobile: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            ..CustomerDetails::default()
        };
        NewOrder::from_checkout(details, &cart, None)
            .unwrap()
            .into_order(OrderId::generate(), Utc::now() - Duration::minutes(minutes_ago))
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let store = InMemoryCatalogStore::default();

        assert_eq!(store.categories().await.unwrap().len(), 8);
        let rings = store.category_by_slug("rings").await.unwrap().unwrap();
        assert_eq!(rings.id, CategoryId::new(4));
        assert!(store.category_by_slug("watches").await.unwrap().is_none());

        let ring_products = store.products(Some(rings.id)).await.unwrap();
        let names: Vec<&str> = ring_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Solitaire Diamond Ring", "Ruby Eternity Band"]);

        assert_eq!(store.products(None).await.unwrap().len(), 12);
        assert!(store.product(ProductId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orders_save_and_list_newest_first() {
        let store = InMemoryOrderStore::default();
        let older = order(10);
        let newer = order(1);

        store.save(older.clone()).await.unwrap();
        store.save(newer.clone()).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.first().unwrap().id, newer.id);
        assert_eq!(store.find_by_id(older.id).await.unwrap(), Some(older.clone()));

        assert!(matches!(
            store.save(older).await,
            Err(RepositoryError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_inquiries_round_trip() {
        let store = InMemoryInquiryStore::default();
        let inquiry = NewInquiry {
            name: "Ravi".to_string(),
            mobile: "9876543210".to_string(),
            message: "Do you ship to Pune?".to_string(),
            ..NewInquiry::default()
        }
        .into_inquiry(InquiryId::generate(), Utc::now())
        .unwrap();

        store.save(inquiry.clone()).await.unwrap();
        assert_eq!(store.find_by_id(inquiry.id).await.unwrap(), Some(inquiry));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
