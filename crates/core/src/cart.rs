//! Line-item identity and cart aggregation.
//!
//! Every distinct (product, customization) combination maps to one
//! [`LineKey`]. Adding the same configuration again increments the quantity of
//! the existing line; a different configuration of the same product becomes a
//! separate line.
//!
//! All operations consume the cart and return the updated cart, so callers
//! always work on their own snapshot.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryKind, Product};
use crate::customization::{CustomizationSelection, JewelryType, MetalType};
use crate::types::ProductId;

/// Placeholder used in line keys for options that are not set.
const UNSET: &str = "none";

/// Composite identifier of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(String);

impl LineKey {
    /// Wrap a key received from a client.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the line key of a product configuration.
///
/// The key is `product:size:purchase:jewelry:metal`, with `none` for unset
/// options. The selection is normalized for `kind` first, so options that do
/// not apply to the product never reach the key and the same effective
/// configuration always yields the same key.
#[must_use]
pub fn derive_key(
    product_id: ProductId,
    kind: CategoryKind,
    selection: &CustomizationSelection,
) -> LineKey {
    let effective = selection.normalized_for(kind);

    let size = effective
        .ring_size
        .map_or_else(|| UNSET.to_string(), |s| s.to_string());

    LineKey(format!(
        "{product_id}:{size}:{}:{}:{}",
        effective.purchase_type.code(),
        effective.jewelry_type.map_or(UNSET, JewelryType::code),
        effective.metal_type.map_or(UNSET, MetalType::code),
    ))
}

/// Product fields copied onto a line when it is added.
///
/// Lines keep this copy rather than re-reading the catalog, so a cart keeps
/// showing what the shopper picked even if the product is later edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub name: String,
    pub image: String,
    pub hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_heading: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            image: product.image.clone(),
            hint: product.hint.clone(),
            sub_heading: product.sub_heading.clone(),
        }
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub key: LineKey,
    pub product_id: ProductId,
    /// Always at least 1.
    pub quantity: u32,
    /// Unit price in USD at the time the line was first added.
    pub unit_price: Decimal,
    pub customization: String,
    pub product: ProductSnapshot,
}

impl LineItem {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A shopper's cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of all line totals, in USD.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of a configuration of a `kind` product.
    ///
    /// If a line with the same key exists its quantity is incremented and its
    /// price and snapshot are left untouched. Otherwise a new line with
    /// quantity 1 is appended.
    #[must_use]
    pub fn add_line_item(
        mut self,
        product_id: ProductId,
        kind: CategoryKind,
        selection: &CustomizationSelection,
        unit_price: Decimal,
        customization: String,
        snapshot: ProductSnapshot,
    ) -> Self {
        let key = derive_key(product_id, kind, selection);

        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            existing.quantity = existing.quantity.saturating_add(1);
            return self;
        }

        self.items.push(LineItem {
            key,
            product_id,
            quantity: 1,
            unit_price,
            customization,
            product: snapshot,
        });
        self
    }

    /// Set the quantity of a line.
    ///
    /// A quantity below 1 removes the line. Unknown keys leave the cart unchanged.
    #[must_use]
    pub fn update_quantity(mut self, key: &LineKey, quantity: i64) -> Self {
        if quantity < 1 {
            return self.remove_line_item(key);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(item) = self.items.iter_mut().find(|item| &item.key == key) {
            item.quantity = quantity;
        }
        self
    }

    /// Remove a line. Unknown keys leave the cart unchanged.
    #[must_use]
    pub fn remove_line_item(mut self, key: &LineKey) -> Self {
        self.items.retain(|item| &item.key != key);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::customization::{PurchaseType, RingSize};

    fn size(n: u8) -> RingSize {
        RingSize::new(n).unwrap()
    }

    fn snapshot(name: &str) -> ProductSnapshot {
        ProductSnapshot {
            name: name.to_string(),
            image: format!("https://img.example/{name}.jpg"),
            hint: String::new(),
            sub_heading: None,
        }
    }

    fn mounted_ring_silver() -> CustomizationSelection {
        CustomizationSelection::mounted(JewelryType::Ring, MetalType::Silver).with_ring_size(size(5))
    }

    fn key(product: i32, selection: &CustomizationSelection) -> LineKey {
        derive_key(ProductId::new(product), CategoryKind::Gemstone, selection)
    }

    fn add(cart: Cart, product: i32, selection: &CustomizationSelection, price: i64) -> Cart {
        cart.add_line_item(
            ProductId::new(product),
            CategoryKind::Gemstone,
            selection,
            Decimal::from(price),
            String::new(),
            snapshot("Emerald"),
        )
    }

    #[test]
    fn test_key_format() {
        assert_eq!(key(9, &mounted_ring_silver()).as_str(), "9:5:mounted:ring:silver");
        assert_eq!(
            key(12, &CustomizationSelection::loose()).as_str(),
            "12:none:loose:none:none"
        );

        let ring = CustomizationSelection::loose().with_ring_size(size(15));
        let ring_key = derive_key(ProductId::new(1), CategoryKind::Ring, &ring);
        assert_eq!(ring_key.as_str(), "1:15:loose:none:none");
    }

    #[test]
    fn test_key_ignores_mounting_fields_of_loose_selection() {
        let stale = CustomizationSelection {
            purchase_type: PurchaseType::Loose,
            jewelry_type: Some(JewelryType::Pendant),
            metal_type: Some(MetalType::Silver),
            ring_size: None,
        };
        assert_eq!(key(1, &stale), key(1, &CustomizationSelection::loose()));
    }

    #[test]
    fn test_key_ignores_ring_size_of_loose_stone() {
        let stale = CustomizationSelection::loose().with_ring_size(size(12));
        assert_eq!(key(9, &stale), key(9, &CustomizationSelection::loose()));
    }

    #[test]
    fn test_key_ignores_mounting_on_unmountable_product() {
        let mounted = mounted_ring_silver();
        assert_eq!(
            derive_key(ProductId::new(2), CategoryKind::Other, &mounted),
            derive_key(ProductId::new(2), CategoryKind::Other, &CustomizationSelection::loose())
        );
    }

    #[test]
    fn test_stale_loose_selection_merges_into_clean_line() {
        let stale = CustomizationSelection {
            purchase_type: PurchaseType::Loose,
            jewelry_type: Some(JewelryType::EngagementRing),
            metal_type: Some(MetalType::Gold22kWhite),
            ring_size: Some(size(12)),
        };
        let cart = add(Cart::new(), 9, &CustomizationSelection::loose(), 2200);
        let cart = add(cart, 9, &stale, 2200);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].key.as_str(), "9:none:loose:none:none");
    }

    #[test]
    fn test_key_is_stable_across_json_shapes() {
        let a: CustomizationSelection = serde_json::from_str(
            r#"{"purchaseType":"mounted","jewelryType":"Ring","metalType":"Silver","ringSize":5}"#,
        )
        .unwrap();
        let b: CustomizationSelection = serde_json::from_str(
            r#"{"ringSize":5,"metalType":"Silver","jewelryType":"Ring","purchaseType":"mounted"}"#,
        )
        .unwrap();
        let c: CustomizationSelection =
            serde_json::from_str(r#"{"purchaseType":"loose","jewelryType":null}"#).unwrap();
        let d: CustomizationSelection = serde_json::from_str(r#"{"purchaseType":"loose"}"#).unwrap();

        assert_eq!(key(9, &a), key(9, &b));
        assert_eq!(key(9, &c), key(9, &d));
    }

    #[test]
    fn test_keys_are_distinct_across_configurations() {
        let mut keys = HashSet::new();
        let mut total = 0;
        for jewelry in JewelryType::ALL {
            for metal in MetalType::ALL {
                let selection = CustomizationSelection::mounted(jewelry, metal);
                if jewelry.is_ring() {
                    for n in [5, 6, 15, 30] {
                        keys.insert(key(9, &selection.with_ring_size(size(n))));
                        total += 1;
                    }
                } else {
                    keys.insert(key(9, &selection));
                    total += 1;
                }
            }
        }
        keys.insert(key(9, &CustomizationSelection::loose()));
        keys.insert(key(91, &CustomizationSelection::loose()));
        total += 2;

        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_adding_same_configuration_twice_increments_quantity() {
        let selection = mounted_ring_silver();
        let cart = add(Cart::new(), 9, &selection, 2500);
        let cart = add(cart, 9, &selection, 2500);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[0].unit_price, Decimal::from(2500));
        assert_eq!(cart.subtotal(), Decimal::from(5000));
    }

    #[test]
    fn test_first_added_price_and_snapshot_win() {
        let selection = CustomizationSelection::loose();
        let cart = add(Cart::new(), 3, &selection, 1250);
        let cart = cart.add_line_item(
            ProductId::new(3),
            CategoryKind::Gemstone,
            &selection,
            Decimal::from(9999),
            "changed".to_string(),
            snapshot("Renamed"),
        );

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Decimal::from(1250));
        assert_eq!(line.product.name, "Emerald");
    }

    #[test]
    fn test_different_metal_creates_separate_line() {
        let silver = mounted_ring_silver();
        let gold = CustomizationSelection::mounted(JewelryType::Ring, MetalType::Gold14kYellow)
            .with_ring_size(size(5));

        let cart = add(Cart::new(), 9, &silver, 2500);
        let cart = add(cart, 9, &gold, 2700);

        assert_eq!(cart.items().len(), 2);
        assert_ne!(cart.items()[0].key, cart.items()[1].key);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity() {
        let cart = add(Cart::new(), 1, &CustomizationSelection::loose(), 100);
        let key = cart.items()[0].key.clone();

        let cart = cart.update_quantity(&key, 4);
        assert_eq!(cart.get(&key).unwrap().quantity, 4);
        assert_eq!(cart.subtotal(), Decimal::from(400));
    }

    #[test]
    fn test_update_quantity_below_one_removes_line() {
        let cart = add(Cart::new(), 1, &CustomizationSelection::loose(), 100);
        let key = cart.items()[0].key.clone();

        assert!(cart.clone().update_quantity(&key, 0).is_empty());
        assert!(cart.update_quantity(&key, -5).is_empty());
    }

    #[test]
    fn test_unknown_key_is_a_no_op() {
        let cart = add(Cart::new(), 1, &CustomizationSelection::loose(), 100);
        let unknown = LineKey::from_raw("404:none:loose:none:none");

        assert_eq!(cart.clone().update_quantity(&unknown, 3), cart);
        assert_eq!(cart.clone().update_quantity(&unknown, 0), cart);
        assert_eq!(cart.clone().remove_line_item(&unknown), cart);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let cart = add(Cart::new(), 1, &CustomizationSelection::loose(), 100);
        let cart = add(cart, 2, &CustomizationSelection::loose(), 200);
        let first = cart.items()[0].key.clone();

        let cart = cart.remove_line_item(&first);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, ProductId::new(2));
    }
}
