//! Products and categories.
//!
//! The catalog is read-only from the point of view of pricing and carts: a
//! product only contributes its base price and the kind of its category.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ProductId};

/// Which customization axes a product supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Finished rings, priced by ring size.
    Ring,
    /// Loose stones that can optionally be mounted into jewelry.
    Gemstone,
    /// Everything else; no customization.
    #[default]
    Other,
}

impl CategoryKind {
    /// Whether a ring size applies regardless of how the product is purchased.
    #[must_use]
    pub const fn is_sized(self) -> bool {
        matches!(self, Self::Ring)
    }

    /// Whether the product can be mounted into a jewelry setting.
    #[must_use]
    pub const fn is_mountable(self) -> bool {
        matches!(self, Self::Gemstone)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub kind: CategoryKind,
}

/// A category together with the number of products it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

impl CategorySummary {
    /// Attach product counts to categories, preserving category order.
    #[must_use]
    pub fn summarize(categories: Vec<Category>, products: &[Product]) -> Vec<Self> {
        let mut counts: HashMap<CategoryId, usize> = HashMap::new();
        for product in products {
            *counts.entry(product.category_id).or_insert(0) += 1;
        }

        categories
            .into_iter()
            .map(|category| {
                let product_count = counts.get(&category.id).copied().unwrap_or(0);
                Self {
                    category,
                    product_count,
                }
            })
            .collect()
    }
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Base unit price in USD, before any customization.
    pub base_price: Decimal,
    pub category_id: CategoryId,
    pub image: String,
    /// Short alt-text style hint for the product image.
    pub hint: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// e.g. "Pure Diamond and Gold"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_heading: Option<String>,
}
