//! The built-in catalog and catalog files.
//!
//! A catalog file is the JSON form of [`Catalog`]; `lumera catalog export`
//! writes the built-in catalog in that form so it can be edited and loaded
//! back through `LUMERA_CATALOG_PATH`.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lumera_core::{Category, CategoryId, CategoryKind, Product, ProductId};

use super::RepositoryError;

/// Categories and products loaded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Catalog {
    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the file cannot be read or decoded, or if
    /// the catalog fails [`Catalog::validate`].
    pub async fn load(path: &Path) -> Result<Self, RepositoryError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::from_json(&raw)
    }

    /// Decode and validate a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the JSON is malformed or the catalog is
    /// inconsistent.
    pub fn from_json(raw: &str) -> Result<Self, RepositoryError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check ids and slugs are unique, every product belongs to a known
    /// category and no base price is negative.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCatalog` describing the first problem.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        let mut category_ids = HashSet::new();
        let mut slugs = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(invalid(format!("duplicate category id {}", category.id)));
            }
            if !slugs.insert(category.slug.as_str()) {
                return Err(invalid(format!("duplicate category slug {}", category.slug)));
            }
        }

        let mut product_ids = HashSet::new();
        for product in &self.products {
            if !product_ids.insert(product.id) {
                return Err(invalid(format!("duplicate product id {}", product.id)));
            }
            if !category_ids.contains(&product.category_id) {
                return Err(invalid(format!(
                    "product {} references unknown category {}",
                    product.id, product.category_id
                )));
            }
            if product.base_price.is_sign_negative() {
                return Err(invalid(format!("product {} has a negative price", product.id)));
            }
        }

        Ok(())
    }

    /// The catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: builtin_categories(),
            products: builtin_products(),
        }
    }
}

fn invalid(message: String) -> RepositoryError {
    RepositoryError::InvalidCatalog(message)
}

fn category(id: i32, name: &str, slug: &str, kind: CategoryKind, description: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        image: format!("https://picsum.photos/400/300?r={slug}"),
        kind,
    }
}

fn builtin_categories() -> Vec<Category> {
    use CategoryKind::{Gemstone, Other, Ring};

    vec![
        category(1, "Emeralds", "emeralds", Gemstone,
            "Precious green gemstones known for their vibrant color and astrological significance"),
        category(2, "Ruby", "ruby", Gemstone,
            "Deep red gemstones symbolizing passion, energy, and success"),
        category(3, "Yellow Sapphire", "yellow-sapphire", Gemstone,
            "Bright yellow gemstones associated with wisdom and prosperity"),
        category(4, "Rings", "rings", Ring,
            "Elegant rings featuring precious stones and metals"),
        category(5, "Necklaces", "necklaces", Other,
            "Stunning necklaces and pendants for every occasion"),
        category(6, "Earrings", "earrings", Other,
            "Beautiful earrings from studs to statement pieces"),
        category(7, "Bracelets", "bracelets", Other,
            "Elegant bracelets and bangles for wrist adornment"),
        category(8, "Gemstones", "gemstones", Gemstone,
            "Loose precious and semi-precious gemstones"),
    ]
}

struct SeedProduct {
    id: i32,
    name: &'static str,
    price: i64,
    hint: &'static str,
    category: i32,
    sub_category: Option<&'static str>,
    sub_heading: &'static str,
    description: &'static str,
}

impl From<SeedProduct> for Product {
    fn from(seed: SeedProduct) -> Self {
        Self {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            base_price: Decimal::from(seed.price),
            category_id: CategoryId::new(seed.category),
            image: format!("https://picsum.photos/800/800?r={}", seed.id),
            hint: seed.hint.to_string(),
            description: seed.description.to_string(),
            sub_category: seed.sub_category.map(String::from),
            sub_heading: Some(seed.sub_heading.to_string()),
        }
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_products() -> Vec<Product> {
    [
        SeedProduct {
            id: 1,
            name: "Solitaire Diamond Ring",
            price: 2500,
            hint: "diamond ring",
            category: 4,
            sub_category: None,
            sub_heading: "Pure Diamond and Gold",
            description: "A classic and timeless solitaire diamond ring, featuring a brilliant-cut \
                          diamond set in a 14k white gold band. The epitome of elegance and simplicity.",
        },
        SeedProduct {
            id: 2,
            name: "Sapphire Pendant Necklace",
            price: 1800,
            hint: "sapphire necklace",
            category: 5,
            sub_category: None,
            sub_heading: "Natural Sapphire and Diamonds",
            description: "A stunning oval-cut sapphire surrounded by a halo of sparkling diamonds, \
                          hanging from a delicate white gold chain. A perfect 'something blue'.",
        },
        SeedProduct {
            id: 3,
            name: "Emerald Stud Earrings",
            price: 1250,
            hint: "emerald earrings",
            category: 6,
            sub_category: None,
            sub_heading: "Natural Emerald and Gold",
            description: "Vibrant, square-cut emeralds set in yellow gold. These stud earrings add \
                          a pop of color and sophistication to any outfit.",
        },
        SeedProduct {
            id: 4,
            name: "Gold Bangle Bracelet",
            price: 950,
            hint: "gold bracelet",
            category: 7,
            sub_category: None,
            sub_heading: "18K Pure Gold",
            description: "A chic and modern 18k gold bangle, perfect for stacking or wearing alone. \
                          Its polished finish provides a beautiful shine.",
        },
        SeedProduct {
            id: 5,
            name: "Pearl Drop Necklace",
            price: 1500,
            hint: "pearl necklace",
            category: 5,
            sub_category: None,
            sub_heading: "Freshwater Pearl and Silver",
            description: "An elegant freshwater pearl suspended from a diamond-accented bail on a \
                          sterling silver chain. A timeless classic for any occasion.",
        },
        SeedProduct {
            id: 6,
            name: "Ruby Eternity Band",
            price: 3100,
            hint: "ruby ring",
            category: 4,
            sub_category: None,
            sub_heading: "Natural Ruby and Platinum",
            description: "A breathtaking eternity band featuring deep red rubies channel-set in \
                          platinum. Symbolizes endless love and passion.",
        },
        SeedProduct {
            id: 7,
            name: "Diamond Tennis Bracelet",
            price: 4200,
            hint: "diamond bracelet",
            category: 7,
            sub_category: None,
            sub_heading: "Brilliant Cut Diamonds",
            description: "A luxurious tennis bracelet with a continuous line of brilliant-cut \
                          diamonds. An unforgettable statement of glamour.",
        },
        SeedProduct {
            id: 8,
            name: "Opal and Gold Earrings",
            price: 1100,
            hint: "opal earrings",
            category: 6,
            sub_category: None,
            sub_heading: "Natural Opal and Gold",
            description: "Mesmerizing teardrop opals dangle from 14k gold hooks, catching the light \
                          with every movement to reveal a rainbow of colors.",
        },
        SeedProduct {
            id: 9,
            name: "Emerald (Panna)",
            price: 2200,
            hint: "emerald gemstone",
            category: 1,
            sub_category: Some("emerald"),
            sub_heading: "Certified Natural Emerald",
            description: "A high-quality, certified natural Emerald gemstone, known for its deep \
                          green color and astrological benefits.",
        },
        SeedProduct {
            id: 10,
            name: "Ruby (Manik)",
            price: 3500,
            hint: "ruby gemstone",
            category: 2,
            sub_category: Some("ruby"),
            sub_heading: "Natural Ruby Gemstone",
            description: "A vibrant, natural Ruby gemstone with excellent clarity and color. \
                          Believed to bring success and power to the wearer.",
        },
        SeedProduct {
            id: 11,
            name: "Yellow Sapphire (Pukhraj)",
            price: 2800,
            hint: "yellow sapphire",
            category: 3,
            sub_category: Some("yellow-sapphire"),
            sub_heading: "Authentic Yellow Sapphire",
            description: "An authentic Yellow Sapphire, cherished for its astrological significance \
                          and beautiful hue. Brings wisdom and prosperity.",
        },
        SeedProduct {
            id: 12,
            name: "Blue Sapphire (Neelam)",
            price: 4500,
            hint: "blue sapphire",
            category: 8,
            sub_category: Some("blue-sapphire"),
            sub_heading: "Natural Blue Sapphire",
            description: "A stunning, natural Blue Sapphire gemstone. A powerful stone known for \
                          its quick-acting results and royal blue color.",
        },
    ]
    .into_iter()
    .map(Product::from)
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.categories.len(), 8);
        assert_eq!(catalog.products.len(), 12);
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let json = serde_json::to_string(&Catalog::builtin()).unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), Catalog::builtin());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let mut catalog = Catalog::builtin();
        catalog.categories.retain(|c| c.slug != "rings");

        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidCatalog(ref msg) if msg.contains("unknown category")));
    }

    #[test]
    fn test_rejects_duplicate_product() {
        let mut catalog = Catalog::builtin();
        let first = catalog.products.first().cloned().unwrap();
        catalog.products.push(first);

        assert!(matches!(
            catalog.validate(),
            Err(RepositoryError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_from_json_reports_decode_errors() {
        assert!(matches!(
            Catalog::from_json("{\"categories\": 3}"),
            Err(RepositoryError::Decode(_))
        ));
    }
}
