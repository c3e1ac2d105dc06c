//! JSON views shared by several route modules.

use rust_decimal::Decimal;
use serde::Serialize;

use lumera_core::{
    CategoryKind, ExchangeRate, JewelryType, MetalType, Money, Product, RingSize,
    pricing::{jewelry_fee, metal_fee},
};

/// A USD amount together with its customer-facing conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrice {
    /// Unrounded USD amount used for arithmetic.
    pub usd: Decimal,
    /// Converted and rounded for display.
    pub display: Money,
    /// e.g. "₹208750"
    pub formatted: String,
}

impl DisplayPrice {
    #[must_use]
    pub fn new(usd: Decimal, rate: &ExchangeRate) -> Self {
        let display = rate.to_display(usd);
        Self {
            usd,
            formatted: display.to_string(),
            display,
        }
    }
}

/// A product as listed, with its category kind and display price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub kind: CategoryKind,
    pub price: DisplayPrice,
}

impl ProductView {
    #[must_use]
    pub fn new(product: Product, kind: CategoryKind, rate: &ExchangeRate) -> Self {
        let price = DisplayPrice::new(product.base_price, rate);
        Self {
            product,
            kind,
            price,
        }
    }
}

/// One choice on a customization axis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub code: &'static str,
    pub label: &'static str,
    pub fee: DisplayPrice,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingSizeRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

/// The customization axes a product offers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationOptions {
    pub mountable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jewelry_types: Vec<OptionView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metal_types: Vec<OptionView>,
    /// Present when a ring size can apply to the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_sizes: Option<RingSizeRange>,
}

impl CustomizationOptions {
    #[must_use]
    pub fn for_kind(kind: CategoryKind, rate: &ExchangeRate) -> Self {
        let mountable = kind.is_mountable();
        let (jewelry_types, metal_types) = if mountable {
            (
                JewelryType::ALL
                    .iter()
                    .map(|&j| OptionView {
                        code: j.code(),
                        label: j.label(),
                        fee: DisplayPrice::new(jewelry_fee(j), rate),
                    })
                    .collect(),
                MetalType::ALL
                    .iter()
                    .map(|&m| OptionView {
                        code: m.code(),
                        label: m.label(),
                        fee: DisplayPrice::new(metal_fee(m), rate),
                    })
                    .collect(),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        // Gemstones can be mounted into a ring, which is then sized.
        let ring_sizes = (kind.is_sized() || mountable).then_some(RingSizeRange {
            min: RingSize::MIN,
            max: RingSize::MAX,
            default: RingSize::DEFAULT.get(),
        });

        Self {
            mountable,
            jewelry_types,
            metal_types,
            ring_sizes,
        }
    }
}
