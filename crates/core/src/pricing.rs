//! Unit price computation for customized products.
//!
//! A product's unit price is its base price, scaled by a compounding ring-size
//! surcharge where a ring size applies, plus flat mounting fees for the chosen
//! jewelry setting and metal. Fees are independent of each other and of the
//! size surcharge, and nothing is rounded here: rounding happens only when a
//! price is converted for display (see [`crate::ExchangeRate`]).
//!
//! Every surface that shows or stores a price (product page quote, cart line,
//! checkout total, CLI) goes through [`PricingEngine`], so they always agree.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CategoryKind, Product};
use crate::customization::{CustomizationSelection, JewelryType, MetalType, RingSize};

/// Flat fee for mounting a stone into a jewelry setting, in USD.
#[must_use]
pub fn jewelry_fee(jewelry: JewelryType) -> Decimal {
    Decimal::from(match jewelry {
        JewelryType::Ring => 200,
        JewelryType::Pendant => 150,
        JewelryType::EngagementRing => 350,
        JewelryType::Other => 100,
    })
}

/// Flat fee for the metal of a jewelry setting, in USD.
#[must_use]
pub fn metal_fee(metal: MetalType) -> Decimal {
    Decimal::from(match metal {
        MetalType::Gold14kYellow => 300,
        MetalType::Gold14kWhite => 320,
        MetalType::Gold18kYellow => 450,
        MetalType::Gold18kWhite => 480,
        MetalType::Gold22kYellow => 600,
        MetalType::Gold22kWhite => 630,
        MetalType::Silver => 100,
        MetalType::PanchDhatu => 80,
    })
}

/// How a unit price was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    /// Factor applied to the base price for the ring size (1 when none applies).
    pub ring_size_multiplier: Decimal,
    pub jewelry_fee: Decimal,
    pub metal_fee: Decimal,
    pub unit_price: Decimal,
}

/// Computes unit prices for customized products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingEngine {
    baseline: RingSize,
    step_rate: Decimal,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            baseline: RingSize::BASELINE,
            // 2% per size step
            step_rate: Decimal::new(102, 2),
        }
    }
}

impl PricingEngine {
    /// Create an engine with the standard surcharge rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier applied to the base price for `size`.
    ///
    /// Sizes at or below the baseline are not discounted.
    #[must_use]
    pub fn ring_size_multiplier(&self, size: RingSize) -> Decimal {
        let steps = size.get().saturating_sub(self.baseline.get());
        if steps == 0 {
            return Decimal::ONE;
        }
        self.step_rate.powu(u64::from(steps))
    }

    /// Compute the price breakdown of a `kind` product with the given base price.
    ///
    /// The selection is normalized first, so options that do not apply to the
    /// product (a metal on a loose stone, a ring size on a pendant) never affect
    /// the price.
    #[must_use]
    pub fn breakdown(
        &self,
        base_price: Decimal,
        kind: CategoryKind,
        selection: &CustomizationSelection,
    ) -> PriceBreakdown {
        let effective = selection.normalized_for(kind);

        let ring_size_multiplier = effective
            .ring_size
            .map_or(Decimal::ONE, |size| self.ring_size_multiplier(size));

        let (jewelry, metal) = if effective.is_mounted() {
            (
                effective.jewelry_type.map_or(Decimal::ZERO, jewelry_fee),
                effective.metal_type.map_or(Decimal::ZERO, metal_fee),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        PriceBreakdown {
            base_price,
            ring_size_multiplier,
            jewelry_fee: jewelry,
            metal_fee: metal,
            unit_price: base_price * ring_size_multiplier + jewelry + metal,
        }
    }

    /// Compute the unrounded unit price of a `kind` product.
    #[must_use]
    pub fn compute_price(
        &self,
        base_price: Decimal,
        kind: CategoryKind,
        selection: &CustomizationSelection,
    ) -> Decimal {
        self.breakdown(base_price, kind, selection).unit_price
    }

    /// Compute the unit price of a catalog product in its category.
    #[must_use]
    pub fn price_product(
        &self,
        product: &Product,
        category: &Category,
        selection: &CustomizationSelection,
    ) -> Decimal {
        self.compute_price(product.base_price, category.kind, selection)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::customization::PurchaseType;

    fn size(n: u8) -> RingSize {
        RingSize::new(n).unwrap()
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_loose_non_ring_is_base_price() {
        let engine = PricingEngine::new();
        let loose = CustomizationSelection::loose();
        for kind in [CategoryKind::Gemstone, CategoryKind::Other] {
            assert_eq!(engine.compute_price(dec(1800), kind, &loose), dec(1800));
        }
    }

    #[test]
    fn test_ring_price_at_baseline_is_base_price() {
        let engine = PricingEngine::new();
        let selection = CustomizationSelection::loose().with_ring_size(size(5));
        assert_eq!(engine.compute_price(dec(2500), CategoryKind::Ring, &selection), dec(2500));
    }

    #[test]
    fn test_ring_price_strictly_increases_with_size() {
        let engine = PricingEngine::new();
        let mut previous = dec(2500);
        for n in 6..=RingSize::MAX {
            let selection = CustomizationSelection::loose().with_ring_size(size(n));
            let price = engine.compute_price(dec(2500), CategoryKind::Ring, &selection);
            assert!(price > previous, "size {n}: {price} <= {previous}");
            previous = price;
        }
    }

    #[test]
    fn test_ring_size_fifteen() {
        let engine = PricingEngine::new();
        let selection = CustomizationSelection::loose().with_ring_size(size(15));
        let price = engine.compute_price(dec(2500), CategoryKind::Ring, &selection);
        // 2500 * 1.02^10 = 3047.4860499868928256
        assert_eq!(price.round_dp(2), Decimal::new(304_749, 2));
        assert_eq!(
            price,
            Decimal::from_str_exact("3047.4860499868928256").unwrap()
        );
    }

    #[test]
    fn test_mounted_gemstone_adds_flat_fees() {
        let engine = PricingEngine::new();
        let selection = CustomizationSelection::mounted(JewelryType::Ring, MetalType::Silver)
            .with_ring_size(size(5));
        assert_eq!(
            engine.compute_price(dec(2200), CategoryKind::Gemstone, &selection),
            dec(2500)
        );
    }

    #[test]
    fn test_fees_are_additive_for_every_combination() {
        let engine = PricingEngine::new();
        for jewelry in JewelryType::ALL {
            for metal in MetalType::ALL {
                let selection =
                    CustomizationSelection::mounted(jewelry, metal).with_ring_size(size(5));
                let price = engine.compute_price(dec(1000), CategoryKind::Gemstone, &selection);
                assert_eq!(price, dec(1000) + jewelry_fee(jewelry) + metal_fee(metal));
            }
        }
    }

    #[test]
    fn test_mounted_ring_combines_surcharge_and_fees() {
        let engine = PricingEngine::new();
        let selection =
            CustomizationSelection::mounted(JewelryType::EngagementRing, MetalType::Gold14kYellow)
                .with_ring_size(size(6));
        // 1000 * 1.02 + 350 + 300
        assert_eq!(
            engine.compute_price(dec(1000), CategoryKind::Gemstone, &selection),
            dec(1670)
        );
    }

    #[test]
    fn test_pendant_ignores_ring_size() {
        let engine = PricingEngine::new();
        let selection = CustomizationSelection::mounted(JewelryType::Pendant, MetalType::PanchDhatu)
            .with_ring_size(size(20));
        assert_eq!(
            engine.compute_price(dec(1000), CategoryKind::Gemstone, &selection),
            dec(1230)
        );
    }

    #[test]
    fn test_loose_gemstone_ignores_stale_mounting_state() {
        let engine = PricingEngine::new();
        let stale = CustomizationSelection {
            purchase_type: PurchaseType::Loose,
            jewelry_type: Some(JewelryType::EngagementRing),
            metal_type: Some(MetalType::Gold22kWhite),
            ring_size: Some(size(30)),
        };
        assert_eq!(
            engine.compute_price(dec(4500), CategoryKind::Gemstone, &stale),
            dec(4500)
        );
    }

    #[test]
    fn test_breakdown_reports_components() {
        let engine = PricingEngine::new();
        let selection = CustomizationSelection::mounted(JewelryType::Ring, MetalType::Gold18kYellow)
            .with_ring_size(size(7));
        let breakdown = engine.breakdown(dec(2000), CategoryKind::Gemstone, &selection);

        assert_eq!(breakdown.ring_size_multiplier, Decimal::new(10404, 4));
        assert_eq!(breakdown.jewelry_fee, dec(200));
        assert_eq!(breakdown.metal_fee, dec(450));
        assert_eq!(breakdown.unit_price, Decimal::new(27308, 1));
    }
}
