//! Price a customized product from the command line.

use std::io::Write;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use lumera_core::{
    CategoryKind, CustomizationSelection, ExchangeRate, JewelryType, MetalType, Money,
    PriceBreakdown, PricingEngine, PurchaseType, RingSize,
};

/// Category kind as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Ring,
    Gemstone,
    Other,
}

impl From<KindArg> for CategoryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Ring => Self::Ring,
            KindArg::Gemstone => Self::Gemstone,
            KindArg::Other => Self::Other,
        }
    }
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Base price in USD
    #[arg(long)]
    pub base_price: Decimal,

    /// Kind of the product's category
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Mount the stone into jewelry (gemstones only)
    #[arg(long)]
    pub mounted: bool,

    /// Jewelry type: ring, pendant, engagement-ring, other
    #[arg(long)]
    pub jewelry: Option<JewelryType>,

    /// Metal, e.g. gold-14k-yellow, silver, panch-dhatu
    #[arg(long)]
    pub metal: Option<MetalType>,

    /// Ring size (5-30)
    #[arg(long, value_parser = parse_ring_size)]
    pub ring_size: Option<RingSize>,

    /// USD to INR display rate
    #[arg(long, default_value_t = ExchangeRate::DEFAULT_USD_TO_INR)]
    pub rate: Decimal,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_ring_size(raw: &str) -> Result<RingSize, String> {
    let size: u8 = raw.parse().map_err(|e| format!("{e}"))?;
    RingSize::new(size).map_err(|e| e.to_string())
}

impl PriceArgs {
    fn selection(&self) -> CustomizationSelection {
        CustomizationSelection {
            purchase_type: if self.mounted {
                PurchaseType::Mounted
            } else {
                PurchaseType::Loose
            },
            jewelry_type: self.jewelry,
            metal_type: self.metal,
            ring_size: self.ring_size,
        }
    }
}

/// A computed quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub kind: CategoryKind,
    pub selection: CustomizationSelection,
    pub breakdown: PriceBreakdown,
    pub display: Money,
    pub customization: String,
}

/// Compute the quote for the given arguments.
#[must_use]
pub fn compute(args: &PriceArgs) -> Quote {
    let kind = CategoryKind::from(args.kind);
    let selection = args.selection().normalized_for(kind);
    let breakdown = PricingEngine::new().breakdown(args.base_price, kind, &selection);
    let display = ExchangeRate::usd_to_inr(args.rate).to_display(breakdown.unit_price);

    Quote {
        kind,
        customization: selection.label(kind),
        selection,
        breakdown,
        display,
    }
}

/// Print a price quote.
///
/// Incomplete selections are still priced; a warning names the missing option.
///
/// # Errors
///
/// Returns an error if the base price or rate is negative, or if writing the
/// JSON output fails.
pub fn quote(args: &PriceArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.base_price.is_sign_negative() {
        return Err("base price must not be negative".into());
    }
    if args.rate <= Decimal::ZERO {
        return Err("rate must be positive".into());
    }

    let kind = CategoryKind::from(args.kind);
    if let Err(e) = args.selection().validate(kind) {
        warn!("Selection is incomplete: {e}");
    }

    let quote = compute(args);

    if args.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &quote)?;
        writeln!(stdout)?;
        return Ok(());
    }

    info!("Unit price: {}", Money::usd(quote.breakdown.unit_price));
    info!("  Base price: {}", Money::usd(quote.breakdown.base_price));
    info!("  Ring size multiplier: {}", quote.breakdown.ring_size_multiplier);
    info!("  Jewelry fee: {}", Money::usd(quote.breakdown.jewelry_fee));
    info!("  Metal fee: {}", Money::usd(quote.breakdown.metal_fee));
    info!("Display price: {}", quote.display);
    if !quote.customization.is_empty() {
        info!("Customization: {}", quote.customization);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PriceArgs,
    }

    fn parse(argv: &[&str]) -> PriceArgs {
        let mut full = vec!["lumera"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_ring_quote() {
        let quote = compute(&parse(&[
            "--base-price", "2500", "--kind", "ring", "--ring-size", "15",
        ]));

        assert_eq!(
            quote.breakdown.unit_price.round_dp(2),
            Decimal::new(304_749, 2)
        );
        assert_eq!(quote.customization, "Size: 15");
    }

    #[test]
    fn test_mounted_gemstone_quote() {
        let quote = compute(&parse(&[
            "--base-price", "1000", "--kind", "gemstone", "--mounted",
            "--jewelry", "pendant", "--metal", "silver",
        ]));

        assert_eq!(quote.breakdown.unit_price, Decimal::from(1250));
        assert_eq!(quote.customization, "Mounted in Pendant (Silver)");
        assert_eq!(quote.display.to_string(), "₹104375");
    }

    #[test]
    fn test_rejects_out_of_range_ring_size() {
        let result = TestCli::try_parse_from([
            "lumera", "--base-price", "2500", "--kind", "ring", "--ring-size", "31",
        ]);
        assert!(result.is_err());
    }
}
