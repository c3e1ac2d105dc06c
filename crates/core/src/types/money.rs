//! Money and display-currency conversion using decimal arithmetic.
//!
//! Catalog prices are stored in USD. Customers see prices converted to the
//! display currency (INR by default) at a configured rate, rounded only at the
//! very end for presentation.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency_code.display_decimals();
        let rounded = self
            .amount
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{}{rounded:.prec$}", self.currency_code.symbol(), prec = dp as usize)
    }
}

/// ISO 4217 currency codes used by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    INR,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::INR => "₹",
        }
    }

    /// Number of decimals shown to customers.
    ///
    /// Rupee prices are shown as whole amounts.
    #[must_use]
    pub const fn display_decimals(self) -> u32 {
        match self {
            Self::USD => 2,
            Self::INR => 0,
        }
    }
}

/// Conversion from the USD base currency into a display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    /// Currency the converted amount is expressed in.
    pub target: CurrencyCode,
    /// Units of `target` per US dollar.
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Default USD to INR rate used when none is configured.
    pub const DEFAULT_USD_TO_INR: Decimal = Decimal::from_parts(8350, 0, 0, false, 2);

    /// Create a USD to INR conversion.
    #[must_use]
    pub const fn usd_to_inr(rate: Decimal) -> Self {
        Self {
            target: CurrencyCode::INR,
            rate,
        }
    }

    /// Convert a USD amount into the display currency, rounded for display.
    #[must_use]
    pub fn to_display(&self, usd: Decimal) -> Money {
        let amount = (usd * self.rate).round_dp_with_strategy(
            self.target.display_decimals(),
            RoundingStrategy::MidpointAwayFromZero,
        );
        Money::new(amount, self.target)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::usd_to_inr(Self::DEFAULT_USD_TO_INR)
    }
}
