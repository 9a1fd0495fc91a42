//! Money display.
//!
//! Amounts are plain `f64` values in the catalog's currency-agnostic units.
//! Rounding happens only here, when a figure is turned into text; totals are
//! never rounded between arithmetic steps.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes the storefront can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

/// Format an amount for display with two decimal places (e.g., "₹240.00").
///
/// The exact binary value of `amount` is rounded half away from zero, so a
/// discount of exactly 0.125 shows as 0.13.
///
/// ```
/// use shopfront_core::{CurrencyCode, format_amount};
///
/// assert_eq!(format_amount(240.0, CurrencyCode::INR), "₹240.00");
/// assert_eq!(format_amount(19.999, CurrencyCode::USD), "$20.00");
/// assert_eq!(format_amount(0.125, CurrencyCode::INR), "₹0.13");
/// ```
#[must_use]
pub fn format_amount(amount: f64, currency: CurrencyCode) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(value) => {
            let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{}{rounded:.2}", currency.symbol())
        }
        // NaN, infinities and values beyond Decimal's range
        None => format!("{}{amount:.2}", currency.symbol()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency_is_rupee() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::INR);
        assert_eq!(CurrencyCode::default().code(), "INR");
    }

    #[test]
    fn test_format_amount_pads_to_two_decimals() {
        assert_eq!(format_amount(0.0, CurrencyCode::INR), "₹0.00");
        assert_eq!(format_amount(9.5, CurrencyCode::INR), "₹9.50");
        assert_eq!(format_amount(1234.567, CurrencyCode::EUR), "€1234.57");
    }

    #[test]
    fn test_format_amount_rounds_exact_halves_up() {
        assert_eq!(format_amount(0.125, CurrencyCode::INR), "₹0.13");
        assert_eq!(format_amount(0.375, CurrencyCode::INR), "₹0.38");
        assert_eq!(format_amount(2.5, CurrencyCode::INR), "₹2.50");
        assert_eq!(format_amount(61.125, CurrencyCode::INR), "₹61.13");
    }

    #[test]
    fn test_format_amount_uses_binary_value_for_near_halves() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(format_amount(1.005, CurrencyCode::INR), "₹1.00");
    }
}
