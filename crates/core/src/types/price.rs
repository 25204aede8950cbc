//! Exact-decimal price representation.
//!
//! Prices use [`rust_decimal::Decimal`] rather than floating point so that
//! cart totals come out exact: three units at ₹89.99 total ₹269.97, never
//! ₹269.96999…. The storefront is single-currency; the symbol lives here
//! so every surface formats money the same way.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency symbol used across the storefront (Indian Rupee).
pub const CURRENCY_SYMBOL: &str = "₹";

/// A monetary amount in the store currency.
///
/// Serializes transparently as the bare decimal amount, so a persisted
/// cart line carries `"price": "89.99"` and catalog files may write the
/// amount as either a JSON number or a string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of paise (hundredths).
    ///
    /// `Price::from_paise(8999)` is ₹89.99.
    #[must_use]
    pub fn from_paise(paise: i64) -> Self {
        Self(Decimal::new(paise, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Line totals: unit price times quantity.
impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line_total() {
        // 3 x 89.99 must be exactly 269.97 (f64 would drift)
        let unit = Price::from_paise(8999);
        assert_eq!(unit * 3, Price::from_paise(26997));
    }

    #[test]
    fn test_sum_of_prices() {
        let total: Price = [
            Price::from_paise(8999),
            Price::from_paise(4599),
            Price::from_paise(1999),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Price::from_paise(15597));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_paise(8999).to_string(), "₹89.99");
        assert_eq!(Price::from_paise(2400).to_string(), "₹24.00");
        assert_eq!(Price::ZERO.to_string(), "₹0.00");
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        // Hand-written catalog files use bare numbers; our own persistence
        // writes strings. Both must parse to the same value.
        let from_number: Price = serde_json::from_str("89.99").unwrap();
        let from_string: Price = serde_json::from_str("\"89.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, Price::from_paise(8999));
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::from_paise(12499);
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_zero() {
        assert!(Price::ZERO.is_zero());
        assert!(!Price::from_paise(1).is_zero());
        assert_eq!(Price::default(), Price::ZERO);
    }
}
