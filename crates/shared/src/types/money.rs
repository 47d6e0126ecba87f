//! Money formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end, including when rendered.

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders monetary amounts for cards, tooltips and tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
}

impl MoneyFormat {
    /// Creates a formatter for the given currency symbol (e.g. "R$").
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Short form used on KPI cards: `R$ 1.25M`, `R$ 12.5k`, `R$ 950`.
    #[must_use]
    pub fn compact(&self, value: Decimal) -> String {
        if value.is_zero() {
            return format!("{} 0", self.symbol);
        }

        let million = Decimal::from(1_000_000u32);
        if value >= million {
            let scaled = round(value / million, 2);
            return format!("{} {scaled:.2}M", self.symbol);
        }
        if value >= Decimal::ONE_THOUSAND {
            let scaled = round(value / Decimal::ONE_THOUSAND, 1);
            return format!("{} {scaled:.1}k", self.symbol);
        }

        format!("{} {:.0}", self.symbol, round(value, 0))
    }

    /// Long form used in transaction tables: `R$ 1.234.567,89`.
    #[must_use]
    pub fn full(&self, value: Decimal) -> String {
        let rounded = round(value, 2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        format!(
            "{} {sign}{},{fraction}",
            self.symbol,
            group_thousands(integer)
        )
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new("R$")
    }
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "R$ 0")]
    #[case(dec!(950), "R$ 950")]
    #[case(dec!(999.6), "R$ 1000")]
    #[case(dec!(1000), "R$ 1.0k")]
    #[case(dec!(12_540), "R$ 12.5k")]
    #[case(dec!(1_250_000), "R$ 1.25M")]
    #[case(dec!(-500), "R$ -500")]
    fn test_compact(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(MoneyFormat::default().compact(value), expected);
    }

    #[rstest]
    #[case(dec!(0), "R$ 0,00")]
    #[case(dec!(12.5), "R$ 12,50")]
    #[case(dec!(1234.567), "R$ 1.234,57")]
    #[case(dec!(1234567.891), "R$ 1.234.567,89")]
    #[case(dec!(-98765.4), "R$ -98.765,40")]
    fn test_full(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(MoneyFormat::default().full(value), expected);
    }

    #[test]
    fn test_custom_symbol() {
        let format = MoneyFormat::new("US$");
        assert_eq!(format.symbol(), "US$");
        assert_eq!(format.compact(dec!(2_000_000)), "US$ 2.00M");
    }
}
