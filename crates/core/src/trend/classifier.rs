//! Two-point trend classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of spending between the last two observations.
///
/// `Up` means costs are rising, which the dashboards render as a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Later value is larger.
    Up,
    /// Later value is smaller.
    Down,
    /// Equal values, or fewer than two observations.
    #[default]
    Stable,
}

/// Classifies a series by its last two non-zero values.
pub struct TrendClassifier;

impl TrendClassifier {
    /// Compares the last two non-zero values of `values`, in order.
    ///
    /// Zeros are gaps, not observations. Everything before the last two
    /// non-zero values is ignored.
    #[must_use]
    pub fn classify(values: &[Decimal]) -> Trend {
        let mut observed = values.iter().rev().filter(|v| !v.is_zero());
        let (Some(later), Some(earlier)) = (observed.next(), observed.next()) else {
            return Trend::Stable;
        };

        match later.cmp(earlier) {
            std::cmp::Ordering::Greater => Trend::Up,
            std::cmp::Ordering::Less => Trend::Down,
            std::cmp::Ordering::Equal => Trend::Stable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(&[dec!(0), dec!(0), dec!(100), dec!(0), dec!(50)], Trend::Down)]
    #[case(&[dec!(0), dec!(100)], Trend::Stable)]
    #[case(&[], Trend::Stable)]
    #[case(&[dec!(10), dec!(20)], Trend::Up)]
    #[case(&[dec!(30), dec!(30)], Trend::Stable)]
    #[case(&[dec!(500), dec!(10), dec!(0), dec!(20), dec!(0)], Trend::Up)]
    fn test_classify(#[case] values: &[Decimal], #[case] expected: Trend) {
        assert_eq!(TrendClassifier::classify(values), expected);
    }

    #[test]
    fn test_ignores_older_history() {
        // a slope fit would call this "down"
        let values = [dec!(1000), dec!(900), dec!(800), dec!(10), dec!(11)];
        assert_eq!(TrendClassifier::classify(&values), Trend::Up);
    }
}
