//! Spend distribution across entities.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::NormalizedMatrix;
use crate::kpi::percent;
use crate::ranking::RankingEngine;

/// Maximum number of slices in a distribution.
pub const DISTRIBUTION_LIMIT: usize = 20;

/// Number of leading entities in the concentration ratio.
pub const CONCENTRATION_TOP: usize = 10;

/// One entity's share of the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    /// Entity name.
    pub entity: String,
    /// Entity total.
    pub total: Decimal,
    /// Share of the grand total, in percent.
    pub share_percent: Decimal,
}

/// Largest entities with their share of the grand total, at most
/// [`DISTRIBUTION_LIMIT`] of them. Entities without spend are left out.
#[must_use]
pub fn distribution(matrix: &NormalizedMatrix) -> Vec<DistributionSlice> {
    let grand_total = matrix.grand_total();
    RankingEngine::ranked_totals(matrix)
        .into_iter()
        .filter(|(_, total)| *total > Decimal::ZERO)
        .take(DISTRIBUTION_LIMIT)
        .map(|(entity, total)| DistributionSlice {
            share_percent: percent(total, grand_total).round_dp(2),
            entity,
            total,
        })
        .collect()
}

/// Share of the grand total held by the `top` largest entities, in percent.
#[must_use]
pub fn concentration_percent(matrix: &NormalizedMatrix, top: usize) -> Decimal {
    let leading: Decimal = RankingEngine::ranked_totals(matrix)
        .into_iter()
        .take(top)
        .map(|(_, total)| total)
        .sum();
    percent(leading, matrix.grand_total()).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Normalizer;
    use crate::summary::EntityTotal;
    use rust_decimal_macros::dec;

    fn listing(n: usize) -> NormalizedMatrix {
        let rows: Vec<EntityTotal> = (1..=n)
            .map(|i| EntityTotal {
                entity: format!("F{i}"),
                total: Decimal::from(i),
                transactions: None,
            })
            .collect();
        let total = rows.iter().map(|r| r.total).sum();
        Normalizer::single_period(1, total, &rows)
    }

    #[test]
    fn test_distribution_is_capped_and_sorted() {
        let slices = distribution(&listing(25));

        assert_eq!(slices.len(), DISTRIBUTION_LIMIT);
        assert_eq!(slices[0].entity, "F25");
        assert!(slices.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn test_shares() {
        let slices = distribution(&listing(4));

        // grand total is 10
        assert_eq!(slices[0].share_percent, dec!(40));
        assert_eq!(slices[3].share_percent, dec!(10));
    }

    #[test]
    fn test_concentration() {
        let matrix = listing(4);

        assert_eq!(concentration_percent(&matrix, 2), dec!(70));
        assert_eq!(concentration_percent(&matrix, CONCENTRATION_TOP), dec!(100));
        assert_eq!(concentration_percent(&NormalizedMatrix::new(), CONCENTRATION_TOP), Decimal::ZERO);
    }
}
