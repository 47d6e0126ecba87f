//! KPI calculator.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::budget::BudgetMap;
use super::types::{KpiBundle, Projection, TopEntity};
use crate::aggregate::{NormalizedMatrix, PeriodKey};
use crate::calendar::YearMonth;
use crate::ranking::RankingEngine;
use costlens_shared::types::ViewMode;

/// Decimal places kept in money and percentage outputs.
const OUTPUT_SCALE: u32 = 2;

/// Derives a [`KpiBundle`] from a matrix snapshot.
pub struct KpiCalculator;

impl KpiCalculator {
    /// Computes all KPIs of a view.
    ///
    /// `current` is the reference month: the month shown by monthly views,
    /// the month whose days a daily matrix holds, and the month compared
    /// against its predecessor in annual views.
    #[must_use]
    pub fn calculate(
        matrix: &NormalizedMatrix,
        budgets: &BudgetMap,
        mode: ViewMode,
        current: YearMonth,
    ) -> KpiBundle {
        let in_range = Self::periods_in_range(matrix, mode, current);
        let total: Decimal = in_range.iter().map(|p| matrix.period_total(*p)).sum();
        let periods_with_data = in_range
            .iter()
            .filter(|p| matrix.period_total(**p) > Decimal::ZERO)
            .count();

        let average = ratio(total, Decimal::from(periods_with_data));
        let budget = Self::budget_for_range(matrix, budgets, mode);
        let consumed = percent(total, budget);

        let projection = (mode == ViewMode::Daily).then(|| Self::projection(matrix, total, budget, current));
        let variance = if mode == ViewMode::Annual {
            Self::month_over_month(matrix, current.month())
        } else {
            Decimal::ZERO
        };

        let kpis = KpiBundle {
            total_for_range: total,
            average_per_period: round(average),
            budget_for_range: budget,
            budget_consumed_percent: round(consumed),
            periods_with_data,
            projection,
            variance_percent: round(variance),
            top_entity: Self::top_entity(matrix, mode, current),
        };

        debug!(
            %mode,
            total = %kpis.total_for_range,
            budget = %kpis.budget_for_range,
            "computed kpis"
        );
        kpis
    }

    fn periods_in_range(matrix: &NormalizedMatrix, mode: ViewMode, current: YearMonth) -> Vec<PeriodKey> {
        match mode {
            ViewMode::Monthly => vec![current.month()],
            ViewMode::Annual | ViewMode::Daily | ViewMode::Suppliers => {
                matrix.periods().map(|(p, _)| p).collect()
            }
        }
    }

    /// Sum of the universe's monthly budgets, scaled by months in range.
    #[must_use]
    pub fn budget_for_range(matrix: &NormalizedMatrix, budgets: &BudgetMap, mode: ViewMode) -> Decimal {
        let monthly: Decimal = matrix.entities().iter().map(|e| budgets.budget_for(e)).sum();
        monthly * Decimal::from(mode.budget_months())
    }

    fn projection(matrix: &NormalizedMatrix, total: Decimal, month_budget: Decimal, current: YearMonth) -> Projection {
        let days = current.days_in_month();
        let elapsed = matrix.last_period().unwrap_or(1).clamp(1, days);
        let run_rate = ratio(total, Decimal::from(elapsed));
        let projected = run_rate * Decimal::from(days);

        Projection {
            run_rate: round(run_rate),
            projected_total: round(projected),
            elapsed_units: elapsed,
            total_units: days,
            remaining_units: days - elapsed,
            projected_budget_percent: round(percent(projected, month_budget)),
        }
    }

    /// Change of `month` against the month before, in percent.
    ///
    /// A January reference has no predecessor inside a one-year matrix and
    /// reports 0.
    #[must_use]
    pub fn month_over_month(matrix: &NormalizedMatrix, month: PeriodKey) -> Decimal {
        if month <= 1 {
            return Decimal::ZERO;
        }
        let current = matrix.period_total(month);
        let previous = matrix.period_total(month - 1);
        if previous <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        percent(current - previous, previous)
    }

    fn top_entity(matrix: &NormalizedMatrix, mode: ViewMode, current: YearMonth) -> TopEntity {
        let mut totals = match mode {
            ViewMode::Monthly => matrix.period_entity_totals(current.month()),
            ViewMode::Annual | ViewMode::Daily | ViewMode::Suppliers => {
                RankingEngine::ranked_totals(matrix)
            }
        };
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        totals
            .into_iter()
            .next()
            .filter(|(_, value)| *value > Decimal::ZERO)
            .map_or_else(TopEntity::none, |(name, value)| TopEntity { name, value })
    }
}

/// `part / whole`, or 0 when `whole` is not positive.
fn ratio(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole).unwrap_or(Decimal::ZERO)
}

/// `100 * part / whole`, or 0 when `whole` is not positive.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Normalizer;
    use crate::summary::{EntityPeriodTotal, EntityTotal, PeriodTotal};
    use rust_decimal_macros::dec;

    fn period(period: u32, total: Decimal) -> PeriodTotal {
        PeriodTotal { period, total }
    }

    fn cell(period: u32, entity: &str, total: Decimal) -> EntityPeriodTotal {
        EntityPeriodTotal {
            period,
            entity: entity.to_string(),
            total,
        }
    }

    fn year_matrix() -> NormalizedMatrix {
        Normalizer::normalize(
            &[period(1, dec!(1000)), period(2, dec!(1200))],
            &[
                cell(1, "X", dec!(600)),
                cell(1, "Y", dec!(400)),
                cell(2, "X", dec!(700)),
                cell(2, "Y", dec!(500)),
            ],
        )
    }

    fn budgets() -> BudgetMap {
        let mut budgets = BudgetMap::new();
        budgets.insert("X", dec!(500));
        budgets.insert("Y", dec!(300));
        budgets
    }

    fn month(m: u32) -> YearMonth {
        YearMonth::new(2024, m).unwrap()
    }

    #[test]
    fn test_annual_scenario() {
        let kpis = KpiCalculator::calculate(&year_matrix(), &budgets(), ViewMode::Annual, month(2));

        assert_eq!(kpis.total_for_range, dec!(2200));
        assert_eq!(kpis.budget_for_range, dec!(9600));
        assert_eq!(kpis.budget_consumed_percent.round_dp(1), dec!(22.9));
        assert_eq!(kpis.average_per_period, dec!(1100));
        assert_eq!(kpis.periods_with_data, 2);
        assert_eq!(kpis.top_entity.name, "X");
        assert_eq!(kpis.top_entity.value, dec!(1300));
        assert_eq!(kpis.variance_percent, dec!(20));
        assert!(kpis.projection.is_none());
    }

    #[test]
    fn test_monthly_mode_uses_current_month() {
        let kpis = KpiCalculator::calculate(&year_matrix(), &budgets(), ViewMode::Monthly, month(1));

        assert_eq!(kpis.total_for_range, dec!(1000));
        assert_eq!(kpis.budget_for_range, dec!(800));
        assert_eq!(kpis.budget_consumed_percent, dec!(125));
        assert_eq!(kpis.top_entity.value, dec!(600));
        assert_eq!(kpis.variance_percent, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_mode_without_data() {
        let kpis = KpiCalculator::calculate(&year_matrix(), &budgets(), ViewMode::Monthly, month(9));

        assert_eq!(kpis.total_for_range, Decimal::ZERO);
        assert_eq!(kpis.average_per_period, Decimal::ZERO);
        assert!(kpis.top_entity.is_none());
    }

    #[test]
    fn test_january_variance_is_zero() {
        let kpis = KpiCalculator::calculate(&year_matrix(), &budgets(), ViewMode::Annual, month(1));
        assert_eq!(kpis.variance_percent, Decimal::ZERO);
    }

    #[test]
    fn test_variance_without_previous_is_zero() {
        let matrix = Normalizer::normalize(&[period(5, dec!(100))], &[]);
        assert_eq!(KpiCalculator::month_over_month(&matrix, 5), Decimal::ZERO);
    }

    #[test]
    fn test_daily_projection() {
        let matrix = Normalizer::normalize_daily(
            &[period(1, dec!(100)), period(5, dec!(200))],
            &[EntityTotal {
                entity: "X".to_string(),
                total: dec!(300),
                transactions: None,
            }],
            &[1, 5],
        );
        // April has 30 days
        let kpis = KpiCalculator::calculate(&matrix, &budgets(), ViewMode::Daily, month(4));
        let projection = kpis.projection.unwrap();

        assert_eq!(kpis.total_for_range, dec!(300));
        assert_eq!(kpis.budget_for_range, dec!(500));
        assert_eq!(kpis.average_per_period, dec!(150));
        assert_eq!(projection.elapsed_units, 5);
        assert_eq!(projection.remaining_units, 25);
        assert_eq!(projection.run_rate, dec!(60));
        assert_eq!(projection.projected_total, dec!(1800));
        assert_eq!(projection.projected_budget_percent, dec!(360));
        assert_eq!(kpis.top_entity.name, "X");
    }

    #[test]
    fn test_daily_elapsed_counts_days_with_credits() {
        let matrix = Normalizer::normalize_daily(&[period(1, dec!(100)), period(10, dec!(-20))], &[], &[]);
        let projection = KpiCalculator::calculate(&matrix, &BudgetMap::new(), ViewMode::Daily, month(4))
            .projection
            .unwrap();

        assert_eq!(projection.elapsed_units, 10);
        assert_eq!(projection.run_rate, dec!(8));
        assert_eq!(projection.projected_total, dec!(240));
    }

    #[test]
    fn test_daily_elapsed_follows_recorded_days() {
        let matrix = Normalizer::normalize_daily(&[period(3, dec!(120))], &[], &[3, 12]);
        let projection = KpiCalculator::calculate(&matrix, &BudgetMap::new(), ViewMode::Daily, month(4))
            .projection
            .unwrap();

        assert_eq!(projection.elapsed_units, 12);
        assert_eq!(projection.remaining_units, 18);
        assert_eq!(projection.run_rate, dec!(10));
    }

    #[test]
    fn test_daily_projection_without_data() {
        let kpis = KpiCalculator::calculate(&NormalizedMatrix::new(), &BudgetMap::new(), ViewMode::Daily, month(2));
        let projection = kpis.projection.unwrap();

        assert_eq!(projection.elapsed_units, 1);
        assert_eq!(projection.total_units, 29);
        assert_eq!(projection.projected_total, Decimal::ZERO);
        assert_eq!(projection.projected_budget_percent, Decimal::ZERO);
    }

    #[test]
    fn test_top_entity_tie_keeps_first_appearance() {
        let matrix = Normalizer::normalize(
            &[period(1, dec!(20))],
            &[cell(1, "First", dec!(10)), cell(1, "Second", dec!(10))],
        );
        let kpis = KpiCalculator::calculate(&matrix, &BudgetMap::new(), ViewMode::Annual, month(1));
        assert_eq!(kpis.top_entity.name, "First");
    }

    #[test]
    fn test_empty_matrix_sentinel() {
        let kpis = KpiCalculator::calculate(&NormalizedMatrix::new(), &budgets(), ViewMode::Annual, month(6));

        assert_eq!(kpis.top_entity, TopEntity::none());
        assert_eq!(kpis.budget_for_range, Decimal::ZERO);
        assert_eq!(kpis.budget_consumed_percent, Decimal::ZERO);
    }
}
