//! Chart series.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::aggregate::NormalizedMatrix;
use crate::calendar::{MONTHS_PER_YEAR, YearMonth, month_short_label};

/// Value of one charted entity at one point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesValue {
    /// Entity name.
    pub entity: String,
    /// Entity value at this point; 0 when absent.
    pub value: Decimal,
}

/// One month of the yearly line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Month, 1-12.
    pub period: u32,
    /// Short month label.
    pub label: &'static str,
    /// Charted entities, in ranking order.
    pub values: Vec<SeriesValue>,
    /// Month total over all entities.
    pub total: Decimal,
}

/// One day of the month-pace chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacePoint {
    /// Day of month.
    pub day: u32,
    /// Spend on the day.
    pub value: Decimal,
    /// Spend from day 1 through this day.
    pub cumulative: Decimal,
    /// Budget accrued evenly from day 1 through this day.
    pub cumulative_budget: Decimal,
    /// The backend reported the day.
    pub has_data: bool,
}

/// Twelve chart points for `entities`, missing months and values as 0.
#[must_use]
pub fn monthly_series(matrix: &NormalizedMatrix, entities: &[String]) -> Vec<ChartPoint> {
    (1..=MONTHS_PER_YEAR)
        .map(|month| ChartPoint {
            period: month,
            label: month_short_label(month),
            values: entities
                .iter()
                .map(|entity| SeriesValue {
                    entity: entity.clone(),
                    value: matrix.entity_value(month, entity),
                })
                .collect(),
            total: matrix.period_total(month),
        })
        .collect()
}

/// Cumulative spend against an evenly accrued monthly budget, one point per day.
#[must_use]
pub fn daily_pace(matrix: &NormalizedMatrix, month: YearMonth, monthly_budget: Decimal) -> Vec<PacePoint> {
    let days = month.days_in_month();
    let daily_budget = monthly_budget
        .checked_div(Decimal::from(days))
        .unwrap_or(Decimal::ZERO);

    let mut cumulative = Decimal::ZERO;
    let mut cumulative_budget = Decimal::ZERO;
    (1..=days)
        .map(|day| {
            let value = matrix.period_total(day);
            cumulative += value;
            cumulative_budget += daily_budget;
            PacePoint {
                day,
                value,
                cumulative,
                cumulative_budget: cumulative_budget
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                has_data: matrix.period(day).is_some(),
            }
        })
        .collect()
}
