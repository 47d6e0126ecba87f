//! Month-by-month comparative table.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::NormalizedMatrix;
use crate::calendar::MONTHS_PER_YEAR;
use crate::kpi::BudgetMap;
use crate::trend::{Trend, TrendClassifier};

/// One entity row of the comparative table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparativeRow {
    /// Entity name as aggregated.
    pub entity: String,
    /// Display label.
    pub label: String,
    /// Values for months 1-12.
    pub months: Vec<Decimal>,
    /// Sum of the months.
    pub total: Decimal,
    /// Trend over the last two months with spend.
    pub trend: Trend,
    /// Configured monthly budget; 0 when none.
    pub monthly_budget: Decimal,
}

/// One row per entity of a yearly matrix, largest total first.
#[must_use]
pub fn comparative_table(matrix: &NormalizedMatrix, budgets: &BudgetMap) -> Vec<ComparativeRow> {
    let mut rows: Vec<ComparativeRow> = matrix
        .entities()
        .iter()
        .map(|entity| {
            let months = matrix.series(entity, MONTHS_PER_YEAR);
            ComparativeRow {
                entity: entity.clone(),
                label: budgets.label_for(entity).to_string(),
                total: months.iter().copied().sum(),
                trend: TrendClassifier::classify(&months),
                monthly_budget: budgets.budget_for(entity),
                months,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
