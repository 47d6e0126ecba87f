//! KPI value objects.

use rust_decimal::Decimal;
use serde::Serialize;

/// Name reported when there is no top entity.
pub const NO_ENTITY: &str = "—";

/// Entity with the largest total in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntity {
    /// Entity name, or [`NO_ENTITY`].
    pub name: String,
    /// Entity total.
    pub value: Decimal,
}

impl TopEntity {
    /// The "no data" sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self {
            name: NO_ENTITY.to_string(),
            value: Decimal::ZERO,
        }
    }

    /// Returns true for the sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.name == NO_ENTITY
    }
}

impl Default for TopEntity {
    fn default() -> Self {
        Self::none()
    }
}

/// Linear end-of-month projection of a daily view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Spend per elapsed day.
    pub run_rate: Decimal,
    /// Run-rate times the days of the month.
    pub projected_total: Decimal,
    /// Last day with recorded data; 1 when there is none.
    pub elapsed_units: u32,
    /// Days in the month.
    pub total_units: u32,
    /// Days left after the last recorded day.
    pub remaining_units: u32,
    /// Projected total against the month budget; 0 without a budget.
    pub projected_budget_percent: Decimal,
}

/// Derived indicators of one screen.
///
/// Recomputed on every input change; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KpiBundle {
    /// Spend over the range in view.
    pub total_for_range: Decimal,
    /// Total divided by the periods that have data; 0 when none do.
    pub average_per_period: Decimal,
    /// Summed monthly budgets scaled to the range.
    pub budget_for_range: Decimal,
    /// Total against budget; 0 when no budget is set.
    pub budget_consumed_percent: Decimal,
    /// Periods in range with a positive total.
    pub periods_with_data: usize,
    /// Present only for daily views.
    pub projection: Option<Projection>,
    /// Month-over-month change of the reference month; annual views only.
    pub variance_percent: Decimal,
    /// Largest entity in range.
    pub top_entity: TopEntity,
}
