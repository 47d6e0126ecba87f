//! Screen view-models.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::comparative::{ComparativeRow, comparative_table};
use super::distribution::{CONCENTRATION_TOP, DistributionSlice, concentration_percent, distribution};
use super::series::{ChartPoint, PacePoint, daily_pace, monthly_series};
use crate::aggregate::{NormalizedMatrix, Normalizer};
use crate::calendar::YearMonth;
use crate::kpi::{BudgetMap, KpiBundle, KpiCalculator, percent};
use crate::ranking::{DEFAULT_TOP_N, EntitySelection, RankingEngine};
use crate::summary::{DailySummary, EntityTotal, MonthlySummary, SupplierMonthlySummary, SupplierSummary};
use costlens_shared::types::ViewMode;

/// A screen whose inputs may still be loading.
///
/// KPIs that depend on budgets are only built once every input has arrived;
/// there is no partially computed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "view", rename_all = "lowercase")]
pub enum ScreenState<T> {
    /// Waiting for the aggregate or budget fetch.
    Loading,
    /// All inputs arrived.
    Ready(T),
}

impl<T> ScreenState<T> {
    /// Returns true while loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The view, once ready.
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Loading => None,
            Self::Ready(view) => Some(view),
        }
    }
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// An entity's spend within a single month or day range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityShare {
    /// Entity name as aggregated.
    pub entity: String,
    /// Display label.
    pub label: String,
    /// Entity total in range.
    pub total: Decimal,
    /// Share of the range total, in percent.
    pub share_percent: Decimal,
    /// Configured monthly budget; 0 when none.
    pub monthly_budget: Decimal,
    /// Total against budget; 0 when no budget is set.
    pub budget_percent: Decimal,
}

/// Twelve-month view of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualView {
    /// Year in view.
    pub year: i32,
    /// Indicators.
    pub kpis: KpiBundle,
    /// Charted entities, in color order.
    pub ranked: Vec<String>,
    /// Monthly line chart.
    pub chart: Vec<ChartPoint>,
    /// Month-by-month table.
    pub comparative: Vec<ComparativeRow>,
    /// Share of the year by entity.
    pub distribution: Vec<DistributionSlice>,
}

/// One month out of a yearly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyView {
    /// Month in view.
    pub period: YearMonth,
    /// Indicators.
    pub kpis: KpiBundle,
    /// Entities of the month, largest first.
    pub breakdown: Vec<EntityShare>,
}

/// Days of one month with pace against budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyView {
    /// Month in view.
    pub period: YearMonth,
    /// Indicators, including the projection.
    pub kpis: KpiBundle,
    /// Summed monthly budget of the month's entities.
    pub monthly_budget: Decimal,
    /// Cumulative spend against accrued budget.
    pub pace: Vec<PacePoint>,
    /// Entities of the month, largest first.
    pub breakdown: Vec<EntityShare>,
}

/// Supplier breakdown of a year or a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierView {
    /// Year in view.
    pub year: i32,
    /// Month in view, for monthly supplier summaries.
    pub month: Option<u32>,
    /// Indicators over all suppliers.
    pub kpis: KpiBundle,
    /// Charted suppliers, in color order.
    pub ranked: Vec<String>,
    /// Monthly evolution of the leading suppliers; empty for a single month.
    pub chart: Vec<ChartPoint>,
    /// Share by supplier.
    pub distribution: Vec<DistributionSlice>,
    /// Share held by the ten largest suppliers, in percent.
    pub top_concentration_percent: Decimal,
    /// Leading cost-centers of each leading supplier.
    pub sectors_by_supplier: HashMap<String, Vec<EntityTotal>>,
}

/// Any dashboard screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DashboardView {
    /// [`AnnualView`].
    Annual(AnnualView),
    /// [`MonthlyView`].
    Monthly(MonthlyView),
    /// [`DailyView`].
    Daily(DailyView),
    /// [`SupplierView`].
    Suppliers(SupplierView),
}

/// Builds screen view-models from fetched summaries.
#[derive(Debug, Clone, Copy)]
pub struct DashboardBuilder {
    top_n: usize,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl DashboardBuilder {
    /// Creates a builder charting `top_n` entities when nothing is pinned.
    #[must_use]
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Annual cost-center view.
    ///
    /// `current` is the reference month for month-over-month variance.
    #[must_use]
    pub fn annual(
        &self,
        summary: &MonthlySummary,
        budgets: &BudgetMap,
        selection: Option<&EntitySelection>,
        current: YearMonth,
    ) -> AnnualView {
        let matrix = Normalizer::normalize(&summary.per_month, &summary.per_entity_month);
        let ranked = RankingEngine::rank(&matrix, selection, self.top_n);
        debug!(year = current.year(), ranked = ranked.len(), "building annual view");

        AnnualView {
            year: current.year(),
            kpis: KpiCalculator::calculate(&matrix, budgets, ViewMode::Annual, current),
            chart: monthly_series(&matrix, &ranked),
            comparative: comparative_table(&matrix, budgets),
            distribution: distribution(&matrix),
            ranked,
        }
    }

    /// One month of a yearly summary.
    #[must_use]
    pub fn monthly(&self, summary: &MonthlySummary, budgets: &BudgetMap, current: YearMonth) -> MonthlyView {
        let matrix = Normalizer::normalize(&summary.per_month, &summary.per_entity_month);
        let month_total = matrix.period_total(current.month());

        MonthlyView {
            period: current,
            kpis: KpiCalculator::calculate(&matrix, budgets, ViewMode::Monthly, current),
            breakdown: shares(matrix.period_entity_totals(current.month()), month_total, budgets),
        }
    }

    /// Daily view of one month.
    #[must_use]
    pub fn daily(&self, summary: &DailySummary, budgets: &BudgetMap, current: YearMonth) -> DailyView {
        let matrix = Normalizer::normalize_daily(
            &summary.per_day,
            &summary.per_entity,
            &summary.totals.days_with_data,
        );
        let monthly_budget = KpiCalculator::budget_for_range(&matrix, budgets, ViewMode::Daily);

        DailyView {
            period: current,
            kpis: KpiCalculator::calculate(&matrix, budgets, ViewMode::Daily, current),
            pace: daily_pace(&matrix, current, monthly_budget),
            breakdown: shares(matrix.entity_totals(), matrix.grand_total(), budgets),
            monthly_budget,
        }
    }

    /// Supplier view of a year.
    #[must_use]
    pub fn suppliers_year(
        &self,
        summary: &SupplierSummary,
        selection: Option<&EntitySelection>,
        current: YearMonth,
    ) -> SupplierView {
        let listing = Normalizer::single_period(current.month(), summary.total_year, &summary.per_supplier);
        let order: Vec<String> = summary.per_supplier.iter().map(|s| s.entity.clone()).collect();
        let evolution = Normalizer::from_entity_series(&summary.monthly_evolution, &order);
        let ranked = RankingEngine::rank(&evolution, selection, self.top_n);

        let mut view = self.supplier_view(&listing, current, None);
        view.chart = monthly_series(&evolution, &ranked);
        view.ranked = ranked;
        view.sectors_by_supplier.clone_from(&summary.per_sector);
        view
    }

    /// Supplier view of one month.
    #[must_use]
    pub fn suppliers_month(
        &self,
        summary: &SupplierMonthlySummary,
        selection: Option<&EntitySelection>,
        current: YearMonth,
    ) -> SupplierView {
        let listing = Normalizer::single_period(current.month(), summary.total_month, &summary.per_supplier);
        let mut view = self.supplier_view(&listing, current, Some(current.month()));
        view.ranked = RankingEngine::rank(&listing, selection, self.top_n);
        view
    }

    fn supplier_view(&self, listing: &NormalizedMatrix, current: YearMonth, month: Option<u32>) -> SupplierView {
        debug!(
            year = current.year(),
            suppliers = listing.entities().len(),
            "building supplier view"
        );
        SupplierView {
            year: current.year(),
            month,
            kpis: KpiCalculator::calculate(listing, &BudgetMap::new(), ViewMode::Suppliers, current),
            ranked: Vec::new(),
            chart: Vec::new(),
            distribution: distribution(listing),
            top_concentration_percent: concentration_percent(listing, CONCENTRATION_TOP),
            sectors_by_supplier: HashMap::new(),
        }
    }
}

fn shares(totals: Vec<(String, Decimal)>, range_total: Decimal, budgets: &BudgetMap) -> Vec<EntityShare> {
    let mut rows: Vec<EntityShare> = totals
        .into_iter()
        .map(|(entity, total)| {
            let monthly_budget = budgets.budget_for(&entity);
            EntityShare {
                label: budgets.label_for(&entity).to_string(),
                share_percent: percent(total, range_total).round_dp(2),
                budget_percent: percent(total, monthly_budget).round_dp(2),
                monthly_budget,
                entity,
                total,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
