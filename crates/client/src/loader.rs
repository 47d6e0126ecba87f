//! Screen data loading.
//!
//! A screen needs an aggregate and, for cost-center views, the budget
//! listing. Both are requested concurrently; a failed request is logged and
//! replaced by empty data so the screen always gets built.

use std::sync::Arc;

use tracing::{debug, error};

use crate::api::CostApi;
use costlens_core::calendar::YearMonth;
use costlens_core::kpi::BudgetMap;
use costlens_core::ranking::EntitySelection;
use costlens_core::report::{DashboardBuilder, DashboardView};
use costlens_core::summary::{DailySummary, MonthlySummary, SupplierMonthlySummary, SupplierSummary};
use costlens_shared::AppResult;
use costlens_shared::types::ViewMode;

/// Fetched inputs of one screen.
///
/// Kept between rebuilds so that pinning an entity re-derives the view
/// without another round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenData {
    /// Year summary and budgets.
    Annual {
        /// Year summary.
        summary: MonthlySummary,
        /// Budgets by entity.
        budgets: BudgetMap,
    },
    /// Year summary and budgets, shown for one month.
    Monthly {
        /// Year summary.
        summary: MonthlySummary,
        /// Budgets by entity.
        budgets: BudgetMap,
    },
    /// Daily summary and budgets.
    Daily {
        /// Month summary by day.
        summary: DailySummary,
        /// Budgets by entity.
        budgets: BudgetMap,
    },
    /// Year supplier summary.
    SuppliersYear(SupplierSummary),
    /// Month supplier summary.
    SuppliersMonth(SupplierMonthlySummary),
}

impl ScreenData {
    /// Derives the view-model.
    #[must_use]
    pub fn build(
        &self,
        builder: &DashboardBuilder,
        selection: Option<&EntitySelection>,
        period: YearMonth,
    ) -> DashboardView {
        match self {
            Self::Annual { summary, budgets } => {
                DashboardView::Annual(builder.annual(summary, budgets, selection, period))
            }
            Self::Monthly { summary, budgets } => {
                DashboardView::Monthly(builder.monthly(summary, budgets, period))
            }
            Self::Daily { summary, budgets } => {
                DashboardView::Daily(builder.daily(summary, budgets, period))
            }
            Self::SuppliersYear(summary) => {
                DashboardView::Suppliers(builder.suppliers_year(summary, selection, period))
            }
            Self::SuppliersMonth(summary) => {
                DashboardView::Suppliers(builder.suppliers_month(summary, selection, period))
            }
        }
    }
}

/// Fetches screen inputs from the backend.
#[derive(Clone)]
pub struct DashboardLoader {
    api: Arc<dyn CostApi>,
}

impl DashboardLoader {
    /// Creates a loader over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn CostApi>) -> Self {
        Self { api }
    }

    /// Fetches everything the screen for `mode` and `period` needs.
    pub async fn fetch(&self, mode: ViewMode, period: YearMonth, supplier_monthly: bool) -> ScreenData {
        let year = period.year();
        debug!(%mode, %period, supplier_monthly, "loading screen data");

        match mode {
            ViewMode::Annual | ViewMode::Monthly => {
                let (summary, budgets) = tokio::join!(self.api.monthly_summary(year), self.budgets());
                let summary = or_empty(summary, "monthly summary");
                if mode == ViewMode::Annual {
                    ScreenData::Annual { summary, budgets }
                } else {
                    ScreenData::Monthly { summary, budgets }
                }
            }
            ViewMode::Daily => {
                let (summary, budgets) =
                    tokio::join!(self.api.daily_summary(year, period.month()), self.budgets());
                ScreenData::Daily {
                    summary: or_empty(summary, "daily summary"),
                    budgets,
                }
            }
            ViewMode::Suppliers if supplier_monthly => ScreenData::SuppliersMonth(or_empty(
                self.api.supplier_monthly_summary(year, period.month()).await,
                "supplier monthly summary",
            )),
            ViewMode::Suppliers => {
                ScreenData::SuppliersYear(or_empty(self.api.supplier_summary(year).await, "supplier summary"))
            }
        }
    }

    async fn budgets(&self) -> BudgetMap {
        let parties = or_empty(self.api.responsible_parties().await, "responsible parties");
        BudgetMap::from_parties(&parties)
    }
}

/// Logs a failed fetch and substitutes empty data.
fn or_empty<T: Default>(result: AppResult<T>, what: &str) -> T {
    result.unwrap_or_else(|err| {
        error!(what, code = err.error_code(), error = %err, "fetch failed, showing empty data");
        T::default()
    })
}
