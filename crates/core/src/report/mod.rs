//! Chart series, tables and screen view-models.
//!
//! Builders in this module read a [`NormalizedMatrix`](crate::aggregate::NormalizedMatrix)
//! snapshot and return plain serializable values; the presentation layer
//! only renders them.

pub mod comparative;
pub mod distribution;
pub mod series;
pub mod view;

pub use comparative::{ComparativeRow, comparative_table};
pub use distribution::{
    CONCENTRATION_TOP, DISTRIBUTION_LIMIT, DistributionSlice, concentration_percent, distribution,
};
pub use series::{ChartPoint, PacePoint, SeriesValue, daily_pace, monthly_series};
pub use view::{
    AnnualView, DailyView, DashboardBuilder, DashboardView, EntityShare, MonthlyView, ScreenState,
    SupplierView,
};
