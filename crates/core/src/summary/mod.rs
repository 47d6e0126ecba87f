//! Wire shapes returned by the cost backend.
//!
//! Field names on the wire are the backend's own (`por_mes`, `setor`, ...);
//! they are accepted as aliases so the Rust side keeps English names and
//! serializes with them.

pub mod types;

pub use types::{
    DailySummary, DailyTotals, EntityPeriodTotal, EntityTotal, MonthlySummary, MonthlyTotals,
    PeriodTotal, ResponsibleParty, SupplierMonthlySummary, SupplierSummary,
};
