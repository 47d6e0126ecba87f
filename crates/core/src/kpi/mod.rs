//! KPI derivation over a normalized matrix.
//!
//! [`KpiCalculator::calculate`] is a pure function of the matrix, the budget
//! map, the view mode and the reference month. Every ratio is guarded: an
//! empty denominator yields zero, never an error.

pub mod budget;
pub mod calculator;
pub mod types;


pub use budget::{BudgetMap, resolve_entity_key};
pub use calculator::KpiCalculator;
pub(crate) use calculator::percent;
pub use types::{KpiBundle, NO_ENTITY, Projection, TopEntity};
