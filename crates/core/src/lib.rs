//! Core aggregation logic for Costlens.
//!
//! This crate turns pre-aggregated cost summaries into the derived view-model
//! consumed by the dashboard screens. It has ZERO HTTP dependencies: every
//! function here is a pure computation or an in-memory state machine.
//!
//! # Modules
//!
//! - `summary` - Wire shapes of the cost backend
//! - `aggregate` - Period x entity normalization
//! - `ranking` - Top-N ranking and pinned entity selections
//! - `kpi` - Totals, budgets, projections and variance
//! - `trend` - Two-point trend classification
//! - `drilldown` - Transaction-level detail selection and staleness handling
//! - `calendar` - Year/month navigation
//! - `report` - Chart series, comparative tables and screen view-models
//! - `config_edit` - Bulk-edit sessions for configuration screens
//! - `preferences` - Persisted view filters and the storage port

pub mod aggregate;
pub mod calendar;
pub mod config_edit;
pub mod drilldown;
pub mod kpi;
pub mod preferences;
pub mod ranking;
pub mod report;
pub mod summary;
pub mod trend;

pub use costlens_shared::types::ViewMode;
