//! Client side of Costlens.
//!
//! This crate provides:
//! - The [`CostApi`] port and its `reqwest` implementation, [`CostClient`]
//! - Concurrent screen loaders that degrade failed fetches to empty data
//! - The async drill-down controller
//! - Forwarding of configuration edits
//! - A JSON-file preferences store
//! - [`Screen`], which ties filters, preferences and the above together

pub mod api;
pub mod drill;
pub mod http;
pub mod loader;
pub mod preferences_file;
pub mod save;
pub mod screen;

pub use api::CostApi;
pub use drill::DrillDownController;
pub use http::CostClient;
pub use loader::{DashboardLoader, ScreenData};
pub use preferences_file::JsonFilePreferencesStore;
pub use save::{save_party_edits, save_supplier_edits};
pub use screen::Screen;
