//! Common types used across the application.

pub mod money;
pub mod view;

pub use money::MoneyFormat;
pub use view::ViewMode;
