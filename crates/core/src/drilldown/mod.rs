//! Transaction-level drill-down.
//!
//! Selecting an entity in a chart or table fetches the transactions behind
//! its aggregate. The [`DrillCoordinator`] owns the resulting [`DrillState`]
//! and tags every fetch with a generation number; a response is applied only
//! if no newer selection (or filter change) happened while it was in flight.
//! The coordinator performs no I/O itself.

pub mod coordinator;
pub mod search;
pub mod types;

pub use coordinator::{DrillCommand, DrillCoordinator, DrillRequest, Resolution};
pub use search::{DetailSearch, search_details};
pub use types::{DetailRecord, DrillContext, DrillState, DrillTarget};
