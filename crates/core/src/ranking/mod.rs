//! Top-N ranking and user-pinned entity selections.

pub mod engine;
pub mod selection;


pub use engine::{DEFAULT_TOP_N, RankingEngine};
pub use selection::{EntitySelection, MAX_SELECTION, SelectionChange};
