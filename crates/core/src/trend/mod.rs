//! Short-term trend of an entity's spending.

mod classifier;

pub use classifier::{Trend, TrendClassifier};
