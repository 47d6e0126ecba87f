//! Period x entity normalization.
//!
//! Flat aggregate rows from the backend are folded into a
//! [`NormalizedMatrix`]: period -> { total, entity -> value }. Every derived
//! calculator reads the same matrix snapshot; a new fetch builds a new matrix.

pub mod matrix;
pub mod normalizer;


pub use matrix::{NormalizedMatrix, PeriodEntry, PeriodKey};
pub use normalizer::Normalizer;
