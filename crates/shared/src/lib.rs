//! Shared types, errors, and configuration for Costlens.
//!
//! This crate provides common types used across all other crates:
//! - Compact and full money formatting with decimal precision
//! - The view mode shared by configuration and the calculation core
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
