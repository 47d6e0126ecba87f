//! Persisted view filters.
//!
//! Mode, year, month and the pinned entity selection are one
//! [`ViewPreferences`] value, read when a screen opens and written on every
//! change through an injected [`PreferencesStore`] keyed by user.

mod error;
mod store;
mod types;

pub use error::PreferencesError;
pub use store::{InMemoryPreferencesStore, PreferencesStore, load_or_default};
pub use types::ViewPreferences;
