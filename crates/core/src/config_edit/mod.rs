//! Bulk-edit sessions for configuration screens.
//!
//! An [`EditSession`] holds the saved rows, a draft per row, a search filter
//! and a row selection. Dirty detection compares each draft against its saved
//! row; saving turns the dirty drafts into request payloads that the client
//! forwards unchanged.

pub mod payload;
pub mod rows;
pub mod session;

pub use payload::{ResponsiblePartyPatch, SupplierConfigBulk, SupplierConfigPatch};
pub use rows::{EditableRow, PartyDraft, SupplierConfig, SupplierDraft};
pub use session::EditSession;
