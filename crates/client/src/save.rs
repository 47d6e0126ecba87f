//! Forwarding of configuration edits.
//!
//! Save errors are returned to the caller, unlike fetch errors: the user
//! must learn that an edit did not stick. Drafts are kept on failure and
//! replaced by a fresh listing on success.

use tracing::info;

use crate::api::CostApi;
use costlens_core::config_edit::{EditSession, SupplierConfig};
use costlens_core::summary::ResponsibleParty;
use costlens_shared::AppResult;

/// Sends one PATCH per edited party, in order, then reloads the listing.
///
/// Returns the number of parties saved. Stops at the first failure.
pub async fn save_party_edits(
    api: &dyn CostApi,
    session: &mut EditSession<ResponsibleParty>,
) -> AppResult<usize> {
    let patches = session.patches();
    if patches.is_empty() {
        return Ok(0);
    }

    for (id, patch) in &patches {
        api.patch_responsible_party(*id, patch).await?;
    }
    info!(saved = patches.len(), "responsible party edits saved");

    session.reload(api.responsible_parties().await?);
    Ok(patches.len())
}

/// Sends every edited supplier in one bulk request, then reloads the listing.
///
/// Returns the number of suppliers saved.
pub async fn save_supplier_edits(
    api: &dyn CostApi,
    session: &mut EditSession<SupplierConfig>,
) -> AppResult<usize> {
    let bulk = session.bulk_payload();
    if bulk.is_empty() {
        return Ok(0);
    }

    api.save_supplier_configs(&bulk).await?;
    info!(saved = bulk.configs.len(), "supplier configuration saved");

    session.reload(api.supplier_configs().await?);
    Ok(bulk.configs.len())
}
