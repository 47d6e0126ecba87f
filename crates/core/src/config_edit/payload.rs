//! Save payloads, serialized with the backend's field names.

use rust_decimal::Decimal;
use serde::Serialize;

/// Body of `PATCH responsaveis/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiblePartyPatch {
    /// New monthly budget.
    #[serde(rename = "orcamento_mensal")]
    pub monthly_budget: Decimal,
    /// New display alias; `None` clears it.
    #[serde(rename = "nome_exibicao")]
    pub display_name: Option<String>,
}

/// One supplier entry of a bulk save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierConfigPatch {
    /// Supplier name as imported.
    #[serde(rename = "nome_original")]
    pub original_name: String,
    /// New display alias; `None` clears it.
    #[serde(rename = "nome_exibicao")]
    pub display_name: Option<String>,
    /// New visibility.
    #[serde(rename = "exibir")]
    pub visible: bool,
}

/// Body of `POST fornecedor-config-bulk/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupplierConfigBulk {
    /// Changed suppliers.
    pub configs: Vec<SupplierConfigPatch>,
}

impl SupplierConfigBulk {
    /// Returns true when there is nothing to save.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Maps an edited display name to its wire value: blank becomes `None`.
pub(crate) fn display_name_value(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_patch_wire_names() {
        let patch = ResponsiblePartyPatch {
            monthly_budget: dec!(1500.50),
            display_name: None,
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"orcamento_mensal": "1500.50", "nome_exibicao": null})
        );
    }

    #[test]
    fn test_blank_display_name_is_cleared() {
        assert_eq!(display_name_value("  "), None);
        assert_eq!(display_name_value(" Acme "), Some("Acme".to_string()));
    }
}
