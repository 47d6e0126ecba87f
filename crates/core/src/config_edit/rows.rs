//! Editable configuration rows.

use std::fmt::Debug;
use std::hash::Hash;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::summary::ResponsibleParty;

/// A saved row that can be edited through a draft.
pub trait EditableRow {
    /// Stable row identifier.
    type Key: Clone + Eq + Hash + Debug;
    /// Editable fields of the row.
    type Draft: Clone + PartialEq + Debug;

    /// Identifier of the row.
    fn key(&self) -> Self::Key;

    /// Draft holding the saved values.
    fn initial_draft(&self) -> Self::Draft;

    /// Returns true if `draft` differs from the saved values.
    fn differs(&self, draft: &Self::Draft) -> bool;

    /// Returns true if the row matches a lowercase search needle.
    fn matches(&self, needle: &str) -> bool;
}

/// Display names compare equal when both are blank or both hold the same text.
fn display_name_text(name: Option<&str>) -> &str {
    name.unwrap_or("")
}

/// Editable fields of a responsible party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyDraft {
    /// Monthly budget.
    pub monthly_budget: Decimal,
    /// Display alias; empty means none.
    pub display_name: String,
}

impl EditableRow for ResponsibleParty {
    type Key = i64;
    type Draft = PartyDraft;

    fn key(&self) -> i64 {
        self.id
    }

    fn initial_draft(&self) -> PartyDraft {
        PartyDraft {
            monthly_budget: self.monthly_budget,
            display_name: display_name_text(self.display_name.as_deref()).to_string(),
        }
    }

    fn differs(&self, draft: &PartyDraft) -> bool {
        display_name_text(self.display_name.as_deref()) != draft.display_name
            || self.monthly_budget != draft.monthly_budget
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .display_name
                .as_deref()
                .is_some_and(|alias| alias.to_lowercase().contains(needle))
    }
}

/// Display configuration of a supplier: `GET fornecedores-unicos/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierConfig {
    /// Supplier name as imported.
    #[serde(alias = "nome_original")]
    pub original_name: String,
    /// Alias shown instead of the imported name.
    #[serde(alias = "nome_exibicao", default)]
    pub display_name: Option<String>,
    /// Whether the supplier appears in analyses.
    #[serde(alias = "exibir", default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

/// Editable fields of a supplier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierDraft {
    /// Display alias; empty means none.
    pub display_name: String,
    /// Visibility.
    pub visible: bool,
}

impl EditableRow for SupplierConfig {
    type Key = String;
    type Draft = SupplierDraft;

    fn key(&self) -> String {
        self.original_name.clone()
    }

    fn initial_draft(&self) -> SupplierDraft {
        SupplierDraft {
            display_name: display_name_text(self.display_name.as_deref()).to_string(),
            visible: self.visible,
        }
    }

    fn differs(&self, draft: &SupplierDraft) -> bool {
        display_name_text(self.display_name.as_deref()) != draft.display_name
            || self.visible != draft.visible
    }

    fn matches(&self, needle: &str) -> bool {
        self.original_name.to_lowercase().contains(needle)
            || self
                .display_name
                .as_deref()
                .is_some_and(|alias| alias.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_alias_equals_absent() {
        let party = ResponsibleParty {
            id: 7,
            name: "TI".into(),
            display_name: None,
            monthly_budget: dec!(100),
        };
        let draft = party.initial_draft();

        assert_eq!(draft.display_name, "");
        assert!(!party.differs(&draft));
    }

    #[test]
    fn test_budget_compared_as_decimal() {
        let party = ResponsibleParty {
            id: 7,
            name: "TI".into(),
            display_name: None,
            monthly_budget: dec!(100.00),
        };
        let draft = PartyDraft {
            monthly_budget: dec!(100),
            display_name: String::new(),
        };

        assert!(!party.differs(&draft));
    }

    #[test]
    fn test_supplier_config_from_json() {
        let json = r#"[
            {"nome_original": "ACME LTDA", "nome_exibicao": "Acme", "exibir": false},
            {"nome_original": "BETA SA"}
        ]"#;
        let configs: Vec<SupplierConfig> = serde_json::from_str(json).unwrap();

        assert_eq!(configs[0].display_name.as_deref(), Some("Acme"));
        assert!(!configs[0].visible);
        assert!(configs[1].visible);
        assert!(configs[1].matches("beta"));
    }
}
