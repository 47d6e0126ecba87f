//! Drill-down types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dimension whose details are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillTarget {
    /// Cost-center (`detalhes-setor`).
    Sector,
    /// Supplier (`detalhes-fornecedor`).
    Supplier,
}

/// Period scope of a drill-down request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrillContext {
    /// Dimension being drilled.
    pub target: DrillTarget,
    /// Year in view.
    pub year: i32,
    /// Month in view; `None` for whole-year views.
    pub month: Option<u32>,
}

impl DrillContext {
    /// Year-wide context.
    #[must_use]
    pub fn year(target: DrillTarget, year: i32) -> Self {
        Self {
            target,
            year,
            month: None,
        }
    }

    /// Single-month context.
    #[must_use]
    pub fn month(target: DrillTarget, year: i32, month: u32) -> Self {
        Self {
            target,
            year,
            month: Some(month),
        }
    }
}

/// One line of transaction-level detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Posting date, when the backend reports individual transactions.
    #[serde(alias = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Ledger account description.
    #[serde(alias = "descricao_conta", alias = "descricao", default)]
    pub account_description: String,
    /// Cost-center of the transaction.
    #[serde(alias = "centro_custo", default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Free-text detail.
    #[serde(alias = "detalhe", default, skip_serializing_if = "Option::is_none")]
    pub detail_text: Option<String>,
    /// Amount, or grouped total.
    #[serde(alias = "valor", alias = "total")]
    pub amount: Decimal,
    /// Transactions folded into this line, for grouped details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Observable drill-down state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrillState {
    /// Entity whose details are shown or loading.
    pub selected_entity: Option<String>,
    /// Details of the selected entity.
    pub details: Vec<DetailRecord>,
    /// A fetch for the selected entity is in flight.
    pub loading: bool,
}

impl DrillState {
    /// Sum of the detail amounts.
    #[must_use]
    pub fn details_total(&self) -> Decimal {
        self.details.iter().map(|d| d.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grouped_detail_from_json() {
        let json = r#"{"descricao": "Material de escritório", "total": "1520.40", "count": 7}"#;
        let record: DetailRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.account_description, "Material de escritório");
        assert_eq!(record.amount, dec!(1520.40));
        assert_eq!(record.count, Some(7));
        assert!(record.date.is_none());
    }

    #[test]
    fn test_transaction_detail_from_json() {
        let json = r#"{
            "data": "2024-03-15",
            "descricao_conta": "Serviços de TI",
            "centro_custo": "CC-100",
            "detalhe": "Licenças",
            "valor": 830.5
        }"#;
        let record: DetailRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(record.cost_center.as_deref(), Some("CC-100"));
        assert_eq!(record.detail_text.as_deref(), Some("Licenças"));
        assert_eq!(record.amount, dec!(830.5));
    }
}
