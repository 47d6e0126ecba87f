//! Summary payload types.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total of one period (month or day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// Month (1-12) or day of month.
    #[serde(alias = "mes", alias = "dia")]
    pub period: u32,
    /// Period total.
    pub total: Decimal,
}

/// Total of one entity within one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPeriodTotal {
    /// Month (1-12) or day of month.
    #[serde(alias = "mes", alias = "dia")]
    pub period: u32,
    /// Cost-center or supplier name, exactly as the backend spells it.
    #[serde(alias = "setor", alias = "fornecedor")]
    pub entity: String,
    /// Entity total for the period.
    pub total: Decimal,
}

/// Total of one entity over the whole requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTotal {
    /// Cost-center or supplier name.
    #[serde(alias = "setor", alias = "fornecedor")]
    pub entity: String,
    /// Entity total.
    pub total: Decimal,
    /// Number of transactions, when reported.
    #[serde(alias = "transacoes", default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<u32>,
}

/// Year summary: `GET resumo-mensal/?ano=Y`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Total per month.
    #[serde(alias = "por_mes", default)]
    pub per_month: Vec<PeriodTotal>,
    /// Total per entity and month.
    #[serde(alias = "por_setor_mes", default)]
    pub per_entity_month: Vec<EntityPeriodTotal>,
    /// Year totals.
    #[serde(alias = "totais", default)]
    pub totals: MonthlyTotals,
}

/// Year totals block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Year the summary covers.
    #[serde(alias = "ano", default)]
    pub year: Option<i32>,
    /// Sum over the year.
    #[serde(alias = "total_ano", default)]
    pub total_year: Option<Decimal>,
    /// Months that have at least one transaction.
    #[serde(alias = "meses_com_dados", default)]
    pub months_with_data: Vec<u32>,
}

/// Month summary broken down by day: `GET resumo-diario/?ano=Y&mes=M`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Total per day.
    #[serde(alias = "por_dia", default)]
    pub per_day: Vec<PeriodTotal>,
    /// Total per entity over the month.
    #[serde(alias = "por_setor", default)]
    pub per_entity: Vec<EntityTotal>,
    /// Month totals.
    #[serde(alias = "totais", default)]
    pub totals: DailyTotals,
}

/// Month totals block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// Month the summary covers.
    #[serde(alias = "mes", default)]
    pub month: Option<u32>,
    /// Year the summary covers.
    #[serde(alias = "ano", default)]
    pub year: Option<i32>,
    /// Sum over the month.
    #[serde(alias = "total_mes", default)]
    pub total_month: Option<Decimal>,
    /// Days that have at least one transaction.
    #[serde(alias = "dias_com_dados", default)]
    pub days_with_data: Vec<u32>,
}

/// Supplier summary for a year: `GET resumo-fornecedores/?ano=Y`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSummary {
    /// Suppliers ordered by total, descending.
    #[serde(alias = "por_fornecedor", default)]
    pub per_supplier: Vec<EntityTotal>,
    /// Top cost-centers of each leading supplier.
    #[serde(alias = "por_setor", default)]
    pub per_sector: HashMap<String, Vec<EntityTotal>>,
    /// Month by month totals of the leading suppliers.
    #[serde(alias = "evolucao_mensal", default)]
    pub monthly_evolution: HashMap<String, BTreeMap<u32, Decimal>>,
    /// Sum over the year.
    #[serde(alias = "total_ano", default)]
    pub total_year: Decimal,
}

/// Supplier summary for one month: `GET resumo-fornecedores-mensal/?ano=Y&mes=M`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierMonthlySummary {
    /// Suppliers ordered by total, descending.
    #[serde(alias = "por_fornecedor", default)]
    pub per_supplier: Vec<EntityTotal>,
    /// Sum over the month.
    #[serde(alias = "total_mes", default)]
    pub total_month: Decimal,
}

/// A responsible party (cost-center) with its configured budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibleParty {
    /// Backend identifier.
    pub id: i64,
    /// Canonical name as imported from the spreadsheet.
    #[serde(alias = "nome")]
    pub name: String,
    /// Optional alias shown instead of the canonical name.
    #[serde(alias = "nome_exibicao", default)]
    pub display_name: Option<String>,
    /// Monthly spending ceiling.
    #[serde(alias = "orcamento_mensal", default)]
    pub monthly_budget: Decimal,
}
