//! Port to the cost backend.

use async_trait::async_trait;

use costlens_core::config_edit::{ResponsiblePartyPatch, SupplierConfig, SupplierConfigBulk};
use costlens_core::drilldown::{DetailRecord, DrillContext};
use costlens_core::summary::{
    DailySummary, MonthlySummary, ResponsibleParty, SupplierMonthlySummary, SupplierSummary,
};
use costlens_shared::AppResult;

/// Requests the dashboards make against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CostApi: Send + Sync {
    /// `GET resumo-mensal/?ano=Y`.
    async fn monthly_summary(&self, year: i32) -> AppResult<MonthlySummary>;

    /// `GET resumo-diario/?ano=Y&mes=M`.
    async fn daily_summary(&self, year: i32, month: u32) -> AppResult<DailySummary>;

    /// `GET resumo-fornecedores/?ano=Y`.
    async fn supplier_summary(&self, year: i32) -> AppResult<SupplierSummary>;

    /// `GET resumo-fornecedores-mensal/?ano=Y&mes=M`.
    async fn supplier_monthly_summary(&self, year: i32, month: u32) -> AppResult<SupplierMonthlySummary>;

    /// `GET responsaveis/`.
    async fn responsible_parties(&self) -> AppResult<Vec<ResponsibleParty>>;

    /// `GET fornecedores-unicos/`.
    async fn supplier_configs(&self) -> AppResult<Vec<SupplierConfig>>;

    /// `GET detalhes-setor/` or `GET detalhes-fornecedor/`, scoped by `context`.
    async fn details(&self, entity: &str, context: DrillContext) -> AppResult<Vec<DetailRecord>>;

    /// `PATCH responsaveis/{id}/`.
    async fn patch_responsible_party(&self, id: i64, patch: &ResponsiblePartyPatch) -> AppResult<()>;

    /// `POST fornecedor-config-bulk/`.
    async fn save_supplier_configs(&self, bulk: &SupplierConfigBulk) -> AppResult<()>;
}
