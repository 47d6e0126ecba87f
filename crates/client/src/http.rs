//! `reqwest` implementation of [`CostApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::api::CostApi;
use costlens_core::config_edit::{ResponsiblePartyPatch, SupplierConfig, SupplierConfigBulk};
use costlens_core::drilldown::{DetailRecord, DrillContext, DrillTarget};
use costlens_core::summary::{
    DailySummary, MonthlySummary, ResponsibleParty, SupplierMonthlySummary, SupplierSummary,
};
use costlens_shared::config::ApiConfig;
use costlens_shared::{AppError, AppResult};

/// HTTP client for the cost backend.
#[derive(Debug, Clone)]
pub struct CostClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl CostClient {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url(&config.base_url)?,
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Internal(format!("invalid endpoint path {path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let request = self
            .client
            .request(method, self.url(path)?)
            .header("Accept", "application/json");
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T> {
        debug!(path, ?query, "GET");
        let response = send(self.request(Method::GET, path)?.query(query)).await?;
        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| {
            error!(path, error = %e, "failed to decode response");
            AppError::from(e)
        })
    }

    async fn send_json<B: Serialize + Sync>(&self, method: Method, path: &str, body: &B) -> AppResult<()> {
        debug!(%method, path, "sending edit");
        send(self.request(method, path)?.json(body)).await?;
        Ok(())
    }
}

/// Parses the base URL, making sure relative joins keep its last segment.
fn base_url(raw: &str) -> AppResult<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|e| AppError::Validation(format!("invalid api.base_url {raw}: {e}")))
}

async fn send(request: RequestBuilder) -> AppResult<Response> {
    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(status = status.as_u16(), body = %body, "backend request failed");
    Err(AppError::from_status(status.as_u16(), body))
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::ExternalService(format!("request failed: {err}"))
}

fn period_query(year: i32, month: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![("ano", year.to_string())];
    if let Some(month) = month {
        query.push(("mes", month.to_string()));
    }
    query
}

/// Endpoint and entity parameter of a drill-down target.
fn detail_endpoint(target: DrillTarget) -> (&'static str, &'static str) {
    match target {
        DrillTarget::Sector => ("detalhes-setor/", "setor"),
        DrillTarget::Supplier => ("detalhes-fornecedor/", "fornecedor"),
    }
}

#[async_trait]
impl CostApi for CostClient {
    async fn monthly_summary(&self, year: i32) -> AppResult<MonthlySummary> {
        self.get_json("resumo-mensal/", &period_query(year, None)).await
    }

    async fn daily_summary(&self, year: i32, month: u32) -> AppResult<DailySummary> {
        self.get_json("resumo-diario/", &period_query(year, Some(month))).await
    }

    async fn supplier_summary(&self, year: i32) -> AppResult<SupplierSummary> {
        self.get_json("resumo-fornecedores/", &period_query(year, None)).await
    }

    async fn supplier_monthly_summary(&self, year: i32, month: u32) -> AppResult<SupplierMonthlySummary> {
        self.get_json("resumo-fornecedores-mensal/", &period_query(year, Some(month)))
            .await
    }

    async fn responsible_parties(&self) -> AppResult<Vec<ResponsibleParty>> {
        self.get_json("responsaveis/", &[]).await
    }

    async fn supplier_configs(&self) -> AppResult<Vec<SupplierConfig>> {
        self.get_json("fornecedores-unicos/", &[]).await
    }

    async fn details(&self, entity: &str, context: DrillContext) -> AppResult<Vec<DetailRecord>> {
        let (path, param) = detail_endpoint(context.target);
        let mut query = period_query(context.year, context.month);
        query.push((param, entity.to_string()));
        self.get_json(path, &query).await
    }

    async fn patch_responsible_party(&self, id: i64, patch: &ResponsiblePartyPatch) -> AppResult<()> {
        self.send_json(Method::PATCH, &format!("responsaveis/{id}/"), patch)
            .await
    }

    async fn save_supplier_configs(&self, bulk: &SupplierConfigBulk) -> AppResult<()> {
        self.send_json(Method::POST, "fornecedor-config-bulk/", bulk).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(base_url: &str, token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            token: token.map(str::to_string),
            timeout_secs: 5,
        }
    }

    #[rstest]
    #[case("http://127.0.0.1:8000/api/")]
    #[case("http://127.0.0.1:8000/api")]
    #[case("  http://127.0.0.1:8000/api/ ")]
    fn test_endpoints_join_under_api_prefix(#[case] base: &str) {
        let client = CostClient::new(&config(base, None)).unwrap();

        assert_eq!(
            client.url("resumo-mensal/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/resumo-mensal/"
        );
        assert_eq!(
            client.url("responsaveis/12/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/responsaveis/12/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CostClient::new(&config("not a url", None)).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let client = CostClient::new(&config("http://localhost/api/", Some("  "))).unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn test_period_query() {
        assert_eq!(period_query(2024, None), vec![("ano", "2024".to_string())]);
        assert_eq!(
            period_query(2024, Some(3)),
            vec![("ano", "2024".to_string()), ("mes", "3".to_string())]
        );
    }

    #[rstest]
    #[case(DrillTarget::Sector, "detalhes-setor/", "setor")]
    #[case(DrillTarget::Supplier, "detalhes-fornecedor/", "fornecedor")]
    fn test_detail_endpoint(#[case] target: DrillTarget, #[case] path: &str, #[case] param: &str) {
        assert_eq!(detail_endpoint(target), (path, param));
    }
}
