//! Costlens report
//!
//! Fetches one dashboard screen from the cost backend and prints its
//! view-model as JSON on stdout.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use costlens_client::{CostClient, JsonFilePreferencesStore, Screen};
use costlens_core::calendar::YearMonth;
use costlens_core::kpi::KpiBundle;
use costlens_core::report::{DashboardBuilder, DashboardView};
use costlens_shared::AppConfig;
use costlens_shared::types::{MoneyFormat, ViewMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costlens=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let api = Arc::new(CostClient::new(&config.api)?);
    let store = Arc::new(JsonFilePreferencesStore::new(&config.preferences.path));
    let builder = DashboardBuilder::new(config.dashboard.top_n());
    let today = YearMonth::current();

    let mut screen = Screen::open(api, store, config.preferences.user_key.clone(), builder, today).await;
    info!(base_url = %config.api.base_url, user_key = %config.preferences.user_key, "screen opened");

    let stored = screen.preferences().clone();
    let stored_period = screen.period();
    let mode = config.report.mode.unwrap_or(stored.mode);
    let period = YearMonth::new(
        config.report.year.unwrap_or(stored_period.year()),
        config.report.month.unwrap_or(stored_period.month()),
    )?;

    // a month given for the supplier screen means the month-scoped summary
    let supplier_monthly =
        stored.supplier_monthly || (mode == ViewMode::Suppliers && config.report.month.is_some());

    let state = if mode == stored.mode && period == stored_period && supplier_monthly == stored.supplier_monthly {
        screen.refresh().await
    } else {
        screen.apply_filters(mode, period, supplier_monthly).await
    };

    let view = state.ready().context("screen finished without a view")?;
    let kpis = kpis(view);
    let money = MoneyFormat::new(config.dashboard.currency_symbol.clone());
    info!(
        %mode,
        %period,
        total = %money.compact(kpis.total_for_range),
        budget = %money.compact(kpis.budget_for_range),
        consumed_percent = %kpis.budget_consumed_percent,
        top = %kpis.top_entity.name,
        "report ready"
    );

    println!("{}", serde_json::to_string_pretty(view)?);

    Ok(())
}

fn kpis(view: &DashboardView) -> &KpiBundle {
    match view {
        DashboardView::Annual(view) => &view.kpis,
        DashboardView::Monthly(view) => &view.kpis,
        DashboardView::Daily(view) => &view.kpis,
        DashboardView::Suppliers(view) => &view.kpis,
    }
}
