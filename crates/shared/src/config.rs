//! Application configuration management.

use serde::Deserialize;

use crate::types::ViewMode;

/// Largest number of entities a chart may plot at once.
pub const MAX_CHART_ENTITIES: usize = 8;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Dashboard presentation configuration.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// View preference persistence configuration.
    #[serde(default)]
    pub preferences: PreferencesConfig,
    /// Filters for the headless report.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the cost backend, including the `/api/` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Dashboard presentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Default number of entities charted when no selection is pinned.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Currency symbol used by money formatting.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_top_n() -> usize {
    5
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DashboardConfig {
    /// Returns `top_n` clamped to `1..=MAX_CHART_ENTITIES`.
    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n.clamp(1, MAX_CHART_ENTITIES)
    }
}

/// View preference persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// Path of the JSON file holding preferences for every user key.
    #[serde(default = "default_preferences_path")]
    pub path: String,
    /// Identifier the preferences are stored under.
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

fn default_preferences_path() -> String {
    "costlens-preferences.json".to_string()
}

fn default_user_key() -> String {
    "default".to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
            user_key: default_user_key(),
        }
    }
}

/// Filters for the headless report. Unset fields fall back to stored preferences.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// View to render.
    #[serde(default)]
    pub mode: Option<ViewMode>,
    /// Year to report on.
    #[serde(default)]
    pub year: Option<i32>,
    /// Month to report on (1-12).
    #[serde(default)]
    pub month: Option<u32>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COSTLENS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
