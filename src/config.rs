use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dir::app_user_data_file_path;
use crate::model::amount::AmountError;
use crate::model::balances::Balances;
use crate::service::mock::MockLatency;
use crate::ui::theme::ThemeMode;
use serde::Deserialize;

/// Prefix of every environment variable read into [Config].
pub const ENV_PREFIX: &str = "ZONE_";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Simulated latency of the UID lookup, in milliseconds
    #[serde(default = "default_lookup_delay_ms")]
    pub lookup_delay_ms: u64,
    /// Simulated latency of sending a verification code, in milliseconds
    #[serde(default = "default_send_code_delay_ms")]
    pub send_code_delay_ms: u64,
    /// Simulated latency of verifying a code, in milliseconds
    #[serde(default = "default_verify_delay_ms")]
    pub verify_delay_ms: u64,
    /// Simulated latency of a withdrawal, in milliseconds
    #[serde(default = "default_withdraw_delay_ms")]
    pub withdraw_delay_ms: u64,
    /// USDT balance shown by the wallet, as a decimal string
    #[serde(default = "default_usdt_balance")]
    pub usdt_balance: String,
    /// WBTC balance shown by the wallet, as a decimal string
    #[serde(default = "default_wbtc_balance")]
    pub wbtc_balance: String,
    /// Page opened by the "no UID yet" link of the binding wizard
    #[serde(default = "default_tutorial_url")]
    pub tutorial_url: String,
    #[serde(default)]
    pub theme: ThemeMode,
    /// Font with CJK glyphs. When unset, a few well-known system locations are tried.
    #[serde(default)]
    pub cjk_font_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    LoadError(String),
    #[error("Invalid balance in configuration: {0}")]
    InvalidBalance(#[from] AmountError),
}

fn default_lookup_delay_ms() -> u64 {
    1000
}

fn default_send_code_delay_ms() -> u64 {
    1000
}

fn default_verify_delay_ms() -> u64 {
    1500
}

fn default_withdraw_delay_ms() -> u64 {
    1000
}

fn default_usdt_balance() -> String {
    "50".to_string()
}

fn default_wbtc_balance() -> String {
    "0.01".to_string()
}

fn default_tutorial_url() -> String {
    "https://zone.example/tasks".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_delay_ms: default_lookup_delay_ms(),
            send_code_delay_ms: default_send_code_delay_ms(),
            verify_delay_ms: default_verify_delay_ms(),
            withdraw_delay_ms: default_withdraw_delay_ms(),
            usdt_balance: default_usdt_balance(),
            wbtc_balance: default_wbtc_balance(),
            tutorial_url: default_tutorial_url(),
            theme: ThemeMode::default(),
            cjk_font_path: None,
        }
    }
}

impl Config {
    /// Loads the configuration from the `.env` file in the application data
    /// directory and from `ZONE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let env_file_path =
            app_user_data_file_path(".env").map_err(|e| ConfigError::LoadError(e.to_string()))?;
        if let Err(err) = dotenvy::from_path_override(&env_file_path) {
            tracing::warn!(
                ?err,
                "Failed to load .env file. Continuing with environment variables."
            );
        } else {
            tracing::info!("Successfully loaded .env file");
        }

        let config = Self::from_vars(std::env::vars())?;
        tracing::info!(?config, "Configuration loaded successfully");
        Ok(config)
    }

    /// Builds the configuration from `(name, value)` pairs; names without the
    /// `ZONE_` prefix are ignored.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        // fail early instead of when the withdrawal form opens
        config.balances()?;
        Ok(config)
    }

    /// Reads only the given `.env` file, ignoring the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let vars = dotenvy::from_path_iter(path)
            .and_then(|iter| iter.collect::<Result<Vec<_>, _>>())
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        Self::from_vars(vars)
    }

    pub fn mock_latency(&self) -> MockLatency {
        MockLatency {
            lookup: Duration::from_millis(self.lookup_delay_ms),
            send_code: Duration::from_millis(self.send_code_delay_ms),
            verify: Duration::from_millis(self.verify_delay_ms),
            withdraw: Duration::from_millis(self.withdraw_delay_ms),
        }
    }

    pub fn balances(&self) -> Result<Balances, ConfigError> {
        Ok(Balances::parse(&self.usdt_balance, &self.wbtc_balance)?)
    }
}
