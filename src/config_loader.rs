use anyhow::{anyhow, Result};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::constants::{DEFAULT_RECV_WINDOW_MS, SETTLEMENT_ASSET};
use crate::domain::enums::Environment;

/// Environment variable naming a config file when `--config` is not given
pub const CONFIG_PATH_ENV: &str = "TRADING_BOT_CONFIG";

/// Top-level configuration structure containing all config sections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exchange connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Overrides the environment's REST URL
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_settlement_asset")]
    pub settlement_asset: String,

    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            settlement_asset: default_settlement_asset(),
            recv_window_ms: default_recv_window_ms(),
        }
    }
}

fn default_settlement_asset() -> String {
    SETTLEMENT_ASSET.to_string()
}

fn default_recv_window_ms() -> u64 {
    DEFAULT_RECV_WINDOW_MS
}

/// Log sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    /// Append-only log file; an empty path disables file logging
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,

    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_log_file(),
            console: default_console(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("trading_bot.log"))
}

fn default_console() -> bool {
    true
}

impl LoggingConfig {
    pub fn log_file(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| anyhow!("Invalid log level '{}'", self.level))
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        info!("Loaded configuration from {}", path.display());
        debug!("Exchange config: {:?}", config.exchange);

        Ok(config)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(config_str)?;
        config.logging.level_filter()?;

        // Symbols are upper-cased before the suffix check
        let asset = config.exchange.settlement_asset.trim().to_uppercase();
        if asset.is_empty() {
            return Err(anyhow!("settlement_asset must not be empty"));
        }
        config.exchange.settlement_asset = asset;
        Ok(config)
    }

    /// Explicit path first, then `TRADING_BOT_CONFIG`, then built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(env_path) => Self::from_file(PathBuf::from(env_path)),
            None => Ok(Self::default()),
        }
    }

    /// Helper to get the REST URL, preferring the configured override
    pub fn base_url(&self, environment: Environment) -> String {
        self.exchange
            .base_url
            .clone()
            .unwrap_or_else(|| environment.rest_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.exchange.settlement_asset, "USDT");
        assert_eq!(config.exchange.recv_window_ms, 5000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, Some(PathBuf::from("trading_bot.log")));
        assert!(config.logging.console);
        assert_eq!(
            config.base_url(Environment::Testnet),
            "https://testnet.binancefuture.com"
        );
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            base_url = "http://127.0.0.1:9000"
            recv_window_ms = 10000

            [logging]
            level = "debug"
            file = "logs/bot.log"
            console = false
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url(Environment::Testnet), "http://127.0.0.1:9000");
        assert_eq!(config.exchange.recv_window_ms, 10000);
        assert_eq!(config.exchange.settlement_asset, "USDT");
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.logging.file, Some(PathBuf::from("logs/bot.log")));
        assert!(!config.logging.console);
    }

    #[test]
    fn test_settlement_asset_is_upper_cased() {
        let config = AppConfig::from_toml("[exchange]\nsettlement_asset = \" usdc\"").unwrap();
        assert_eq!(config.exchange.settlement_asset, "USDC");
    }

    #[test]
    fn test_empty_log_file_disables_file_sink() {
        let config = AppConfig::from_toml("[logging]\nfile = \"\"").unwrap();
        assert_eq!(config.logging.log_file(), None);
        assert_eq!(
            AppConfig::default().logging.log_file(),
            Some(Path::new("trading_bot.log"))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_toml("[logging]\nlevel = \"loud\"").is_err());
        assert!(AppConfig::from_toml("[exchange]\nsettlement_asset = \" \"").is_err());
        assert!(AppConfig::from_toml("[exchange]\nrecv_window_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::from_file("/nonexistent/bot.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bot.toml"));
    }
}
