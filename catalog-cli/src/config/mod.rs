//! Configuration loading
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. TOML file (`<config_dir>/catalog-cli/config.toml` or `--config`)
//! 3. Environment (`CATALOG_API_URL`, `CATALOG_API_TOKEN`), `.env` included
//! 4. Command-line flags, applied by the command handlers

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ConcurrencyConfig, DEFAULT_DELETE_PATH, ResilienceConfig, TimeoutConfig};
use crate::sheet::{DEFAULT_COLUMN, DecodeOptions, RowPolicy};

pub const ENV_API_URL: &str = "CATALOG_API_URL";
pub const ENV_API_TOKEN: &str = "CATALOG_API_TOKEN";

const CONFIG_DIR_NAME: &str = "catalog-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub bulk_delete: BulkDeleteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the catalog admin app, e.g. `https://admin.example.com`
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub delete_path: String,
    pub connect_timeout_ms: Option<u64>,
    pub max_concurrent_requests: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            delete_path: DEFAULT_DELETE_PATH.to_string(),
            connect_timeout_ms: None,
            max_concurrent_requests: ConcurrencyConfig::default().max_concurrent_requests,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulkDeleteConfig {
    pub column: String,
    pub invalid_rows: RowPolicy,
    pub max_in_flight: usize,
    pub request_timeout_ms: Option<u64>,
}

impl Default for BulkDeleteConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            invalid_rows: RowPolicy::default(),
            max_in_flight: 1,
            request_timeout_ms: None,
        }
    }
}

impl Config {
    /// `<config_dir>/catalog-cli/config.toml`, if a config dir exists on this platform
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load file + environment.
    ///
    /// An explicit `path` must exist. The default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Override file values with non-empty environment values
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = Some(url.trim().to_string());
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.token = Some(token.trim().to_string());
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::default()
            .with_column(self.bulk_delete.column.clone())
            .with_row_policy(self.bulk_delete.invalid_rows)
    }

    pub fn resilience(&self) -> ResilienceConfig {
        ResilienceConfig {
            concurrency: ConcurrencyConfig {
                max_in_flight: self.bulk_delete.max_in_flight.max(1),
                max_concurrent_requests: self.api.max_concurrent_requests,
            },
            timeout: TimeoutConfig {
                request_timeout: self.bulk_delete.request_timeout_ms.map(Duration::from_millis),
                connect_timeout: self.api.connect_timeout_ms.map(Duration::from_millis),
            },
        }
    }
}
