//! Configuration for the registry-export server.
//!
//! Settings come from three layers: built-in defaults, an optional YAML file
//! (`registry-export.config.yml`), and CLI flags / environment variables.
//! Later layers win.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::outbound::network::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_PAGE_SIZE, DEFAULT_RETRY_BACKOFF,
    DEFAULT_TIMEOUT,
};
use crate::cli::Args;
use crate::export_generation::policies::{RateLimitSettings, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
use crate::shared::error::ExportError;
use crate::shared::Result;

const CONFIG_FILENAME: &str = "registry-export.config.yml";

/// Largest page the advanced search endpoint accepts
const MAX_PAGE_SIZE: usize = 5000;

/// Config file schema. Every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
    pub max_results: Option<usize>,
    pub rate_limit_requests: Option<u32>,
    pub rate_limit_window_secs: Option<u64>,
    pub retry_backoff_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub base_url: String,
    pub page_size: usize,
    pub max_results: usize,
    pub rate_limit: RateLimitSettings,
    pub retry_backoff: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Loads the config file (explicit `--config` or discovered in
    /// `working_dir`) and merges it with `args`
    pub fn load(args: &Args, working_dir: &Path) -> Result<Self> {
        let file = match &args.config {
            Some(path) => Some(load_config_from_path(path)?),
            None => discover_config(working_dir)?,
        };
        Self::resolve(args, file.unwrap_or_default())
    }

    /// Merges CLI/env values over file values over defaults, then validates
    pub fn resolve(args: &Args, file: ConfigFile) -> Result<Self> {
        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ExportError::InvalidConfiguration {
                reason: "no registry API key configured".to_string(),
                hint: "Set COMPANIES_HOUSE_API_KEY (environment or .env file) or pass --api-key"
                    .to_string(),
            })?
            .to_string();

        let config = AppConfig {
            api_key,
            host: args.host.clone(),
            port: args.port,
            debug: args.debug,
            base_url: args
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            page_size: file.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_results: args
                .max_results
                .or(file.max_results)
                .unwrap_or(DEFAULT_MAX_RESULTS),
            rate_limit: RateLimitSettings {
                max_requests: file.rate_limit_requests.unwrap_or(DEFAULT_MAX_REQUESTS),
                window: file
                    .rate_limit_window_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_WINDOW),
            },
            retry_backoff: file
                .retry_backoff_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_RETRY_BACKOFF),
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        };

        config.validate()?;
        Ok(config)
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(invalid(
                format!("page_size must be between 1 and {}", MAX_PAGE_SIZE),
                "Adjust page_size in the config file",
            ));
        }
        if self.max_results == 0 {
            return Err(invalid(
                "max_results must be at least 1",
                "Adjust --max-results, MAX_RESULTS, or max_results in the config file",
            ));
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window.is_zero() {
            return Err(invalid(
                "rate limit requests and window must both be non-zero",
                "Adjust rate_limit_requests / rate_limit_window_secs in the config file",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(invalid(
                "request_timeout_secs must be non-zero",
                "Adjust request_timeout_secs in the config file",
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(invalid(
                format!("base URL '{}' is not an http(s) URL", self.base_url),
                "Use a URL such as https://api.company-information.service.gov.uk",
            ));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>, hint: &str) -> anyhow::Error {
    ExportError::InvalidConfiguration {
        reason: reason.into(),
        hint: hint.to_string(),
    }
    .into()
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        invalid(
            format!("failed to read config file {}: {}", path.display(), e),
            "Check that the file exists and is readable.",
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).map_err(|e| {
        invalid(
            format!("failed to parse config file {}: {}", path.display(), e),
            "Ensure the file contains valid YAML syntax.",
        )
    })?;

    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::info!(path = %config_path.display(), "Using config file");
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}
