//! # Dashboard Configuration
//!
//! JSON configuration file with per-field defaults, validated on load.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::query::QueryLimits;
use crate::service::DEFAULT_SCAN_LIMIT;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// JSON dataset of sales records (required)
    pub data_path: PathBuf,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub query: QueryLimits,

    /// Filter options cache TTL; 0 disables caching
    #[serde(default = "default_options_cache_ttl_secs")]
    pub options_cache_ttl_secs: u64,

    /// Largest record set the summary reduces in-process
    #[serde(default = "default_summary_scan_limit")]
    pub summary_scan_limit: usize,
}

fn default_options_cache_ttl_secs() -> u64 {
    60
}

fn default_summary_scan_limit() -> usize {
    DEFAULT_SCAN_LIMIT
}

impl DashboardConfig {
    /// Configuration with defaults for the given dataset
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            log_format: LogFormat::default(),
            http: HttpServerConfig::default(),
            query: QueryLimits::default(),
            options_cache_ttl_secs: default_options_cache_ttl_secs(),
            summary_scan_limit: default_summary_scan_limit(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: DashboardConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_path must not be empty".to_string()));
        }

        if self.query.default_page_size == 0 {
            return Err(ConfigError::Invalid("query.default_page_size must be > 0".to_string()));
        }

        if self.query.max_page_size < self.query.default_page_size {
            return Err(ConfigError::Invalid(format!(
                "query.max_page_size ({}) must be >= query.default_page_size ({})",
                self.query.max_page_size, self.query.default_page_size
            )));
        }

        if self.summary_scan_limit == 0 {
            return Err(ConfigError::Invalid("summary_scan_limit must be > 0".to_string()));
        }

        Ok(())
    }

    pub fn options_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.options_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::AgeSearchMode;
    use std::io::Write;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = DashboardConfig::from_json_str(r#"{"data_path": "./data/sales.json"}"#).unwrap();

        assert_eq!(config.data_path, PathBuf::from("./data/sales.json"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.query.default_page_size, 10);
        assert_eq!(config.query.max_page_size, 100);
        assert_eq!(config.query.age_search_mode, AgeSearchMode::Legacy);
        assert_eq!(config.options_cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.summary_scan_limit, DEFAULT_SCAN_LIMIT);
    }

    #[test]
    fn test_full_config() {
        let config = DashboardConfig::from_json_str(
            r#"{
                "data_path": "/srv/sales.json",
                "log_format": "json",
                "http": { "host": "127.0.0.1", "port": 8080, "cors_origins": [] },
                "query": { "default_page_size": 20, "max_page_size": 50, "age_search_mode": "conjunctive" },
                "options_cache_ttl_secs": 0,
                "summary_scan_limit": 500
            }"#,
        )
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.http.socket_addr(), "127.0.0.1:8080");
        assert_eq!(config.query.age_search_mode, AgeSearchMode::Conjunctive);
        assert!(config.options_cache_ttl().is_zero());
    }

    #[test]
    fn test_missing_data_path_is_rejected() {
        assert!(matches!(
            DashboardConfig::from_json_str("{}"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json_str(r#"{"data_path": ""}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_inconsistent_page_sizes_are_rejected() {
        let result = DashboardConfig::from_json_str(
            r#"{"data_path": "x.json", "query": {"default_page_size": 50, "max_page_size": 10}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = DashboardConfig::from_json_str(r#"{"data_path": "x.json", "summary_scan_limit": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_age_mode_is_rejected() {
        let result = DashboardConfig::from_json_str(
            r#"{"data_path": "x.json", "query": {"age_search_mode": "strict"}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"data_path": "sales.json", "http": {"port": 9000}}"#)
            .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 9000);

        let missing = DashboardConfig::load(Path::new("/nonexistent/salesdash.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
