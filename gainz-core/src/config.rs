//! Dashboard configuration loaded from TOML.
//!
//! Every field is optional in the file; anything missing falls back to the
//! built-in default. The quote cache TTL is fixed and has no setting here.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sectors::SectorCatalog;
use crate::watchlist::{Watchlist, DEFAULT_WATCHLIST};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default)]
    pub sectors: SectorCatalog,
}

fn default_period() -> String {
    "1d".into()
}

fn default_interval() -> String {
    "5m".into()
}

fn default_symbol() -> String {
    "AAPL".into()
}

fn default_watchlist() -> Vec<String> {
    DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            interval: default_interval(),
            default_symbol: default_symbol(),
            watchlist: default_watchlist(),
            log_level: default_log_level(),
            http_timeout_secs: default_http_timeout_secs(),
            sectors: SectorCatalog::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.period.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "period",
                reason: "must not be empty".into(),
            });
        }
        if self.interval.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "interval",
                reason: "must not be empty".into(),
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "http_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// The configured watchlist as a session watchlist (normalized, deduplicated).
    pub fn initial_watchlist(&self) -> Watchlist {
        Watchlist::from_symbols(&self.watchlist)
    }
}
