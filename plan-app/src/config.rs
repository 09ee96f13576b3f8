//! Application configuration read from a TOML file.
//!
//! ```toml
//! [storage]
//! backend = "sqlite"
//! path = "business-plan.db"
//!
//! [logging]
//! level = "info"
//! stdout = true
//! file = "business-plan.log"
//!
//! [notifications]
//! workforce_sync_interval_ms = 3000
//! ```
//!
//! Every table and field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use plan_core::DbConfig;
use plan_core::PlanSettings;
use plan_core::plan::DEFAULT_WORKFORCE_SYNC_INTERVAL;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `"sqlite"` or `"memory"`.
    pub backend: String,
    /// Database file for `sqlite`; ignored by `memory`.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            path: "business-plan.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full filter directive. `RUST_LOG` wins when unset.
    pub level: Option<String>,
    pub stdout: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            stdout: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub workforce_sync_interval_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            workforce_sync_interval_ms: DEFAULT_WORKFORCE_SYNC_INTERVAL.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file is an error; call sites that treat the
    /// file as optional check for it first.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.storage.backend.clone(),
            connection_string: self.storage.path.clone(),
        }
    }

    pub fn plan_settings(&self) -> PlanSettings {
        PlanSettings {
            workforce_sync_interval: Duration::from_millis(self.notifications.workforce_sync_interval_ms),
        }
    }
}
