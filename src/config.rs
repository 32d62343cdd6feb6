//! Configuration System
//!
//! Application settings for kafkactx (where the contexts file lives, network bounds, logging).
//! Layered with the `config` crate: defaults, global settings file, `KAFKACTX__*` environment.
//! These settings are separate from the contexts file itself, which belongs to the context domain.

use crate::error::CommandError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;

/// XDG path helpers
pub mod xdg {
    pub use super::paths::*;
}

/// Environment variable naming the contexts file.
pub const STORE_ENV: &str = "KAFKACTX_STORE";

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KafkactxConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub network: NetworkSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Contexts file; the XDG default is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Bound for schema registry / ksql reachability probes
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Bound for broker connects and each request
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_client_id")]
    pub client_id: String,
}

fn default_probe_timeout_secs() -> u64 {
    3
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_client_id() -> String {
    "kafkactx".to_string()
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            probe_timeout_secs: default_probe_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            client_id: default_client_id(),
        }
    }
}

impl NetworkSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.probe_timeout_secs == 0 {
            return Err("network.probe_timeout_secs must be greater than zero".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("network.connect_timeout_secs must be greater than zero".to_string());
        }
        if self.client_id.trim().is_empty() {
            return Err("network.client_id cannot be empty".to_string());
        }
        Ok(())
    }
}

impl KafkactxConfig {
    pub fn validate(&self) -> Result<(), CommandError> {
        self.network.validate().map_err(CommandError::Config)
    }

    /// Contexts file location: `explicit` (the `--store` flag), then `KAFKACTX_STORE`,
    /// then `store.path`, then the XDG default.
    pub fn resolve_store_path(&self, explicit: Option<&std::path::Path>) -> Result<PathBuf, CommandError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(STORE_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.store.path {
            return Ok(path.clone());
        }
        xdg::default_store_path().ok_or_else(|| {
            CommandError::Config(
                "cannot locate the contexts file: set XDG_CONFIG_HOME, HOME or --store".to_string(),
            )
        })
    }
}
