//! Settings loading facade.

use super::merge::merge_policy;
use super::sources::global_file;
use super::KafkactxConfig;
use config::ConfigError;
use std::path::Path;
use tracing::debug;

/// Loads [`KafkactxConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global settings file (if present), then environment.
    pub fn load() -> Result<KafkactxConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let config = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize::<KafkactxConfig>()?;
        debug!("Settings loaded from defaults, global file and environment");
        Ok(config)
    }

    /// Defaults, then `path` in place of the global file, then environment.
    pub fn load_from_file(path: &Path) -> Result<KafkactxConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_file(builder, path, true)?;
        let config = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize::<KafkactxConfig>()?;
        debug!(config_path = %path.display(), "Settings loaded from explicit file");
        Ok(config)
    }

    /// Load from `path` when given, otherwise the default chain.
    pub fn load_optional(path: Option<&Path>) -> Result<KafkactxConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    pub fn global_config_path() -> Option<std::path::PathBuf> {
        global_file::global_config_path()
    }
}
