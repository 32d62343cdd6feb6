//! Global settings file source: $XDG_CONFIG_HOME/kafkactx/config.toml or ~/.config/kafkactx/config.toml

use crate::config::paths;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to global settings file.
pub fn global_config_path() -> Option<PathBuf> {
    paths::global_config_path()
}

/// Add the global settings file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) if path.exists() => add_file(builder, &path, false),
        Some(path) => {
            debug!(
                config_path = %path.display(),
                "No kafkactx settings file found, using defaults"
            );
            Ok(builder)
        }
        None => Ok(builder),
    }
}

/// Add an explicit settings file. `required` files must exist.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let name = canonical
        .to_str()
        .ok_or_else(|| ConfigError::Message(format!("non UTF-8 path: {}", path.display())))?
        .to_string();
    debug!(config_path = %name, "Adding settings file");
    Ok(builder.add_source(File::new(&name, FileFormat::Toml).required(required)))
}
