//! Merge rules: defaults first, then the settings file, then `KAFKACTX__*` environment.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Environment prefix; nested keys use `__`, e.g. `KAFKACTX__NETWORK__PROBE_TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "KAFKACTX";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("network.probe_timeout_secs", 3)?
        .set_default("network.connect_timeout_secs", 10)?
        .set_default("network.client_id", "kafkactx")?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")?
        .set_default("logging.color", true)
}

/// Environment source applied last.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
