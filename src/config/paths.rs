//! XDG locations for kafkactx settings and the contexts file.

use std::path::PathBuf;

pub const APP_DIR: &str = "kafkactx";
pub const SETTINGS_FILE: &str = "config.toml";
pub const STORE_FILE: &str = "contexts.toml";

/// `$XDG_CONFIG_HOME` when set to an absolute path, otherwise the platform config dir
/// (`~/.config` on Linux).
pub fn config_home() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let xdg = PathBuf::from(xdg);
        if xdg.is_absolute() {
            return Some(xdg);
        }
    }
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn app_dir() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR))
}

pub fn global_config_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(SETTINGS_FILE))
}

pub fn default_store_path() -> Option<PathBuf> {
    app_dir().map(|dir| dir.join(STORE_FILE))
}
