//! Well-known locations: the global config file and the default data directory.

use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "flashgen";

/// Path to the global config file.
///
/// `$XDG_CONFIG_HOME/flashgen/config.toml` when set, otherwise
/// `~/.config/flashgen/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join(APP_NAME).join("config.toml"));
    }
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join("config.toml")
    })
}

/// Platform data directory, or `.flashgen` in the working directory when
/// no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".flashgen"))
}
