//! Global config file source: ~/.config/flashgen/config.toml or $XDG_CONFIG_HOME/flashgen/config.toml

use crate::config::paths::global_config_path;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use tracing::debug;

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(builder);
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global configuration file");
        return Ok(builder);
    }
    let path = path.canonicalize().unwrap_or(path);
    Ok(builder.add_source(File::from(path).required(false)))
}
