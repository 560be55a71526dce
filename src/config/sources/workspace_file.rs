//! Workspace config file source: config/config.toml and config/{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Selects the environment-specific file, e.g. `config/test.toml`.
pub const ENV_VAR: &str = "FLASHGEN_ENV";

/// Add workspace config files to builder.
/// Precedence: config/config.toml (base) then config/{FLASHGEN_ENV}.toml.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = workspace_root.join("config");
    let env_name = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());

    let base = config_dir.join("config.toml");
    if base.exists() {
        builder = builder.add_source(File::from(base).required(false));
    }

    let env_specific = config_dir.join(format!("{}.toml", env_name));
    if env_specific.exists() {
        builder = builder.add_source(File::from(env_specific).required(false));
    }

    Ok(builder)
}
