//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix for environment overrides, e.g. `FLASHGEN__GENERATION__TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "FLASHGEN";

/// Create a Config builder with merge policy defaults applied.
///
/// Defaults are set per key so a file that names only `provider.model`
/// still deserializes.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.provider_type", "gemini")?
        .set_default("provider.model", "gemini-1.5-pro")?
        .set_default("generation.default_count", 5)?
        .set_default("generation.timeout_secs", 60)
}

/// Environment variables override every file layer.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
