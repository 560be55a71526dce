//! Loader facade: assembles the layered sources into a `FlashgenConfig`.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::FlashgenConfig;
use crate::error::FlashgenError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full layer stack.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{FLASHGEN_ENV}.toml`,
    /// `FLASHGEN__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<FlashgenConfig, FlashgenError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(merge_policy::environment());

        let config: FlashgenConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            provider = ?config.provider.provider_type,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from a single explicit file, still honoring
    /// defaults and environment overrides.
    pub fn load_from_file(path: &Path) -> Result<FlashgenConfig, FlashgenError> {
        if !path.exists() {
            return Err(FlashgenError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config: FlashgenConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Load from the workspace, or from `explicit` when given.
    pub fn resolve(workspace_root: &Path, explicit: Option<&Path>) -> Result<FlashgenConfig, FlashgenError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }
}
