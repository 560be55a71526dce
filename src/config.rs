//! Configuration System
//!
//! Layered configuration: built-in defaults, the user's global config file,
//! workspace config files, then `FLASHGEN__SECTION__KEY` environment variables.
//! Sections: `[provider]`, `[generation]`, `[storage]`, `[logging]`.

use crate::error::{FlashgenError, ProviderError};
use crate::generation::{DEFAULT_CARD_COUNT, MAX_CARD_COUNT, MIN_CARD_COUNT};
use crate::logging::LoggingConfig;
use crate::provider::{CompletionOptions, CompletionService, ProviderFactory};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::{default_data_dir, global_config_path};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashgenConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Cards requested when the caller gives no count
    #[serde(default = "default_count")]
    pub default_count: u32,

    /// Deadline for one generation call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature; overrides the provider's default options when set
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_count() -> u32 {
    DEFAULT_CARD_COUNT
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&self.default_count) {
            return Err(format!(
                "default_count must be between {} and {}, got {}",
                MIN_CARD_COUNT, MAX_CARD_COUNT, self.default_count
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }
        Ok(())
    }
}

/// Storage paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory holding the set database and the session file.
    /// Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_data_dir(&self, workspace_root: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => workspace_root.join(dir),
            None => default_data_dir(),
        }
    }

    pub fn database_path(data_dir: &Path) -> PathBuf {
        data_dir.join("sets.db")
    }
}

/// A configuration problem, attributed to its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    Provider(String),
    Generation(String),
    Logging(String),
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::Provider(msg) => write!(f, "provider: {}", msg),
            ConfigIssue::Generation(msg) => write!(f, "generation: {}", msg),
            ConfigIssue::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl FlashgenConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ConfigIssue>> {
        let mut issues = Vec::new();

        if let Err(e) = self.provider.validate() {
            issues.push(ConfigIssue::Provider(e));
        }
        if let Err(e) = self.generation.validate() {
            issues.push(ConfigIssue::Generation(e));
        }
        if let Err(e) = self.logging.validate() {
            issues.push(ConfigIssue::Logging(e));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Completion options after applying `[generation]` overrides.
    pub fn completion_options(&self) -> CompletionOptions {
        let mut options = self.provider.default_options.clone();
        if let Some(temperature) = self.generation.temperature {
            options.temperature = Some(temperature);
        }
        options
    }

    pub fn completion_client(&self) -> Result<Box<dyn CompletionService>, ProviderError> {
        let provider = self.provider.to_model_provider()?;
        ProviderFactory::create_client(&provider, self.completion_options())
    }

    /// Validate and fold every problem into one error.
    pub fn ensure_valid(&self) -> Result<(), FlashgenError> {
        self.validate().map_err(|issues| {
            let msgs: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
            FlashgenError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }
}
