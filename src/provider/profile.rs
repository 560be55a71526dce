//! Provider profile: the configured provider type, model and credentials.

use crate::error::ProviderError;
use crate::provider::{CompletionOptions, ModelProvider};
use serde::{Deserialize, Serialize};

/// Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Ollama,
    Gemini,
    #[serde(rename = "local")]
    LocalCustom,
}

impl ProviderType {
    /// Environment variable consulted for the API key when none is configured.
    pub fn default_api_key_env(self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::Gemini => Some("GEMINI_API_KEY"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    fn requires_api_key(self) -> bool {
        matches!(
            self,
            ProviderType::OpenAI | ProviderType::Anthropic | ProviderType::Gemini
        )
    }
}

pub fn provider_type_slug(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::OpenAI => "openai",
        ProviderType::Anthropic => "anthropic",
        ProviderType::Ollama => "ollama",
        ProviderType::Gemini => "gemini",
        ProviderType::LocalCustom => "local",
    }
}

/// Provider configuration as it appears under `[provider]` in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub model: String,

    /// Inline API key. Prefer `api_key_env` for anything checked in.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Name of the environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Base URL override (required for `local`)
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub default_options: CompletionOptions,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::Gemini,
            model: "gemini-1.5-pro".to_string(),
            api_key: None,
            api_key_env: None,
            endpoint: None,
            default_options: CompletionOptions::default(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if self.provider_type == ProviderType::LocalCustom && self.endpoint.is_none() {
            return Err("Local provider requires an endpoint".to_string());
        }
        if let Some(temperature) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }
        Ok(())
    }

    /// Resolve the API key: inline value first, then the configured or default env var.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let env_name = self
            .api_key_env
            .as_deref()
            .or_else(|| self.provider_type.default_api_key_env())?;
        std::env::var(env_name).ok().filter(|k| !k.is_empty())
    }

    /// Convert to a concrete `ModelProvider`, failing when credentials are missing.
    pub fn to_model_provider(&self) -> Result<ModelProvider, ProviderError> {
        let api_key = self.resolve_api_key();
        if self.provider_type.requires_api_key() && api_key.is_none() {
            let hint = self
                .api_key_env
                .as_deref()
                .or_else(|| self.provider_type.default_api_key_env())
                .unwrap_or("api_key");
            return Err(ProviderError::NotConfigured(format!(
                "{} requires an API key (set {} or provider.api_key)",
                provider_type_slug(self.provider_type),
                hint
            )));
        }

        let model = self.model.clone();
        Ok(match self.provider_type {
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: self.endpoint.clone(),
            },
            ProviderType::Anthropic => ModelProvider::Anthropic {
                model,
                api_key: api_key.unwrap_or_default(),
            },
            ProviderType::Ollama => ModelProvider::Ollama {
                model,
                base_url: self.endpoint.clone(),
            },
            ProviderType::Gemini => ModelProvider::Gemini {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: self.endpoint.clone(),
            },
            ProviderType::LocalCustom => ModelProvider::LocalCustom {
                model,
                endpoint: self.endpoint.clone().ok_or_else(|| {
                    ProviderError::NotConfigured("local provider requires an endpoint".to_string())
                })?,
                api_key,
            },
        })
    }
}
