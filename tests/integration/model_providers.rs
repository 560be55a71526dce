//! Provider construction from configuration. No network access.

use flashgen::config::FlashgenConfig;
use flashgen::error::ProviderError;
use flashgen::provider::{CompletionService, ProviderConfig, ProviderFactory, ProviderType};

fn provider(provider_type: ProviderType, model: &str) -> ProviderConfig {
    ProviderConfig {
        provider_type,
        model: model.to_string(),
        ..ProviderConfig::default()
    }
}

#[test]
fn test_keyless_providers_build_clients() {
    let ollama = provider(ProviderType::Ollama, "llama3");
    let client = ProviderFactory::from_config(&ollama).unwrap();
    assert_eq!(client.provider_name(), "ollama");
    assert_eq!(client.model_name(), "llama3");

    let mut local = provider(ProviderType::LocalCustom, "tiny");
    local.endpoint = Some("http://localhost:8080/v1".to_string());
    let client = ProviderFactory::from_config(&local).unwrap();
    assert_eq!(client.model_name(), "tiny");
}

#[test]
fn test_inline_key_builds_hosted_clients() {
    for provider_type in [
        ProviderType::OpenAI,
        ProviderType::Anthropic,
        ProviderType::Gemini,
    ] {
        let mut config = provider(provider_type, "some-model");
        config.api_key = Some("test-key".to_string());
        let client = ProviderFactory::from_config(&config).unwrap();
        assert_eq!(client.model_name(), "some-model");
    }
}

#[test]
fn test_missing_key_is_not_configured() {
    let mut config = provider(ProviderType::OpenAI, "gpt-4o-mini");
    // A variable name nothing else sets
    config.api_key_env = Some("FLASHGEN_TEST_UNSET_OPENAI_KEY".to_string());
    let err = ProviderFactory::from_config(&config).err().unwrap();
    match err {
        ProviderError::NotConfigured(msg) => {
            assert!(msg.contains("FLASHGEN_TEST_UNSET_OPENAI_KEY"))
        }
        other => panic!("expected NotConfigured, got {other:?}"),
    }
}

#[test]
fn test_generation_temperature_reaches_client_options() {
    let mut config = FlashgenConfig::default();
    config.provider = provider(ProviderType::Ollama, "llama3");
    config.generation.temperature = Some(0.3);
    assert_eq!(config.completion_options().temperature, Some(0.3));
    assert!(config.completion_client().is_ok());
}
