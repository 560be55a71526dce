//! Model Provider Abstraction
//!
//! Text-generation clients for the hosted and local LLM providers flashgen can
//! talk to (OpenAI, Anthropic, Ollama, Gemini, custom OpenAI-compatible servers).
//! Every client reduces to the same narrow contract: one prompt in, raw text out.
//! The text is untrusted; validation happens in `generation`.

use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub mod profile;

pub use profile::{provider_type_slug, ProviderConfig, ProviderType};

/// Model provider with resolved credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelProvider {
    OpenAI {
        model: String,
        api_key: String,
        base_url: Option<String>, // For custom endpoints (e.g., Azure OpenAI)
    },
    Anthropic {
        model: String,
        api_key: String,
    },
    Ollama {
        model: String,
        base_url: Option<String>, // Default: http://localhost:11434
    },
    Gemini {
        model: String,
        api_key: String,
        base_url: Option<String>, // Default: https://generativelanguage.googleapis.com
    },
    LocalCustom {
        model: String,
        endpoint: String, // Full endpoint URL (e.g., http://localhost:8080/v1)
        api_key: Option<String>,
    },
}

/// Completion options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub temperature: Option<f32>, // 0.0-2.0, default: 1.0
    pub max_tokens: Option<u32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: Some(1.0),
            max_tokens: Some(4096),
        }
    }
}

/// The text-generation collaborator: `complete(prompt) -> raw text`.
///
/// Fallible and non-deterministic. Implementations must not retry.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for Box<T> {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        (**self).complete(prompt).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn map_http_error(error: reqwest::Error) -> ProviderError {
    if let Some(status) = error.status() {
        map_status(status, error.to_string())
    } else if error.is_timeout() {
        ProviderError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ProviderError::RequestFailed(format!("Connection error: {}", error))
    } else {
        ProviderError::Other(format!("HTTP error: {}", error))
    }
}

fn map_status(status: StatusCode, body: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthFailed(format!("Authentication failed: {}", body)),
        429 => ProviderError::RateLimit(format!("Rate limit exceeded: {}", body)),
        404 => ProviderError::ModelNotFound(format!("Model not found: {}", body)),
        _ => ProviderError::RequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(map_status(status, error_text))
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_provider_http_client() -> Result<Client, ProviderError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::Other(format!("Failed to create HTTP client: {}", e)))
}

/// Shared body of the OpenAI-compatible providers (OpenAI, Ollama, custom).
async fn openai_compatible_complete(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    model: &str,
    options: &CompletionOptions,
    prompt: &str,
) -> Result<String, ProviderError> {
    let request = ChatCompletionRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        stream: false,
    };

    let mut builder = client
        .post(url)
        .header("Content-Type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let response = builder
        .json(&request)
        .send()
        .await
        .map_err(map_http_error)?;
    let response = ensure_success(response).await?;

    let completion: ChatCompletionResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::Other(format!("Failed to parse response: {}", e)))?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::Other("No choices in response".to_string()))
}

/// OpenAI provider client
pub struct OpenAIClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
    options: CompletionOptions,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        options: CompletionOptions,
    ) -> Result<Self, ProviderError> {
        let client = build_provider_http_client()?;
        let base_url = base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
            options,
        })
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        openai_compatible_complete(
            &self.client,
            &url,
            Some(&self.api_key),
            &self.model,
            &self.options,
            prompt,
        )
        .await
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Anthropic provider client (messages API)
pub struct AnthropicClient {
    client: Client,
    model: String,
    api_key: String,
    options: CompletionOptions,
}

impl AnthropicClient {
    pub fn new(
        model: String,
        api_key: String,
        options: CompletionOptions,
    ) -> Result<Self, ProviderError> {
        let client = build_provider_http_client()?;
        Ok(Self {
            client,
            model,
            api_key,
            options,
        })
    }
}

#[async_trait]
impl CompletionService for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = "https://api.anthropic.com/v1/messages";

        let mut request_body = json!({
            "model": self.model,
            "max_tokens": self.options.max_tokens.unwrap_or(1024),
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temp) = self.options.temperature {
            // Anthropic caps temperature at 1.0
            request_body["temperature"] = json!(temp.min(1.0));
        }

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(map_http_error)?;
        let response = ensure_success(response).await?;

        #[derive(Deserialize)]
        struct AnthropicResponse {
            content: Vec<AnthropicContent>,
        }

        #[derive(Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: String,
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("Failed to parse response: {}", e)))?;

        let text: String = completion.content.into_iter().map(|c| c.text).collect();
        if text.is_empty() {
            return Err(ProviderError::Other("Empty content in response".to_string()));
        }
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Ollama provider client (local models)
pub struct OllamaClient {
    client: Client,
    model: String,
    base_url: String,
    options: CompletionOptions,
}

impl OllamaClient {
    pub fn new(
        model: String,
        base_url: Option<String>,
        options: CompletionOptions,
    ) -> Result<Self, ProviderError> {
        let base_url = base_url.unwrap_or_else(|| "http://localhost:11434".to_string());
        let client = build_provider_http_client()?;

        Ok(Self {
            client,
            model,
            base_url,
            options,
        })
    }
}

#[async_trait]
impl CompletionService for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        // Ollama serves the OpenAI-compatible API under /v1
        let url = format!("{}/v1/chat/completions", self.base_url);
        openai_compatible_complete(&self.client, &url, None, &self.model, &self.options, prompt)
            .await
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Google Gemini provider client (`generateContent`)
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
    options: CompletionOptions,
}

impl GeminiClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        options: CompletionOptions,
    ) -> Result<Self, ProviderError> {
        let client = build_provider_http_client()?;
        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
            options,
        })
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut generation_config = json!({});
        if let Some(temp) = self.options.temperature {
            generation_config["temperature"] = json!(temp);
        }
        if let Some(max_tokens) = self.options.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        let request_body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": generation_config,
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(map_http_error)?;
        let response = ensure_success(response).await?;

        #[derive(Deserialize)]
        struct GeminiResponse {
            #[serde(default)]
            candidates: Vec<GeminiCandidate>,
        }

        #[derive(Deserialize)]
        struct GeminiCandidate {
            content: Option<GeminiContent>,
        }

        #[derive(Deserialize)]
        struct GeminiContent {
            #[serde(default)]
            parts: Vec<GeminiPart>,
        }

        #[derive(Deserialize)]
        struct GeminiPart {
            #[serde(default)]
            text: String,
        }

        let completion: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("Failed to parse response: {}", e)))?;

        completion
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect::<String>())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ProviderError::Other("No candidates in response".to_string()))
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Custom local provider client (OpenAI-compatible API)
pub struct CustomLocalClient {
    client: Client,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    options: CompletionOptions,
}

impl CustomLocalClient {
    pub fn new(
        model: String,
        endpoint: String,
        api_key: Option<String>,
        options: CompletionOptions,
    ) -> Result<Self, ProviderError> {
        let client = build_provider_http_client()?;
        Ok(Self {
            client,
            model,
            endpoint,
            api_key,
            options,
        })
    }
}

#[async_trait]
impl CompletionService for CustomLocalClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        openai_compatible_complete(
            &self.client,
            &url,
            self.api_key.as_deref(),
            &self.model,
            &self.options,
            prompt,
        )
        .await
    }

    fn provider_name(&self) -> &str {
        "local"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        provider: &ModelProvider,
        options: CompletionOptions,
    ) -> Result<Box<dyn CompletionService>, ProviderError> {
        match provider {
            ModelProvider::OpenAI {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(OpenAIClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                options,
            )?)),
            ModelProvider::Anthropic { model, api_key } => Ok(Box::new(AnthropicClient::new(
                model.clone(),
                api_key.clone(),
                options,
            )?)),
            ModelProvider::Ollama { model, base_url } => Ok(Box::new(OllamaClient::new(
                model.clone(),
                base_url.clone(),
                options,
            )?)),
            ModelProvider::Gemini {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(GeminiClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                options,
            )?)),
            ModelProvider::LocalCustom {
                model,
                endpoint,
                api_key,
            } => Ok(Box::new(CustomLocalClient::new(
                model.clone(),
                endpoint.clone(),
                api_key.clone(),
                options,
            )?)),
        }
    }

    /// Build a client straight from a `[provider]` config section.
    pub fn from_config(config: &ProviderConfig) -> Result<Box<dyn CompletionService>, ProviderError> {
        let provider = config.to_model_provider()?;
        Self::create_client(&provider, config.default_options.clone())
    }
}

// Mock completion service for testing
#[cfg(test)]
pub struct MockCompletion {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, String>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockCompletion {
    /// Each entry answers one call: `Ok(text)` is returned verbatim, `Err(msg)`
    /// becomes a request failure. Calls past the script fail.
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(ProviderError::RequestFailed(message)),
            None => Err(ProviderError::Other("mock script exhausted".to_string())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
