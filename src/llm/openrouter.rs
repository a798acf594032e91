//! OpenRouter API client implementation
//!
//! Implements the LlmClient trait against the OpenRouter chat-completions
//! API, which fronts the hosted models used for fallback answers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{Result, RoutrError};

use super::client::LlmClient;
use super::types::{CompletionRequest, CompletionResponse, Role, Usage};

/// OpenRouter chat completions endpoint
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model to use
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default max tokens
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Configuration for the OpenRouter client
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(120),
        }
    }
}

impl OpenRouterConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

/// OpenRouter API client
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    config: OpenRouterConfig,
    usage: Arc<Mutex<Usage>>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client
    ///
    /// Reads OPENROUTER_API_KEY from environment
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| RoutrError::Llm("OPENROUTER_API_KEY not set".to_string()))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RoutrError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
            usage: Arc::new(Mutex::new(Usage::default())),
        })
    }

    /// Build the request body for the chat completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = request.model.as_ref().unwrap_or(&self.config.model).clone();
        let max_tokens = request.max_tokens.unwrap_or(self.config.max_tokens);

        let mut messages: Vec<Value> = Vec::with_capacity(request.messages.len() + 1);

        // Chat completions carry the system prompt as the leading message
        if !request.system.is_empty() {
            messages.push(json!({ "role": "system", "content": request.system }));
        }

        for message in &request.messages {
            messages.push(json!({
                "role": match message.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                "content": message.content
            }));
        }

        json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": messages
        })
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: Value) -> Result<CompletionResponse> {
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| RoutrError::Llm("Response missing message content".to_string()))?
            .to_string();

        let usage = if let Some(u) = body.get("usage") {
            Usage::new(
                u["prompt_tokens"].as_u64().unwrap_or(0),
                u["completion_tokens"].as_u64().unwrap_or(0),
            )
        } else {
            Usage::default()
        };

        // Track cumulative usage
        {
            let mut total = self.usage.lock().unwrap();
            total.add(&usage);
        }

        Ok(CompletionResponse { content, usage })
    }

    /// Send a request to the OpenRouter API
    async fn send_request(&self, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RoutrError::Llm(format!("Request failed: {}", e)))?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(RoutrError::Llm(format!(
                "Rate limited, retry after {} seconds",
                retry_after
            )));
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RoutrError::Llm(format!("API error {}: {}", status, error_body)));
        }

        response
            .json()
            .await
            .map_err(|e| RoutrError::Llm(format!("Failed to parse response: {}", e)))
    }

    /// Get cumulative token usage
    pub fn total_usage(&self) -> Usage {
        self.usage.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("model", &self.config.model)
            .field("max_tokens", &self.config.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OpenRouterConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_config_with_model() {
        let config = OpenRouterConfig::with_model("google/gemini-flash-1.5");
        assert_eq!(config.model, "google/gemini-flash-1.5");
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_client_with_api_key() {
        let client =
            OpenRouterClient::with_api_key("test-key".to_string(), OpenRouterConfig::default()).unwrap();
        assert!(client.is_ready());
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_build_request_basic() {
        let client =
            OpenRouterClient::with_api_key("test-key".to_string(), OpenRouterConfig::default()).unwrap();

        let request = CompletionRequest::new("You are helpful").with_user_message("Hello");
        let body = client.build_request(&request);

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are helpful");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Hello");
    }

    #[test]
    fn test_build_request_no_system() {
        let client =
            OpenRouterClient::with_api_key("test-key".to_string(), OpenRouterConfig::default()).unwrap();

        let request = CompletionRequest::default().with_user_message("Hello");
        let body = client.build_request(&request);

        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_parse_response() {
        let client =
            OpenRouterClient::with_api_key("test-key".to_string(), OpenRouterConfig::default()).unwrap();

        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "Hi!" } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3 }
        });

        let response = client.parse_response(body).unwrap();
        assert_eq!(response.content, "Hi!");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 3);
        assert_eq!(client.total_usage().total(), 15);
    }

    #[test]
    fn test_parse_response_missing_content() {
        let client =
            OpenRouterClient::with_api_key("test-key".to_string(), OpenRouterConfig::default()).unwrap();

        let result = client.parse_response(json!({ "choices": [] }));
        assert!(result.is_err());
    }
}
