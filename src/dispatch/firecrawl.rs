//! Firecrawl API dispatcher
//!
//! Invokes the Firecrawl v1 REST endpoints for each operation. One request
//! per dispatch; retry and timeout policy beyond the HTTP client timeout
//! belongs to the remote side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, RoutrError};
use crate::router::{ArgumentSet, Operation};

use super::{Dispatcher, error_payload};

/// Default Firecrawl API base URL
const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the Firecrawl dispatcher
#[derive(Debug, Clone)]
pub struct FirecrawlConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        Self {
            api_url: FIRECRAWL_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FirecrawlConfig {
    /// Create a config pointing at a specific base URL
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// Dispatcher backed by the Firecrawl REST API
pub struct FirecrawlDispatcher {
    client: Client,
    api_key: String,
    config: FirecrawlConfig,
}

impl FirecrawlDispatcher {
    /// Create a new dispatcher
    ///
    /// Reads FIRECRAWL_API_KEY from environment
    pub fn new(config: FirecrawlConfig) -> Result<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY")
            .map_err(|_| RoutrError::Dispatch("FIRECRAWL_API_KEY not set".to_string()))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a dispatcher with an explicit API key
    pub fn with_api_key(api_key: String, config: FirecrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RoutrError::Dispatch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// API path for an operation
    fn endpoint(operation: Operation) -> &'static str {
        match operation {
            Operation::ScrapeWebsite => "/v1/scrape",
            Operation::CrawlWebsite => "/v1/crawl",
            Operation::SearchWebsite => "/v1/search",
            Operation::MapLinks => "/v1/map",
            Operation::ExtractContent => "/v1/extract",
            Operation::DeepAnalysis => "/v1/deep-research",
        }
    }

    /// Build the JSON request body for an operation
    ///
    /// Argument names match the wire format except deep research, whose
    /// depth and time overrides the API spells in camelCase.
    fn request_body(operation: Operation, args: &ArgumentSet) -> Value {
        let mut body = args.to_json();

        if operation == Operation::DeepAnalysis
            && let Some(map) = body.as_object_mut()
        {
            if let Some(depth) = map.remove("max_depth") {
                map.insert("maxDepth".to_string(), depth);
            }
            if let Some(time) = map.remove("time_limit") {
                map.insert("timeLimit".to_string(), time);
            }
        }

        body
    }

    /// Send one request, normalizing every failure into an error payload
    async fn send_request(&self, operation: Operation, body: Value) -> Value {
        let url = format!("{}{}", self.config.api_url, Self::endpoint(operation));

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return error_payload(format!("Request failed: {}", e)),
        };

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return error_payload(format!("API error {}: {}", status, error_body));
        }

        match response.json::<Value>().await {
            Ok(payload) => payload,
            Err(e) => error_payload(format!("Failed to parse response: {}", e)),
        }
    }
}

#[async_trait]
impl Dispatcher for FirecrawlDispatcher {
    async fn dispatch(&self, operation: Operation, args: &ArgumentSet) -> Value {
        log::info!("dispatching {} to {}", operation, Self::endpoint(operation));
        let body = Self::request_body(operation, args);
        self.send_request(operation, body).await
    }
}

impl std::fmt::Debug for FirecrawlDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirecrawlDispatcher")
            .field("api_url", &self.config.api_url)
            .finish()
    }
}
