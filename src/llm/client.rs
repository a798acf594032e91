//! Core LLM client trait and mock implementation

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;

use super::types::{CompletionRequest, CompletionResponse, Usage};

/// Stateless LLM client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Model identifier this client talks to
    fn model(&self) -> &str;

    /// Whether the client is configured and usable
    fn is_ready(&self) -> bool;
}

/// Mock LLM client with a canned response for testing
pub struct MockLlmClient {
    response: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self {
            response: "mock response".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl MockLlmClient {
    /// Create a mock client with the default canned response
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned response text
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(CompletionResponse {
            content: self.response.clone(),
            usage: Usage::new(10, 5),
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_complete() {
        let client = MockLlmClient::new().with_response("hello from the mock");

        let request = CompletionRequest::new("system").with_user_message("hi");
        let response = client.complete(request).await.unwrap();

        assert_eq!(response.content, "hello from the mock");
        assert_eq!(client.requests().len(), 1);
        assert_eq!(client.requests()[0].messages[0].content, "hi");
    }

    #[test]
    fn test_mock_client_metadata() {
        let client = MockLlmClient::new();
        assert!(client.is_ready());
        assert_eq!(client.model(), "mock-model");
    }
}
