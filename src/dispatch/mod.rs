//! Dispatch boundary - invoking remote operations
//!
//! Defines the Dispatcher trait for invoking a validated operation and the
//! MockDispatcher used in tests. Callers treat the return value as
//! always-present content, so any remote failure is converted into a
//! structured `{"error": ...}` payload here and never propagated.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::router::{ArgumentSet, Operation};

mod firecrawl;

pub use firecrawl::{FirecrawlConfig, FirecrawlDispatcher};

/// Trait for invoking remote operations
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Invoke the operation with a validated argument set
    ///
    /// Returns the raw remote payload, or an `{"error": ...}` object on any
    /// failure. Never errors past this boundary.
    async fn dispatch(&self, operation: Operation, args: &ArgumentSet) -> Value;
}

/// Build the structured error payload callers render on failure
pub fn error_payload(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

/// Check whether a dispatch payload is the error shape
pub fn is_error_payload(payload: &Value) -> bool {
    payload.get("error").is_some()
}

/// Mock dispatcher with canned responses for testing
#[derive(Default)]
pub struct MockDispatcher {
    responses: HashMap<&'static str, Value>,
    calls: Mutex<Vec<Operation>>,
}

impl MockDispatcher {
    /// Create a mock with no configured responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned response for an operation
    pub fn with_response(mut self, operation: Operation, response: Value) -> Self {
        self.responses.insert(operation.name(), response);
        self
    }

    /// Operations dispatched so far, in order
    pub fn dispatched(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn dispatch(&self, operation: Operation, _args: &ArgumentSet) -> Value {
        self.calls.lock().unwrap().push(operation);
        match self.responses.get(operation.name()) {
            Some(response) => response.clone(),
            None => error_payload(format!("No mock response configured for operation: {}", operation)),
        }
    }
}
