//! Request pipeline
//!
//! One incoming text produces exactly one select → extract → validate →
//! dispatch pass. When no operation is identified or required arguments
//! cannot be filled, the request falls back to a free-form completion over
//! the full original text. The caller always gets a reply: a tool payload,
//! an error payload, or model text.

mod memory;

pub use memory::{DEFAULT_WINDOW, WindowMemory};

use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::llm::{CompletionRequest, LlmClient};
use crate::router::{ArgumentSet, FallbackReason, Operation, RouteDecision, Router};

/// System prompt for fallback completions
const FALLBACK_SYSTEM_PROMPT: &str = "You are a web research assistant. Answer the \
user's request directly and concisely. When the request mentions specific websites, \
summarize what you know about them and note that live scraping was not performed.";

/// Reply produced for one request
#[derive(Debug, Clone)]
pub enum Reply {
    /// A remote operation ran; payload may be content or an error object
    Tool {
        operation: Operation,
        args: ArgumentSet,
        payload: Value,
    },
    /// Free-form model completion over the original text
    Fallback {
        reason: FallbackReason,
        text: String,
    },
}

impl Reply {
    /// Render the reply as display text
    pub fn render(&self) -> String {
        match self {
            Reply::Tool { payload, .. } => {
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
            }
            Reply::Fallback { text, .. } => text.clone(),
        }
    }
}

/// Agent wiring the routing core to a dispatcher and a fallback model
///
/// Constructed once at startup and handed its collaborators explicitly, so
/// the core stays testable without any live network dependency.
pub struct Agent {
    router: Router,
    dispatcher: Box<dyn Dispatcher>,
    llm: Box<dyn LlmClient>,
    memory: WindowMemory,
}

impl Agent {
    /// Create an agent over the given collaborators
    pub fn new(router: Router, dispatcher: Box<dyn Dispatcher>, llm: Box<dyn LlmClient>) -> Self {
        Self {
            router,
            dispatcher,
            llm,
            memory: WindowMemory::default(),
        }
    }

    /// Set the conversation window size
    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory = WindowMemory::new(window);
        self
    }

    /// Process one request end to end
    pub async fn process(&mut self, text: &str) -> Result<Reply> {
        match self.router.decide(text) {
            RouteDecision::Dispatch { operation, args } => {
                let payload = self.dispatcher.dispatch(operation, &args).await;
                Ok(Reply::Tool {
                    operation,
                    args,
                    payload,
                })
            }
            RouteDecision::Fallback(reason) => {
                log::info!("falling back to model completion: {:?}", reason);
                let text_reply = self.fallback(text).await?;
                self.memory.record(text, text_reply.clone());
                Ok(Reply::Fallback {
                    reason,
                    text: text_reply,
                })
            }
        }
    }

    /// Free-form completion over the full original text with window context
    async fn fallback(&self, text: &str) -> Result<String> {
        let mut request = CompletionRequest::new(FALLBACK_SYSTEM_PROMPT);
        for message in self.memory.messages() {
            request = request.with_message(message);
        }
        let request = request.with_user_message(text);

        let response = self.llm.complete(request).await?;
        Ok(response.content)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn memory(&self) -> &WindowMemory {
        &self.memory
    }
}
