//! LLM client layer for the fallback completion path
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - OpenRouterClient implementation

pub mod client;
pub mod openrouter;
pub mod types;

pub use client::{LlmClient, MockLlmClient};
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, Usage};
