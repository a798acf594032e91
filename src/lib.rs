//! Routr - a rule-based request router for web scraping operations
//!
//! Routr maps free-text requests onto a fixed catalog of scraping
//! operations using regex rules, extracts typed arguments from the
//! request text, and dispatches to a remote API. Requests that match
//! no operation, or that are missing required arguments, fall back to
//! a free-form LLM completion.

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod router;

pub use error::{Result, RoutrError};
