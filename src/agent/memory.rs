//! Conversation window memory
//!
//! Keeps the last few user/assistant exchanges in memory so fallback
//! completions get short-range context. Nothing is persisted; the window
//! lives and dies with the process.

use std::collections::VecDeque;

use crate::llm::Message;

/// Default number of exchanges kept in the window
pub const DEFAULT_WINDOW: usize = 5;

/// Sliding window over recent conversation turns
#[derive(Debug, Clone)]
pub struct WindowMemory {
    turns: VecDeque<(String, String)>,
    window: usize,
}

impl Default for WindowMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl WindowMemory {
    /// Create a memory holding at most `window` exchanges
    pub fn new(window: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Record one completed user/assistant exchange
    pub fn record(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        if self.window == 0 {
            return;
        }
        if self.turns.len() == self.window {
            self.turns.pop_front();
        }
        self.turns.push_back((user.into(), assistant.into()));
    }

    /// Render the window as an interleaved message history
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2);
        for (user, assistant) in &self.turns {
            messages.push(Message::user(user.clone()));
            messages.push(Message::assistant(assistant.clone()));
        }
        messages
    }

    /// Number of exchanges currently held
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop all recorded exchanges
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
