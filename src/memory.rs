//! Short-term conversation memory
//!
//! Keeps a bounded rolling window of (user, assistant) message pairs so
//! follow-up questions can be answered with recent context without
//! overflowing the prompt. Nothing is persisted; the buffer lives and
//! dies with the process.

use crate::error::{AssistantError, Result};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Default number of conversation pairs retained
pub const DEFAULT_CAPACITY: usize = 10;

/// A single stored exchange
#[derive(Debug, Clone)]
pub struct MemoryTurn {
    /// User's message, trimmed
    pub user: String,
    /// Assistant's response, trimmed
    pub bot: String,
    /// When the exchange was recorded
    pub timestamp: DateTime<Utc>,
}

/// Bounded FIFO buffer of conversation exchanges
#[derive(Debug)]
pub struct ConversationMemory {
    turns: VecDeque<MemoryTurn>,
    capacity: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationMemory {
    /// Create a memory buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a memory buffer with a custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an exchange.
    ///
    /// Both messages must be non-empty after trimming; this is fail-fast
    /// validation, unlike the fetchers which always return a message.
    pub fn append(&mut self, user: &str, bot: &str) -> Result<()> {
        let user = user.trim();
        let bot = bot.trim();

        if user.is_empty() {
            return Err(AssistantError::InvalidArgument(
                "user message must be a non-empty string".to_string(),
            ));
        }
        if bot.is_empty() {
            return Err(AssistantError::InvalidArgument(
                "bot response must be a non-empty string".to_string(),
            ));
        }

        self.turns.push_back(MemoryTurn {
            user: user.to_string(),
            bot: bot.to_string(),
            timestamp: Utc::now(),
        });

        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }

        Ok(())
    }

    /// Render retained exchanges as alternating labeled lines, oldest
    /// first, or an empty string when nothing is stored
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("User: {}\nBot: {}", t.user, t.bot))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drop all stored exchanges
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Number of stored exchanges
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate over stored exchanges, oldest first
    pub fn turns(&self) -> impl Iterator<Item = &MemoryTurn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_render() {
        let mut memory = ConversationMemory::new();
        memory.append("hi", "hello").unwrap();
        memory.append("price of AAPL?", "AAPL is at $150.25").unwrap();

        assert_eq!(
            memory.render(),
            "User: hi\nBot: hello\nUser: price of AAPL?\nBot: AAPL is at $150.25"
        );
    }

    #[test]
    fn test_render_empty() {
        let memory = ConversationMemory::new();
        assert_eq!(memory.render(), "");
    }

    #[test]
    fn test_capacity_keeps_most_recent() {
        let mut memory = ConversationMemory::new();
        for i in 0..DEFAULT_CAPACITY + 3 {
            memory
                .append(&format!("question {}", i), &format!("answer {}", i))
                .unwrap();
        }

        assert_eq!(memory.len(), DEFAULT_CAPACITY);

        // Oldest three were dropped; relative order of the rest preserved.
        let users: Vec<_> = memory.turns().map(|t| t.user.as_str()).collect();
        assert_eq!(users.first(), Some(&"question 3"));
        assert_eq!(users.last(), Some(&"question 12"));
    }

    #[test]
    fn test_append_rejects_empty_messages() {
        let mut memory = ConversationMemory::new();
        assert!(memory.append("", "response").is_err());
        assert!(memory.append("question", "   ").is_err());
        assert!(memory.is_empty());
    }

    #[test]
    fn test_messages_are_trimmed() {
        let mut memory = ConversationMemory::new();
        memory.append("  hi  ", "  hello  ").unwrap();
        assert_eq!(memory.render(), "User: hi\nBot: hello");
    }

    #[test]
    fn test_reset() {
        let mut memory = ConversationMemory::new();
        memory.append("a", "b").unwrap();
        memory.reset();
        assert!(memory.is_empty());
        assert_eq!(memory.render(), "");
    }
}
