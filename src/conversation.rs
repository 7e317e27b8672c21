//! Conversation transcript — an append-only sequence of message bubbles.
//!
//! Messages are never mutated after creation; rendering is a pure function
//! of the sequence.

use chrono::{DateTime, Utc};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

/// Visual variant of a message bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Normal,
    /// One-off recoverable problem (validation retry, transport failure).
    Warning,
}

/// A single dialogue turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: Author,
    pub kind: Kind,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            kind: Kind::Normal,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            kind: Kind::Normal,
            text: text.into(),
            at: Utc::now(),
        }
    }

    /// A warning-styled bot message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            kind: Kind::Warning,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Append-only ordered message sequence for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
