//! Append-only chat transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Bot,
}

/// One entry in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub author: Author,
    pub sent_at: DateTime<Utc>,
}

/// Messages in the order they were appended. Entries are never edited
/// or removed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it
    pub fn push(&mut self, author: Author, text: impl Into<String>) -> &Message {
        let index = self.messages.len();
        self.messages.push(Message {
            text: text.into(),
            author,
            sent_at: Utc::now(),
        });
        &self.messages[index]
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Texts written by `author`, oldest first
    #[cfg(test)]
    pub fn texts_by(&self, author: Author) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(move |m| m.author == author)
            .map(|m| m.text.as_str())
    }
}
