//! Effects produced by state transitions

use crate::transcript::Author;
use crate::tutor::LearningRequest;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a message to the transcript
    AppendMessage { author: Author, text: String },

    /// Dispatch a request to the tutoring backend
    SendRequest { request: LearningRequest },
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            author: Author::User,
            text: text.into(),
        }
    }

    pub fn bot_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            author: Author::Bot,
            text: text.into(),
        }
    }

    pub fn send(request: LearningRequest) -> Self {
        Effect::SendRequest { request }
    }
}
