//! Events that can occur in a conversation

use crate::tutor::{Action, LearningResponse};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The screen opened; greet the student
    SessionStarted,

    /// The student sent a line of text (untrimmed)
    UserInput { text: String },

    /// The backend answered a request we dispatched
    ResponseReceived {
        action: Action,
        response: LearningResponse,
    },

    /// The request never produced an interpretable response
    RequestFailed {
        /// Server-supplied explanation, if the transport surfaced one
        detail: Option<String>,
    },
}

impl Event {
    pub fn user_input(text: impl Into<String>) -> Self {
        Event::UserInput { text: text.into() }
    }
}
