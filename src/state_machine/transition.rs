//! Pure state transition function
//!
//! Given the current state, the student's selection and an event, decide
//! the next state, the updated selection and the effects to run. No I/O
//! happens here; the runtime executes the returned effects.

use super::state::{AgeRejection, AgeRange, Operation};
use super::{ConversationState, Effect, Event, Selection};
use crate::prompts;
use crate::transcript::Author;
use crate::tutor::{Action, LearningRequest, LearningResponse};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub selection: Selection,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState, selection: Selection) -> Self {
        Self {
            new_state: state,
            selection,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    fn prepend(mut self, effect: Effect) -> Self {
        self.effects.insert(0, effect);
        self
    }
}

#[cfg(test)]
impl TransitionResult {
    /// The request this transition dispatches, if any
    pub fn request(&self) -> Option<&LearningRequest> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::SendRequest { request } => Some(request),
            Effect::AppendMessage { .. } => None,
        })
    }

    /// Bot message texts, in order
    pub fn bot_messages(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::AppendMessage {
                    author: Author::Bot,
                    text,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Received a {action} response while {state}")]
    UnexpectedResponse {
        state: ConversationState,
        action: Action,
    },
}

/// How much of the selection a recovery discards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reset {
    /// Forget operation and age, start over
    Full,
    /// Forget the operation only, keep the age
    Partial,
}

/// Pure transition function
pub fn transition(
    state: ConversationState,
    selection: Selection,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (ConversationState::Initial, Event::SessionStarted) => Ok(TransitionResult::new(
            ConversationState::AwaitingOperation,
            Selection::default(),
        )
        .with_effect(Effect::bot_message(prompts::GREETING))
        .with_effect(Effect::bot_message(prompts::ASK_OPERATION))),

        // Session already running
        (_, Event::SessionStarted) => Ok(TransitionResult::new(state, selection)),

        (_, Event::UserInput { text }) => Ok(handle_input(state, selection, &text)),

        (_, Event::ResponseReceived { action, response }) => {
            if pending_action(state) != Some(action) {
                return Err(TransitionError::UnexpectedResponse { state, action });
            }
            Ok(interpret_response(action, selection, response))
        }

        (_, Event::RequestFailed { detail }) => Ok(reset(
            Reset::Full,
            selection,
            [detail.unwrap_or_else(|| prompts::APOLOGY.to_string())],
        )),
    }
}

/// The action whose response a state is prepared to interpret
fn pending_action(state: ConversationState) -> Option<Action> {
    match state {
        ConversationState::Initial => None,
        ConversationState::AwaitingOperation | ConversationState::AwaitingAgeRange => {
            Some(Action::StartLearning)
        }
        ConversationState::AwaitingAnswer => Some(Action::SubmitAnswer),
        ConversationState::AwaitingExampleFeedback => Some(Action::SubmitExampleFeedback),
    }
}

fn handle_input(state: ConversationState, selection: Selection, text: &str) -> TransitionResult {
    let text = text.trim();
    if text.is_empty() {
        return TransitionResult::new(state, selection);
    }
    let echo = Effect::user_message(text);

    match state {
        ConversationState::AwaitingOperation => match Operation::parse(text) {
            Some(operation) => choose_operation(selection, operation).prepend(echo),
            None => TransitionResult::new(state, selection)
                .with_effect(echo)
                .with_effect(Effect::bot_message(prompts::INVALID_OPERATION)),
        },

        ConversationState::AwaitingAgeRange => match AgeRange::parse(text) {
            Ok(age_range) => {
                let selection = Selection {
                    age_range: Some(age_range),
                    ..selection
                };
                match start_learning(selection) {
                    Some(request) => TransitionResult::new(state, selection)
                        .with_effect(echo)
                        .with_effect(request),
                    // Age asked for without an operation on record
                    None => unknown_state(selection).prepend(echo),
                }
            }
            Err(rejection) => {
                let reply = match rejection {
                    AgeRejection::NotNumeric => prompts::NON_NUMERIC_AGE,
                    AgeRejection::Unsupported => prompts::UNSUPPORTED_AGE,
                };
                TransitionResult::new(state, selection)
                    .with_effect(echo)
                    .with_effect(Effect::bot_message(reply))
            }
        },

        ConversationState::AwaitingAnswer => TransitionResult::new(state, selection)
            .with_effect(echo)
            .with_effect(Effect::send(LearningRequest::SubmitAnswer {
                answer: text.to_string(),
            })),

        ConversationState::AwaitingExampleFeedback => TransitionResult::new(state, selection)
            .with_effect(echo)
            .with_effect(Effect::send(LearningRequest::SubmitExampleFeedback {
                helpful: prompts::is_affirmative(text),
            })),

        ConversationState::Initial => unknown_state(selection).prepend(echo),
    }
}

fn choose_operation(selection: Selection, operation: Operation) -> TransitionResult {
    let selection = Selection {
        operation: Some(operation),
        ..selection
    };
    match start_learning(selection) {
        // Age is remembered from an earlier round: go straight to the backend
        Some(request) => {
            TransitionResult::new(ConversationState::AwaitingOperation, selection)
                .with_effect(request)
        }
        None => TransitionResult::new(ConversationState::AwaitingAgeRange, selection)
            .with_effect(Effect::bot_message(prompts::ask_age(operation))),
    }
}

/// `start_learning` request, only once both fields are known
fn start_learning(selection: Selection) -> Option<Effect> {
    let (operation, age_range) = selection.complete()?;
    Some(Effect::send(LearningRequest::StartLearning {
        operation,
        age_range,
    }))
}

fn interpret_response(
    action: Action,
    selection: Selection,
    response: LearningResponse,
) -> TransitionResult {
    if let Some(error) = response.error {
        let kind = match action {
            Action::StartLearning => Reset::Full,
            Action::SubmitAnswer | Action::SubmitExampleFeedback => Reset::Partial,
        };
        return reset(kind, selection, [error]);
    }

    match action {
        Action::StartLearning => match response.question {
            Some(question) => TransitionResult::new(ConversationState::AwaitingAnswer, selection)
                .with_effects(response.message.map(Effect::bot_message))
                .with_effect(Effect::bot_message(question)),
            None => reset(
                Reset::Full,
                selection,
                [prompts::MISSING_QUESTION.to_string()],
            ),
        },

        Action::SubmitAnswer => match (
            response.answer_feedback,
            response.practical_example,
            response.feedback_question,
        ) {
            (Some(feedback), Some(example), Some(question)) => TransitionResult::new(
                ConversationState::AwaitingExampleFeedback,
                selection,
            )
            .with_effects(
                [feedback, example, question]
                    .into_iter()
                    .map(Effect::bot_message),
            ),
            _ => reset(
                Reset::Partial,
                selection,
                [prompts::INCOMPLETE_ANSWER_FEEDBACK.to_string()],
            ),
        },

        Action::SubmitExampleFeedback => match response.new_practical_example {
            Some(example) => {
                let mut shown: Vec<String> = response.message.into_iter().collect();
                shown.push(example);
                match response.feedback_question {
                    Some(question) => {
                        shown.push(question);
                        TransitionResult::new(ConversationState::AwaitingExampleFeedback, selection)
                            .with_effects(shown.into_iter().map(Effect::bot_message))
                    }
                    None => {
                        shown.push(prompts::MISSING_FEEDBACK_QUESTION.to_string());
                        reset(Reset::Partial, selection, shown)
                    }
                }
            }
            // No more examples: the topic is exhausted
            None => {
                let closing = response
                    .message
                    .unwrap_or_else(|| prompts::TOPIC_CLOSED.to_string());
                reset(Reset::Partial, selection, [closing])
            }
        },
    }
}

/// Show `messages`, clear the selection and ask for an operation again
fn reset(
    kind: Reset,
    mut selection: Selection,
    messages: impl IntoIterator<Item = String>,
) -> TransitionResult {
    let prompt = match kind {
        Reset::Full => {
            selection.full_reset();
            prompts::ASK_OPERATION
        }
        Reset::Partial => {
            selection.partial_reset();
            prompts::ASK_NEW_OPERATION
        }
    };
    TransitionResult::new(ConversationState::AwaitingOperation, selection)
        .with_effects(messages.into_iter().map(Effect::bot_message))
        .with_effect(Effect::bot_message(prompt))
}

fn unknown_state(selection: Selection) -> TransitionResult {
    reset(
        Reset::Full,
        selection,
        [prompts::UNKNOWN_STATE.to_string()],
    )
}
