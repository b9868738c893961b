//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::tutor::{Action, LearningRequest, LearningResponse};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConversationState> {
    prop_oneof![
        Just(ConversationState::Initial),
        Just(ConversationState::AwaitingOperation),
        Just(ConversationState::AwaitingAgeRange),
        Just(ConversationState::AwaitingAnswer),
        Just(ConversationState::AwaitingExampleFeedback),
    ]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Addition),
        Just(Operation::Subtraction),
        Just(Operation::Multiplication),
        Just(Operation::Division),
    ]
}

fn arb_age_range() -> impl Strategy<Value = AgeRange> {
    (3u32..=25).prop_map(|age| AgeRange::from_age(age).unwrap())
}

fn arb_selection() -> impl Strategy<Value = Selection> {
    (
        proptest::option::of(arb_operation()),
        proptest::option::of(arb_age_range()),
    )
        .prop_map(|(operation, age_range)| Selection {
            operation,
            age_range,
        })
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,8}"
}

fn arb_user_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        "[0-9]{1,4}",
        Just("soma".to_string()),
        Just("subtração".to_string()),
        Just("multiplicacao".to_string()),
        Just("divisão".to_string()),
        Just("sim".to_string()),
    ]
}

fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z ]{1,20}")
}

fn arb_response() -> impl Strategy<Value = LearningResponse> {
    (
        (
            arb_optional_text(),
            arb_optional_text(),
            arb_optional_text(),
            arb_optional_text(),
        ),
        (
            arb_optional_text(),
            arb_optional_text(),
            arb_optional_text(),
            arb_optional_text(),
        ),
    )
        .prop_map(
            |(
                (message, question, error, answer_feedback),
                (practical_example, feedback_question, new_practical_example, suggested_next_action),
            )| LearningResponse {
                message,
                question,
                error,
                answer_feedback,
                practical_example,
                feedback_question,
                new_practical_example,
                suggested_next_action,
            },
        )
}

/// Reproduce the same word with some accents dropped and case changed
fn strip_accents(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'ã' | 'á' => 'a',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_blank_input_is_a_no_op(
        state in arb_state(),
        selection in arb_selection(),
        text in arb_whitespace(),
    ) {
        let result = transition(state, selection, Event::UserInput { text }).unwrap();
        prop_assert_eq!(result.new_state, state);
        prop_assert_eq!(result.selection, selection);
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn prop_start_learning_only_with_complete_selection(
        state in arb_state(),
        selection in arb_selection(),
        text in arb_user_text(),
    ) {
        let result = transition(state, selection, Event::user_input(text)).unwrap();
        if let Some(LearningRequest::StartLearning { operation, age_range }) = result.request() {
            prop_assert_eq!(result.selection.operation, Some(*operation));
            prop_assert_eq!(result.selection.age_range, Some(*age_range));
        }
    }

    #[test]
    fn prop_at_most_one_request_per_transition(
        state in arb_state(),
        selection in arb_selection(),
        text in arb_user_text(),
    ) {
        let result = transition(state, selection, Event::user_input(text)).unwrap();
        let sends = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::SendRequest { .. }))
            .count();
        prop_assert!(sends <= 1);
        // The request always comes after the echoed user message
        if sends == 1 {
            let request_is_last =
                matches!(result.effects.last(), Some(Effect::SendRequest { .. }));
            prop_assert!(request_is_last, "request must be the last effect");
        }
    }

    #[test]
    fn prop_every_age_in_range_has_one_bucket(age in 3u32..=25) {
        let bucket = AgeRange::parse(&age.to_string()).unwrap();
        let (low, high) = bucket.label().split_once('-').unwrap();
        let (low, high): (u32, u32) = (low.parse().unwrap(), high.parse().unwrap());
        prop_assert!(low <= age && age <= high);
    }

    #[test]
    fn prop_out_of_range_age_changes_nothing(
        age in prop_oneof![0u32..3, 26u32..10_000],
        operation in arb_operation(),
    ) {
        let selection = Selection { operation: Some(operation), age_range: None };
        let result = transition(
            ConversationState::AwaitingAgeRange,
            selection,
            Event::user_input(age.to_string()),
        )
        .unwrap();
        prop_assert_eq!(result.new_state, ConversationState::AwaitingAgeRange);
        prop_assert_eq!(result.selection, selection);
        prop_assert!(result.request().is_none());
    }

    #[test]
    fn prop_diacritics_and_case_do_not_matter(
        op in arb_operation(),
        upper in any::<bool>(),
    ) {
        let spelled = op.display_name();
        let plain = strip_accents(spelled);
        let plain = if upper { plain.to_uppercase() } else { plain };
        prop_assert_eq!(Operation::parse(spelled), Some(op));
        prop_assert_eq!(Operation::parse(&plain), Some(op));
    }

    #[test]
    fn prop_responses_always_land_in_a_waiting_state(
        selection in arb_selection(),
        response in arb_response(),
        pick in 0usize..3,
    ) {
        let (state, action) = [
            (ConversationState::AwaitingAgeRange, Action::StartLearning),
            (ConversationState::AwaitingAnswer, Action::SubmitAnswer),
            (ConversationState::AwaitingExampleFeedback, Action::SubmitExampleFeedback),
        ][pick];
        let result = transition(
            state,
            selection,
            Event::ResponseReceived { action, response: response.clone() },
        )
        .unwrap();

        prop_assert_ne!(result.new_state, ConversationState::Initial);
        prop_assert_ne!(result.new_state, ConversationState::AwaitingAgeRange);
        prop_assert!(result.request().is_none());
        prop_assert!(!result.bot_messages().is_empty());

        if result.new_state == ConversationState::AwaitingOperation {
            // Resets never invent an age
            prop_assert!(result.selection.operation.is_none());
            prop_assert!(result.selection.age_range.is_none() || result.selection.age_range == selection.age_range);
        } else {
            prop_assert_eq!(result.selection, selection);
        }

        if let Some(error) = &response.error {
            prop_assert_eq!(result.new_state, ConversationState::AwaitingOperation);
            prop_assert_eq!(result.bot_messages()[0], error.as_str());
            let full = action == Action::StartLearning;
            prop_assert_eq!(result.selection.age_range.is_none(), full || selection.age_range.is_none());
        }
    }

    #[test]
    fn prop_transport_failure_is_full_reset(
        state in arb_state(),
        selection in arb_selection(),
        detail in arb_optional_text(),
    ) {
        let result = transition(state, selection, Event::RequestFailed { detail }).unwrap();
        prop_assert_eq!(result.new_state, ConversationState::AwaitingOperation);
        prop_assert_eq!(result.selection, Selection::default());
        prop_assert!(result.request().is_none());
    }
}
