//! Conversation state types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Operation - the arithmetic topic the student wants to practise
// ============================================================================

/// Arithmetic operation, serialized with the backend's wire names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "soma")]
    Addition,
    #[serde(rename = "subtracao")]
    Subtraction,
    #[serde(rename = "multiplicacao")]
    Multiplication,
    #[serde(rename = "divisao")]
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Name shown to the student
    pub fn display_name(self) -> &'static str {
        match self {
            Operation::Addition => "adição",
            Operation::Subtraction => "subtração",
            Operation::Multiplication => "multiplicação",
            Operation::Division => "divisão",
        }
    }

    /// Free-text synonyms accepted for this operation, already folded
    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Operation::Addition => &["soma", "somar", "adicao", "mais", "+", "addition"],
            Operation::Subtraction => &["subtracao", "subtrair", "menos", "-", "subtraction"],
            Operation::Multiplication => &[
                "multiplicacao",
                "multiplicar",
                "vezes",
                "x",
                "*",
                "multiplication",
            ],
            Operation::Division => &["divisao", "dividir", "/", "division"],
        }
    }

    /// Normalize free text into an operation.
    ///
    /// Case and Portuguese diacritics are ignored, so "Subtração" and
    /// "subtracao" both resolve to [`Operation::Subtraction`].
    pub fn parse(input: &str) -> Option<Self> {
        let folded = fold_diacritics(input.trim());
        Self::ALL
            .into_iter()
            .find(|op| op.synonyms().contains(&folded.as_str()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lowercase and strip the diacritics used in Portuguese
fn fold_diacritics(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        // Decomposed input carries its accents as combining marks
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// ============================================================================
// Age range - the bucket the backend tailors content to
// ============================================================================

/// Fixed age buckets understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "3-5")]
    From3To5,
    #[serde(rename = "6-8")]
    From6To8,
    #[serde(rename = "9-12")]
    From9To12,
    #[serde(rename = "13-15")]
    From13To15,
    #[serde(rename = "16-18")]
    From16To18,
    #[serde(rename = "19-22")]
    From19To22,
    #[serde(rename = "23-25")]
    From23To25,
}

/// Why an age string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRejection {
    /// Not a plain string of digits
    NotNumeric,
    /// Digits, but no bucket covers that age
    Unsupported,
}

impl AgeRange {
    pub fn label(self) -> &'static str {
        match self {
            AgeRange::From3To5 => "3-5",
            AgeRange::From6To8 => "6-8",
            AgeRange::From9To12 => "9-12",
            AgeRange::From13To15 => "13-15",
            AgeRange::From16To18 => "16-18",
            AgeRange::From19To22 => "19-22",
            AgeRange::From23To25 => "23-25",
        }
    }

    /// Map a numeric age onto its bucket
    pub fn from_age(age: u32) -> Option<Self> {
        match age {
            3..=5 => Some(AgeRange::From3To5),
            6..=8 => Some(AgeRange::From6To8),
            9..=12 => Some(AgeRange::From9To12),
            13..=15 => Some(AgeRange::From13To15),
            16..=18 => Some(AgeRange::From16To18),
            19..=22 => Some(AgeRange::From19To22),
            23..=25 => Some(AgeRange::From23To25),
            _ => None,
        }
    }

    /// Parse a typed age. Only ASCII digits are accepted.
    pub fn parse(input: &str) -> Result<Self, AgeRejection> {
        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AgeRejection::NotNumeric);
        }
        // Overflowing digit strings are simply very large ages
        let age: u32 = input.parse().map_err(|_| AgeRejection::Unsupported)?;
        Self::from_age(age).ok_or(AgeRejection::Unsupported)
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Selection - what the student has chosen so far
// ============================================================================

/// Accumulated choices needed before learning can start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub operation: Option<Operation>,
    pub age_range: Option<AgeRange>,
}

impl Selection {
    /// Clear both choices
    pub fn full_reset(&mut self) {
        *self = Selection::default();
    }

    /// Clear the operation only, keeping the age range
    pub fn partial_reset(&mut self) {
        self.operation = None;
    }

    /// Both fields, once `start_learning` can be sent
    pub fn complete(self) -> Option<(Operation, AgeRange)> {
        Some((self.operation?, self.age_range?))
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Conversation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Session not started yet, no greeting shown
    #[default]
    Initial,

    /// Waiting for the student to name an operation
    AwaitingOperation,

    /// Operation chosen, waiting for the student's age
    AwaitingAgeRange,

    /// A question was asked, waiting for the student's answer
    AwaitingAnswer,

    /// A practical example was shown, waiting for "did it help?"
    AwaitingExampleFeedback,
}

impl ConversationState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::AwaitingOperation => "awaiting_operation",
            ConversationState::AwaitingAgeRange => "awaiting_age_range",
            ConversationState::AwaitingAnswer => "awaiting_answer",
            ConversationState::AwaitingExampleFeedback => "awaiting_example_feedback",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
