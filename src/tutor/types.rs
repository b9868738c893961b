//! Wire types for the tutoring endpoint

use crate::state_machine::state::{AgeRange, Operation};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Step of the tutoring protocol a request represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    StartLearning,
    SubmitAnswer,
    SubmitExampleFeedback,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::StartLearning => "start_learning",
            Action::SubmitAnswer => "submit_answer",
            Action::SubmitExampleFeedback => "submit_example_feedback",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body, tagged by `action`
///
/// Every variant carries its required fields by value, so a request
/// with missing data cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LearningRequest {
    StartLearning {
        operation: Operation,
        #[serde(rename = "faixa_etaria")]
        age_range: AgeRange,
    },
    SubmitAnswer {
        #[serde(rename = "resposta")]
        answer: String,
    },
    SubmitExampleFeedback {
        #[serde(rename = "feedback_exemplo")]
        helpful: bool,
    },
}

impl LearningRequest {
    pub fn action(&self) -> Action {
        match self {
            LearningRequest::StartLearning { .. } => Action::StartLearning,
            LearningRequest::SubmitAnswer { .. } => Action::SubmitAnswer,
            LearningRequest::SubmitExampleFeedback { .. } => Action::SubmitExampleFeedback,
        }
    }
}

/// Backend reply. Any subset of fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResponse {
    #[serde(
        rename = "mensagem",
        alias = "message",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,

    #[serde(
        rename = "pergunta",
        alias = "question",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub question: Option<String>,

    #[serde(
        rename = "erro",
        alias = "error",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,

    #[serde(
        rename = "feedback_resposta",
        alias = "answer_feedback",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer_feedback: Option<String>,

    #[serde(
        rename = "exemplo_pratico",
        alias = "practical_example",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub practical_example: Option<String>,

    #[serde(
        rename = "pergunta_feedback",
        alias = "feedback_question",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub feedback_question: Option<String>,

    #[serde(
        rename = "novo_exemplo_pratico",
        alias = "new_practical_example",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_practical_example: Option<String>,

    #[serde(
        rename = "proxima_acao_sugerida",
        alias = "suggested_next_action",
        default,
        deserialize_with = "non_blank",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_next_action: Option<String>,
}

/// Blank strings and non-string values count as absent
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}
