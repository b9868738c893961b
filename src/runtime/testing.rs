//! Mock implementations for testing
//!
//! These mocks enable controller testing without real network I/O.

use crate::tutor::{LearningRequest, LearningResponse, TransportError, TutorClient};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock Tutor Client
// ============================================================================

/// Mock tutor client that returns queued responses
pub struct MockTutorClient {
    responses: Mutex<VecDeque<Result<LearningResponse, TransportError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<LearningRequest>>,
}

impl MockTutorClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LearningResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a transport failure
    pub fn queue_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LearningRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTutorClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TutorClient for MockTutorClient {
    async fn send(&self, request: &LearningRequest) -> Result<LearningResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("No mock response queued")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::TransportErrorKind;

    #[tokio::test]
    async fn test_mock_tutor_client() {
        let mock = MockTutorClient::new();
        mock.queue_response(LearningResponse {
            question: Some("Quanto é 1 + 1?".to_string()),
            ..Default::default()
        });

        let request = LearningRequest::SubmitAnswer {
            answer: "2".to_string(),
        };

        let response = mock.send(&request).await.unwrap();
        assert_eq!(response.question.as_deref(), Some("Quanto é 1 + 1?"));

        // Second call should fail (no more responses)
        let err = mock.send(&request).await.unwrap_err();
        assert_eq!(err.kind, TransportErrorKind::Network);
        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
