//! Remote tutoring client
//!
//! The conversation only needs one capability from the backend: send a
//! request, get a loosely typed response back or a transport failure.

mod error;
mod http;
pub mod types;

pub use error::{TransportError, TransportErrorKind};
pub use http::HttpTutorClient;
pub use types::{Action, LearningRequest, LearningResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for tutoring backends
#[async_trait]
pub trait TutorClient: Send + Sync {
    /// Perform one request/response exchange
    async fn send(&self, request: &LearningRequest) -> Result<LearningResponse, TransportError>;
}

#[async_trait]
impl<T: TutorClient + ?Sized> TutorClient for Arc<T> {
    async fn send(&self, request: &LearningRequest) -> Result<LearningResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Logging wrapper for tutoring clients
pub struct LoggingClient<C> {
    inner: C,
}

impl<C: TutorClient> LoggingClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: TutorClient> TutorClient for LoggingClient<C> {
    async fn send(&self, request: &LearningRequest) -> Result<LearningResponse, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    action = %request.action(),
                    duration_ms = %duration.as_millis(),
                    server_error = response.error.is_some(),
                    next_action = ?response.suggested_next_action,
                    "Tutor request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    action = %request.action(),
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Tutor request failed"
                );
            }
        }

        result
    }
}
