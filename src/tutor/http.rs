//! HTTP implementation of the tutoring client

use super::types::{LearningRequest, LearningResponse};
use super::{TransportError, TutorClient};
use crate::config::TutorConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

/// Posts JSON requests to a single configured endpoint
pub struct HttpTutorClient {
    client: Client,
    endpoint: Url,
}

impl HttpTutorClient {
    pub fn new(config: &TutorConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint_url.clone(),
        })
    }

    /// Turn a non-success reply into either a server-reported error the
    /// conversation can show, or a transport failure.
    fn classify_status(status: StatusCode, body: &str) -> Result<LearningResponse, TransportError> {
        match parse_reply(body) {
            Ok(parsed) if parsed.error.is_some() => Ok(parsed),
            Ok(parsed) => Err(TransportError::status(format!("HTTP {status}: {body}"))
                .with_detail(parsed.message)),
            Err(_) => Err(TransportError::status(format!("HTTP {status}: {body}"))),
        }
    }
}

#[async_trait]
impl TutorClient for HttpTutorClient {
    async fn send(&self, request: &LearningRequest) -> Result<LearningResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    TransportError::network(format!("Connection failed: {e}"))
                } else {
                    TransportError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Self::classify_status(status, &body);
        }

        parse_reply(&body).map_err(|e| {
            TransportError::decode(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}

/// Decode a reply body, which must be a JSON object. Serde would otherwise
/// read an array as a positional field list.
fn parse_reply(body: &str) -> Result<LearningResponse, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom(format!(
            "expected a JSON object, got {value}"
        )));
    }
    serde_json::from_value(value)
}
