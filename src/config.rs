//! Runtime configuration read from the environment

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8000/aprendizado";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CALCULA_ENDPOINT_URL {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("Invalid CALCULA_TIMEOUT_SECS {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Where and how to reach the tutoring service
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub endpoint_url: Url,
    pub timeout: Duration,
}

impl TutorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("CALCULA_ENDPOINT_URL").ok().as_deref(),
            std::env::var("CALCULA_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    fn from_vars(endpoint: Option<&str>, timeout: Option<&str>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT_URL);
        let endpoint_url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                value: endpoint.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let timeout_secs = match timeout {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw.to_string())),
            },
        };

        Ok(Self {
            endpoint_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
