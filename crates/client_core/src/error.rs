use shared::error::RequestBuildError;
use thiserror::Error;

/// Shown when a failure renders to an empty string.
pub const GENERIC_FAILURE_REASON: &str = "An error occurred while calling the API.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestBuildError),
    #[error("could not join request target '{target}' onto base url: {source}")]
    Join {
        target: String,
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body is not valid JSON (HTTP {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Backend(String),
}

impl ClientError {
    /// User-facing text for a failed request. Never empty.
    pub fn reason(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_FAILURE_REASON.to_string()
        } else {
            text
        }
    }
}
