use reqwest::StatusCode;

use common::prelude::ErrorEnvelope;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {status}: {envelope}")]
    Api {
        status: StatusCode,
        envelope: ErrorEnvelope,
    },
}

impl ApiError {
    /// The envelope the server answered with, if it got that far.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Api { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}
