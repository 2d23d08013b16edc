use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::action::TextAction;

pub const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Upstream max error body we keep for logs.
const MAX_UPSTREAM_DETAIL: usize = 512;

/// Where text actions are sent.
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    #[serde(default = "default_model")]
    pub model: String,
    /// Without a key every text action fails as not configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_AI_ENDPOINT).expect("default endpoint must parse")
}

fn default_model() -> String {
    DEFAULT_AI_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_AI_TIMEOUT_SECS
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0}")]
    Validation(String),
    #[error("text actions are not configured")]
    NotConfigured,
    #[error("upstream did not answer in time")]
    Timeout,
    #[error("upstream failure (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
    #[error("invalid upstream endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Forwards text actions to the generative-language API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct TextActionProxy {
    client: reqwest::Client,
    url: Url,
    api_key: Option<String>,
}

impl std::fmt::Debug for TextActionProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextActionProxy")
            .field("url", &self.url.as_str())
            .field("configured", &self.api_key.is_some())
            .finish()
    }
}

impl TextActionProxy {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AiError::Client)?;
        let url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            config.endpoint.as_str().trim_end_matches('/'),
            config.model
        ))?;

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run `action` over `text` and return the generated text.
    pub async fn run(&self, action: &str, text: &str) -> Result<String, AiError> {
        if action.trim().is_empty() || text.trim().is_empty() {
            return Err(AiError::Validation("Action and text are required.".into()));
        }
        let action: TextAction = action
            .parse()
            .map_err(|unknown| AiError::Validation(format!("Unsupported action: {}", unknown)))?;
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let prompt = action.prompt(text);
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let mut detail = response.text().await.unwrap_or_default();
            detail.truncate(floor_char_boundary(&detail, MAX_UPSTREAM_DETAIL));
            tracing::warn!(status = status.as_u16(), %action, "text action upstream failed");
            return Err(AiError::Upstream {
                status: Some(status.as_u16()),
                message: detail,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(transport_error)?;
        parsed.into_text().ok_or_else(|| AiError::Upstream {
            status: None,
            message: "unexpected response shape".into(),
        })
    }
}

fn transport_error(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        return AiError::Timeout;
    }
    AiError::Upstream {
        status: None,
        message: err.to_string(),
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|i| s.is_char_boundary(*i)).unwrap_or(0)
}
