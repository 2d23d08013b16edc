use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::{ErrorCode, ErrorEnvelope};

use crate::ai::AiError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::error::{envelope_response, envelope_with_status, internal_error};
use crate::http_server::api::extract::{ApiJson, Principal};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub result: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ApiJson(req): ApiJson<ActionRequest>,
) -> Result<impl IntoResponse, ActionError> {
    tracing::debug!(user_id = %principal.user_id, action = %req.action, "running text action");
    let result = state.ai().run(&req.action, &req.text).await?;
    Ok(Json(ActionResponse { result }))
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ActionError(#[from] AiError);

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        match self.0 {
            AiError::Validation(message) => envelope_response(ErrorEnvelope::validation(message)),
            AiError::NotConfigured => envelope_with_status(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorEnvelope::new(ErrorCode::Upstream, "Text actions are not available."),
            ),
            AiError::Timeout => envelope_with_status(
                StatusCode::GATEWAY_TIMEOUT,
                ErrorEnvelope::new(ErrorCode::Upstream, "The text service did not respond in time."),
            ),
            AiError::Upstream {
                status: Some(status),
                message,
            } => {
                tracing::warn!(upstream_status = status, detail = %message, "text action failed upstream");
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(StatusCode::is_server_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                envelope_with_status(
                    status,
                    ErrorEnvelope::new(ErrorCode::Upstream, "The text service failed."),
                )
            }
            err @ AiError::Upstream { status: None, .. } => {
                internal_error(&err, "text action returned an unusable response")
            }
            err @ (AiError::InvalidEndpoint(_) | AiError::Client(_)) => {
                internal_error(&err, "text action misconfigured")
            }
        }
    }
}

impl ApiRequest for ActionRequest {
    type Response = ActionResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/ai/action")?;
        Ok(client.post(full_url).json(&self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AiError) -> StatusCode {
        ActionError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AiError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AiError::NotConfigured),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(AiError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_of(AiError::Upstream {
                status: Some(503),
                message: String::new()
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(AiError::Upstream {
                status: Some(429),
                message: String::new()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AiError::Upstream {
                status: None,
                message: String::new()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
