use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use common::prelude::ErrorEnvelope;

use crate::access::ResourceError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::error::envelope_response;
use crate::http_server::api::extract::{ApiJson, Principal, ResourceId};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    pub file_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFileResponse {
    pub message: String,
    pub file_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Replaces the file's content wholesale.
///
/// The body is read as raw JSON so that a missing or non-string `content`
/// is rejected instead of coerced.
pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(file_id): ResourceId,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, UpdateFileError> {
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or(UpdateFileError::ContentNotString)?;

    let file = state
        .resources()
        .update_file_content(principal.user_id, file_id, content)
        .await?;

    Ok(Json(UpdateFileResponse {
        message: "File updated successfully.".to_string(),
        file_id: *file.file_id,
        updated_at: file.updated_at,
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateFileError {
    #[error("content must be a string")]
    ContentNotString,
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl IntoResponse for UpdateFileError {
    fn into_response(self) -> Response {
        match self {
            UpdateFileError::ContentNotString => {
                envelope_response(ErrorEnvelope::validation("Content must be a string."))
            }
            UpdateFileError::Resource(err) => err.into_response(),
        }
    }
}

impl ApiRequest for UpdateFileRequest {
    type Response = UpdateFileResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/files/{}", self.file_id))?;
        Ok(client
            .put(full_url)
            .json(&serde_json::json!({ "content": self.content })))
    }
}
