use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::ResourceError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::{Principal, ResourceId};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub file_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    pub message: String,
    pub file_id: Uuid,
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(file_id): ResourceId,
) -> Result<impl IntoResponse, ResourceError> {
    state
        .resources()
        .delete_file(principal.user_id, file_id)
        .await?;
    Ok(Json(DeleteFileResponse {
        message: "File deleted successfully.".to_string(),
        file_id,
    }))
}

impl ApiRequest for DeleteFileRequest {
    type Response = DeleteFileResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/files/{}", self.file_id))?;
        Ok(client.delete(full_url))
    }
}
