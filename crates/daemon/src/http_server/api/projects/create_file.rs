use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{NewFile, ResourceError};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::{ApiJson, Principal, ResourceId};
use crate::http_server::api::files::FileDetail;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFileBody {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRequest {
    pub project_id: Uuid,
    #[serde(flatten)]
    pub body: CreateFileBody,
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(project_id): ResourceId,
    ApiJson(body): ApiJson<CreateFileBody>,
) -> Result<impl IntoResponse, ResourceError> {
    let new_file = NewFile {
        name: body.name,
        file_type: body.file_type,
        path: body.path,
    };
    let file = state
        .resources()
        .create_file(principal.user_id, project_id, new_file)
        .await?;
    Ok((StatusCode::CREATED, Json(FileDetail::from(file))))
}

impl ApiRequest for CreateFileRequest {
    type Response = FileDetail;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/projects/{}/files", self.project_id))?;
        Ok(client.post(full_url).json(&self.body))
    }
}
