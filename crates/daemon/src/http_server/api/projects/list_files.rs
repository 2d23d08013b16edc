use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::ResourceError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::{Principal, ResourceId};
use crate::http_server::api::files::FileInfo;
use crate::ServiceState;

/// Metadata of the files in a project; content is fetched per file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesRequest {
    pub project_id: Uuid,
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(project_id): ResourceId,
) -> Result<impl IntoResponse, ResourceError> {
    let files = state
        .resources()
        .list_files(principal.user_id, project_id)
        .await?;
    let files: Vec<FileInfo> = files.into_iter().map(FileInfo::from).collect();
    Ok(Json(files))
}

impl ApiRequest for ListFilesRequest {
    type Response = Vec<FileInfo>;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/projects/{}/files", self.project_id))?;
        Ok(client.get(full_url))
    }
}
