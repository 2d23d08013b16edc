use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::access::ResourceError;
use crate::database::models::{File, FileMeta};
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::{Principal, ResourceId};
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFileRequest {
    pub file_id: Uuid,
}

/// File metadata, as listed under a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub path: String,
    pub file_type: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Metadata plus content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDetail {
    #[serde(flatten)]
    pub info: FileInfo,
    pub content: String,
}

impl From<FileMeta> for FileInfo {
    fn from(meta: FileMeta) -> Self {
        Self {
            file_id: *meta.file_id,
            project_id: *meta.project_id,
            name: meta.name,
            path: meta.path,
            file_type: meta.file_type,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}

impl From<File> for FileDetail {
    fn from(mut file: File) -> Self {
        let content = std::mem::take(&mut file.content);
        Self {
            info: FileMeta::from(file).into(),
            content,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(file_id): ResourceId,
) -> Result<impl IntoResponse, ResourceError> {
    let file = state.resources().get_file(principal.user_id, file_id).await?;
    Ok(Json(FileDetail::from(file)))
}

impl ApiRequest for GetFileRequest {
    type Response = FileDetail;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/files/{}", self.file_id))?;
        Ok(client.get(full_url))
    }
}
