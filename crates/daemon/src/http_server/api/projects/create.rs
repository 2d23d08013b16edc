use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::access::ResourceError;
use crate::database::models::Project;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::{ApiJson, Principal};
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Project> for ProjectInfo {
    fn from(project: Project) -> Self {
        Self {
            project_id: *project.project_id,
            owner_id: *project.owner_id,
            name: project.name,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, ResourceError> {
    let project = state
        .resources()
        .create_project(principal.user_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(ProjectInfo::from(project))))
}

impl ApiRequest for CreateProjectRequest {
    type Response = ProjectInfo;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/projects")?;
        Ok(client.post(full_url).json(&self))
    }
}
