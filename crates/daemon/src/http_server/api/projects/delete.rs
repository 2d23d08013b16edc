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
pub struct DeleteProjectRequest {
    pub project_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    pub message: String,
    pub project_id: Uuid,
}

/// Deletes the project and all of its files.
pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
    ResourceId(project_id): ResourceId,
) -> Result<impl IntoResponse, ResourceError> {
    let project = state
        .resources()
        .delete_project(principal.user_id, project_id)
        .await?;
    Ok(Json(DeleteProjectResponse {
        message: "Project deleted successfully.".to_string(),
        project_id: *project.project_id,
    }))
}

impl ApiRequest for DeleteProjectRequest {
    type Response = DeleteProjectResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join(&format!("/api/projects/{}", self.project_id))?;
        Ok(client.delete(full_url))
    }
}
