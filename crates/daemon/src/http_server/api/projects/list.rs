use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use super::create::ProjectInfo;
use crate::access::ResourceError;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::extract::Principal;
use crate::ServiceState;

/// The caller's projects, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProjectsRequest;

pub async fn handler(
    State(state): State<ServiceState>,
    principal: Principal,
) -> Result<impl IntoResponse, ResourceError> {
    let projects = state.resources().list_projects(principal.user_id).await?;
    let projects: Vec<ProjectInfo> = projects.into_iter().map(ProjectInfo::from).collect();
    Ok(Json(projects))
}

impl ApiRequest for ListProjectsRequest {
    type Response = Vec<ProjectInfo>;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/projects")?;
        Ok(client.get(full_url))
    }
}
