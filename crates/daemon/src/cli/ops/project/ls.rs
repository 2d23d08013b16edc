use clap::Args;

use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::ListProjectsRequest;

#[derive(Args, Debug, Clone)]
pub struct Ls;

#[derive(Debug, thiserror::Error)]
pub enum ProjectLsError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = ProjectLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let projects = client.call(ListProjectsRequest).await?;

        if projects.is_empty() {
            return Ok("No projects found".to_string());
        }
        Ok(projects
            .iter()
            .map(|p| format!("{}  {}  (updated {})", p.project_id, p.name, p.updated_at))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
