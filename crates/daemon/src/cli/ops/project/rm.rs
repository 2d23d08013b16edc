use clap::Args;

use super::{ProjectSelector, SelectProjectError};
use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::DeleteProjectRequest;

/// Delete a project and all of its files.
#[derive(Args, Debug, Clone)]
pub struct Rm {
    #[command(flatten)]
    pub project: ProjectSelector,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectRmError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Select(#[from] SelectProjectError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = ProjectRmError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let project_id = self.project.resolve(&client).await?;
        let response = client.call(DeleteProjectRequest { project_id }).await?;
        Ok(format!("{} ({})", response.message, response.project_id))
    }
}
