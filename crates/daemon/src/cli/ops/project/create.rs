use clap::Args;

use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::CreateProjectRequest;

#[derive(Args, Debug, Clone)]
pub struct Create {
    /// Project name
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectCreateError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = ProjectCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let project = client
            .call(CreateProjectRequest {
                name: self.name.clone(),
            })
            .await?;

        Ok(format!(
            "Created project '{}' ({})",
            project.name, project.project_id
        ))
    }
}
