use clap::Args;

use crate::cli::op::SessionError;
use crate::cli::ops::project::{ProjectSelector, SelectProjectError};
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::ListFilesRequest;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    #[command(flatten)]
    pub project: ProjectSelector,
}

#[derive(Debug, thiserror::Error)]
pub enum FileLsError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Select(#[from] SelectProjectError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = FileLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let project_id = self.project.resolve(&client).await?;
        let files = client.call(ListFilesRequest { project_id }).await?;

        if files.is_empty() {
            return Ok("No files found".to_string());
        }
        Ok(files
            .iter()
            .map(|f| {
                format!(
                    "{}  {}  [{}]",
                    f.file_id,
                    f.path,
                    f.file_type.as_deref().unwrap_or("-")
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
