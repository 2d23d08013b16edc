use clap::Args;

use crate::cli::op::SessionError;
use crate::cli::ops::project::{ProjectSelector, SelectProjectError};
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::projects::{CreateFileBody, CreateFileRequest};

#[derive(Args, Debug, Clone)]
pub struct Create {
    #[command(flatten)]
    pub project: ProjectSelector,

    /// File name, e.g. chapter1.md
    #[arg(long)]
    pub name: String,

    /// File type; detected from the name when omitted
    #[arg(long)]
    pub file_type: Option<String>,

    /// Path within the project; defaults to /<name>
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FileCreateError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Select(#[from] SelectProjectError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = FileCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let project_id = self.project.resolve(&client).await?;

        let file = client
            .call(CreateFileRequest {
                project_id,
                body: CreateFileBody {
                    name: self.name.clone(),
                    file_type: self.file_type.clone(),
                    path: self.path.clone(),
                },
            })
            .await?;

        Ok(format!(
            "Created file '{}' at {} ({})",
            file.info.name, file.info.path, file.info.file_id
        ))
    }
}
