use std::path::PathBuf;

use clap::Args;
use uuid::Uuid;

use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::files::UpdateFileRequest;

/// Replace a file's content.
#[derive(Args, Debug, Clone)]
#[command(group(clap::ArgGroup::new("source").required(true)))]
pub struct Write {
    #[arg(long)]
    pub file_id: Uuid,

    /// New content, inline
    #[arg(long, group = "source")]
    pub content: Option<String>,

    /// Read new content from a local file
    #[arg(long, group = "source")]
    pub from: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum FileWriteError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Either --content or --from must be provided")]
    NoContent,
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Write {
    type Error = FileWriteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let content = match (&self.content, &self.from) {
            (Some(content), _) => content.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FileWriteError::Read(path.clone(), e))?,
            (None, None) => return Err(FileWriteError::NoContent),
        };

        let client = ctx.authenticated_client()?;
        let response = client
            .call(UpdateFileRequest {
                file_id: self.file_id,
                content,
            })
            .await?;

        Ok(format!(
            "{} ({} at {})",
            response.message, response.file_id, response.updated_at
        ))
    }
}
