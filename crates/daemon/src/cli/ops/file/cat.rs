use clap::Args;
use uuid::Uuid;

use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::files::GetFileRequest;

/// Print a file's content.
#[derive(Args, Debug, Clone)]
pub struct Cat {
    #[arg(long)]
    pub file_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum FileCatError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cat {
    type Error = FileCatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let file = client
            .call(GetFileRequest {
                file_id: self.file_id,
            })
            .await?;
        Ok(file.content)
    }
}
