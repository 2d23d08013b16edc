use clap::Args;
use uuid::Uuid;

use crate::cli::op::SessionError;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::http_server::api::files::DeleteFileRequest;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    #[arg(long)]
    pub file_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum FileRmError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = FileRmError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let response = client
            .call(DeleteFileRequest {
                file_id: self.file_id,
            })
            .await?;
        Ok(format!("{} ({})", response.message, response.file_id))
    }
}
