use clap::Args;

use crate::cli::op::SessionError;
use quillmind_daemon::ai::TextAction;
use quillmind_daemon::http_server::api::ai::ActionRequest;
use quillmind_daemon::http_server::api::client::ApiError;

/// Run a text action on a passage.
#[derive(Args, Debug, Clone)]
pub struct Ai {
    /// One of: rephrase, summarize, expand, fix_grammar, continue, shorten
    pub action: TextAction,

    /// Text to transform
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AiOpError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ai {
    type Error = AiOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let client = ctx.authenticated_client()?;
        let response = client
            .call(ActionRequest {
                action: self.action.as_str().to_string(),
                text: self.text.clone(),
            })
            .await?;
        Ok(response.result)
    }
}
