use clap::Args;

use quillmind_daemon::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Logout;

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("failed to remove session: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Logout {
    type Error = LogoutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // tokens are stateless, so logging out only forgets ours
        if AppState::clear_session_token(ctx.config_path.clone())? {
            Ok("Logged out".to_string())
        } else {
            Ok("Not logged in".to_string())
        }
    }
}
