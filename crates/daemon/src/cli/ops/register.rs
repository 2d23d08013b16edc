use clap::Args;

use quillmind_daemon::http_server::api::auth::RegisterRequest;
use quillmind_daemon::http_server::api::client::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Register {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Register {
    type Error = RegisterError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = RegisterRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let response = ctx.client.call(request).await?;

        Ok(format!(
            "{}\n  user_id:  {}\n  username: {}\n  email:    {}",
            response.message, response.user.user_id, response.user.username, response.user.email
        ))
    }
}
