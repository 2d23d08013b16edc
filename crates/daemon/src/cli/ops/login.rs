use clap::Args;
use time::OffsetDateTime;

use common::prelude::Session;
use quillmind_daemon::http_server::api::auth::LoginRequest;
use quillmind_daemon::http_server::api::client::ApiError;
use quillmind_daemon::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Login {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("daemon returned a token that can't be used")]
    UnusableToken,
    #[error("failed to store session: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Login {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let request = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let response = ctx.client.call(request).await?;

        let session = Session::restore(&response.access_token, OffsetDateTime::now_utc())
            .ok_or(LoginError::UnusableToken)?
            .with_email(response.user.email);
        AppState::write_session_token(ctx.config_path.clone(), session.token())?;

        let expires = OffsetDateTime::from_unix_timestamp(session.expires_at)
            .map(|at| at.to_string())
            .unwrap_or_else(|_| session.expires_at.to_string());
        Ok(format!(
            "{}\nLogged in as {} <{}>, session expires {}",
            response.message,
            session.username,
            session.email.as_deref().unwrap_or_default(),
            expires
        ))
    }
}
