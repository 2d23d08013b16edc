use std::time::Duration;

use clap::Args;

use quillmind_daemon::state::{AppState, StateError, AI_API_KEY_ENV};
use quillmind_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let token_secret = state.load_token_secret()?;
        let app_config = state
            .config
            .clone()
            .with_ai_api_key(std::env::var(AI_API_KEY_ENV).ok());

        let config = ServiceConfig {
            api_port: self.api_port.unwrap_or(app_config.api_port),
            cors_origins: vec![app_config.cors_origin.clone()],
            sqlite_path: Some(state.db_path),
            token_secret: Some(token_secret),
            token_ttl: Duration::from_secs(app_config.token_ttl_secs),
            ai: app_config.ai,
            log_level: if self.verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            },
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
