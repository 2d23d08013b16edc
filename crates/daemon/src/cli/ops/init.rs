use clap::Args;
use url::Url;

use quillmind_daemon::ai::AiConfig;
use quillmind_daemon::state::{AppConfig, AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// API server port
    #[arg(long, default_value_t = 5001)]
    pub api_port: u16,

    /// Browser origin allowed to call the API
    #[arg(long, default_value = "http://localhost:3000")]
    pub cors_origin: String,

    /// Access token lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    pub token_ttl_secs: u64,

    /// Generative-language API endpoint
    #[arg(long)]
    pub ai_endpoint: Option<Url>,

    /// Generative-language model
    #[arg(long)]
    pub ai_model: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut ai = AiConfig::default();
        if let Some(endpoint) = &self.ai_endpoint {
            ai.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.ai_model {
            ai.model = model.clone();
        }

        let config = AppConfig {
            api_port: self.api_port,
            cors_origin: self.cors_origin.clone(),
            token_ttl_secs: self.token_ttl_secs,
            ai,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized config directory at: {}\n\
             - Database: {}\n\
             - Token key: {}\n\
             - Config: {}\n\
             - API port: {}\n\
             - CORS origin: {}\n\
             - AI model: {} (set {} or ai.api_key to enable text actions)",
            state.config_dir.display(),
            state.db_path.display(),
            state.token_key_path.display(),
            state.config_path.display(),
            state.config.api_port,
            state.config.cors_origin,
            state.config.ai.model,
            quillmind_daemon::state::AI_API_KEY_ENV,
        );

        Ok(output)
    }
}
