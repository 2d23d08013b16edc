use std::sync::Arc;

use axum::extract::FromRef;
use url::Url;

use crate::access::Resources;
use crate::ai::{AiError, TextActionProxy};
use crate::auth::{TokenError, TokenService};
use crate::database::{Database, DatabaseSetupError};
use crate::service_config::Config;

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct State {
    database: Database,
    tokens: Arc<TokenService>,
    ai: TextActionProxy,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let sqlite_database_url = match &config.sqlite_path {
            Some(path) => {
                // check that the path exists
                if !path.exists() {
                    return Err(StateSetupError::DatabasePathDoesNotExist);
                }
                Url::parse(&format!("sqlite://{}", path.display()))
                    .map_err(|_| StateSetupError::InvalidDatabaseUrl)?
            }
            None => {
                tracing::info!("no sqlite path configured, using an in-memory database");
                Url::parse("sqlite::memory:").map_err(|_| StateSetupError::InvalidDatabaseUrl)?
            }
        };
        let database = Database::connect(&sqlite_database_url).await?;

        let secret = match &config.token_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!("no token secret configured, issued tokens won't survive a restart");
                TokenService::generate_secret()?
            }
        };
        let tokens = TokenService::new(secret, config.token_ttl);

        let ai = TextActionProxy::new(&config.ai)?;
        if !ai.is_configured() {
            tracing::warn!("no AI api key configured, text actions will be unavailable");
        }

        Ok(Self::new(database, tokens, ai))
    }

    pub fn new(database: Database, tokens: TokenService, ai: TextActionProxy) -> Self {
        Self {
            database,
            tokens: Arc::new(tokens),
            ai,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn ai(&self) -> &TextActionProxy {
        &self.ai
    }

    pub fn resources(&self) -> Resources<'_> {
        Resources::new(&self.database)
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        &self.database
    }
}

impl FromRef<State> for Database {
    fn from_ref(state: &State) -> Self {
        state.database.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("failed to setup the database: {0}")]
    Database(#[from] DatabaseSetupError),
    #[error("database path does not exist")]
    DatabasePathDoesNotExist,
    #[error("invalid database url")]
    InvalidDatabaseUrl,
    #[error("failed to set up token signing: {0}")]
    Token(#[from] TokenError),
    #[error("failed to set up text actions: {0}")]
    Ai(#[from] AiError),
}
