use std::error::Error;
use std::path::PathBuf;

use time::OffsetDateTime;
use url::Url;

use common::prelude::Session;
use quillmind_daemon::http_server::api::client::{ApiClient, ApiError};
use quillmind_daemon::state::{AppState, StateError};

/// Resolve the remote URL for the API client.
///
/// Priority: explicit `--remote` flag > config file `api_port` > hardcoded 5001.
pub fn resolve_remote(explicit: Option<Url>, config_path: Option<PathBuf>) -> Url {
    if let Some(url) = explicit {
        return url;
    }
    if let Ok(state) = AppState::load(config_path) {
        if let Ok(url) = Url::parse(&format!("http://localhost:{}", state.config.api_port)) {
            return url;
        }
    }
    Url::parse("http://localhost:5001").expect("hardcoded URL must parse")
}

#[derive(Clone)]
pub struct OpContext {
    /// API client (always initialized with default or custom URL)
    pub client: ApiClient,
    /// Optional custom config path (defaults to ~/.quillmind)
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("not logged in. Run 'quill login' first")]
    NotLoggedIn,
    #[error("session expired or invalid. Run 'quill login' again")]
    Expired,
    #[error("state error: {0}")]
    State(#[from] StateError),
}

impl OpContext {
    /// Create context with custom remote URL and optional config path
    pub fn new(remote: Url, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(&remote)?,
            config_path,
        })
    }

    /// The stored session, dropped from disk once it has expired.
    pub fn session(&self) -> Result<Session, SessionError> {
        let token = AppState::read_session_token(self.config_path.clone())?
            .ok_or(SessionError::NotLoggedIn)?;
        match Session::restore(&token, OffsetDateTime::now_utc()) {
            Some(session) => Ok(session),
            None => {
                AppState::clear_session_token(self.config_path.clone())?;
                Err(SessionError::Expired)
            }
        }
    }

    /// API client carrying the stored session's bearer token.
    pub fn authenticated_client(&self) -> Result<ApiClient, SessionError> {
        let session = self.session()?;
        Ok(self.client.clone().with_token(session.token()))
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999").unwrap();
        let result = resolve_remote(Some(explicit.clone()), None);
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_remote_falls_back_to_default() {
        // No explicit URL, no valid config path → hardcoded 5001
        let result = resolve_remote(None, Some(PathBuf::from("/nonexistent")));
        assert_eq!(result.as_str(), "http://localhost:5001/");
    }

    #[test]
    fn test_resolve_remote_uses_configured_port() {
        let dir = tempfile::tempdir().unwrap();
        let config = quillmind_daemon::AppConfig {
            api_port: 6123,
            ..Default::default()
        };
        AppState::init(Some(dir.path().to_path_buf()), Some(config)).unwrap();

        let result = resolve_remote(None, Some(dir.path().to_path_buf()));
        assert_eq!(result.port(), Some(6123));
    }

    #[test]
    fn test_session_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let remote = Url::parse("http://localhost:5001").unwrap();
        let ctx = OpContext::new(remote, Some(dir.path().to_path_buf())).unwrap();

        assert!(matches!(ctx.session(), Err(SessionError::NotLoggedIn)));
    }

    #[test]
    fn test_garbage_session_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = Some(dir.path().to_path_buf());
        AppState::write_session_token(path.clone(), "not-a-token").unwrap();

        let remote = Url::parse("http://localhost:5001").unwrap();
        let ctx = OpContext::new(remote, path.clone()).unwrap();
        assert!(matches!(ctx.session(), Err(SessionError::Expired)));
        assert_eq!(AppState::read_session_token(path).unwrap(), None);
    }
}
