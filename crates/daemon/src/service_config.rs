use std::path::PathBuf;
use std::time::Duration;

use crate::ai::AiConfig;

/// Fully-resolved runtime configuration for the daemon.
#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the API HTTP server
    pub api_port: u16,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,

    // data store configuration
    /// a path to a sqlite database, if not set then an
    ///  in-memory database will be used
    pub sqlite_path: Option<PathBuf>,

    // auth
    /// token signing secret, if not set then an ephemeral
    ///  one is generated and tokens won't survive a restart
    pub token_secret: Option<Vec<u8>>,
    pub token_ttl: Duration,

    // text actions
    pub ai: AiConfig,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 5001,
            cors_origins: vec!["http://localhost:3000".to_string()],
            sqlite_path: None,
            token_secret: None,
            token_ttl: crate::auth::token::DEFAULT_TOKEN_TTL,
            ai: AiConfig::default(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
