use std::net::SocketAddr;

use http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // log level for http tracing
    pub log_level: tracing::Level,
    // Origins allowed to make cross-origin requests
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn new(listen_addr: SocketAddr, cors_origins: &[String]) -> Result<Self, ConfigError> {
        let cors_origins = cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim_end_matches('/'))
                    .map_err(|_| ConfigError::CorsOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            "Creating HTTP server Config: listen_addr={}, cors_origins={:?}",
            listen_addr,
            cors_origins
        );
        Ok(Self {
            listen_addr,
            log_level: tracing::Level::INFO,
            cors_origins,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid CORS origin: {0}")]
    CorsOrigin(String),
    #[error("Invalid Socket Address: {0}")]
    ListenAddr(#[from] std::net::AddrParseError),
}
