pub mod utils;

use std::net::SocketAddr;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::http_server;
use crate::service_state::StateSetupError;
use crate::{ServiceConfig, ServiceState};

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
const LOG_FILE_NAME: &str = "quillmind.log";

const EXIT_SETUP_FAILED: i32 = 3;
const EXIT_SHUTDOWN_STALLED: i32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("error creating server state: {0}")]
    State(#[from] StateSetupError),
    #[error("invalid http server configuration: {0}")]
    HttpConfig(#[from] http_server::ConfigError),
}

/// Handle for shutting down a running service.
///
/// Dropping it does not stop the service.
pub struct ShutdownHandle {
    graceful_waiter: JoinHandle<()>,
    handles: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<()>,
}

impl ShutdownHandle {
    /// Block until the service shuts down (via signal or [`Self::shutdown`]).
    ///
    /// Returns `false` if the servers did not stop within the final timeout.
    pub async fn wait(self) -> bool {
        let _ = self.graceful_waiter.await;

        match timeout(FINAL_SHUTDOWN_TIMEOUT, join_all(self.handles)).await {
            Ok(_) => true,
            Err(_) => {
                tracing::error!(
                    "failed to shut down within {} seconds",
                    FINAL_SHUTDOWN_TIMEOUT.as_secs()
                );
                false
            }
        }
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

fn env_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Install the global subscriber: compact stdout, plus a daily-rolling file
/// when a log directory is configured.
///
/// The returned guards flush the non-blocking writers and must outlive the
/// service.
fn init_logging(service_config: &ServiceConfig) -> Vec<WorkerGuard> {
    let mut guards = Vec::new();

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);
    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(env_filter(service_config.log_level));

    let file_layer = service_config.log_dir.as_ref().and_then(|log_dir| {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: failed to create log directory {:?}: {}", log_dir, e);
            return None;
        }
        let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
        let (file_writer, file_guard) = tracing_appender::non_blocking(appender);
        guards.push(file_guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter(service_config.log_level)),
        )
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    utils::register_panic_logger();
    utils::report_build_info();

    guards
}

/// Create state and spawn the API server.
pub async fn start_service(
    service_config: &ServiceConfig,
) -> Result<(ServiceState, ShutdownHandle), ServiceError> {
    let state = ServiceState::from_config(service_config).await?;

    let api_addr = SocketAddr::from(([0, 0, 0, 0], service_config.api_port));
    let api_config = http_server::Config::new(api_addr, &service_config.cors_origins)?;

    let (graceful_waiter, shutdown_tx, shutdown_rx) = utils::graceful_shutdown_blocker();

    let api_state = state.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = http_server::run_api(api_config, api_state, shutdown_rx).await {
            tracing::error!("API server error: {}", e);
        }
    });

    tracing::info!(
        addr = %api_addr,
        persistent = service_config.sqlite_path.is_some(),
        text_actions = state.ai().is_configured(),
        "quillmind API running"
    );

    let handle = ShutdownHandle {
        graceful_waiter,
        handles: vec![api_handle],
        shutdown_tx,
    };
    Ok((state, handle))
}

/// Run the daemon in the foreground until a shutdown signal arrives.
///
/// Exits the process on setup failure or a stalled shutdown.
pub async fn spawn_service(service_config: &ServiceConfig) {
    let _guards = init_logging(service_config);

    let handle = match start_service(service_config).await {
        Ok((_, handle)) => handle,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(EXIT_SETUP_FAILED);
        }
    };

    if !handle.wait().await {
        std::process::exit(EXIT_SHUTDOWN_STALLED);
    }
}
