use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tokio::time::timeout;

use super::data_source::StateDataSource;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct Readiness {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[tracing::instrument]
pub async fn handler(data_src: StateDataSource) -> Response {
    let failure = match timeout(HEALTH_CHECK_TIMEOUT, data_src.is_ready()).await {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(err.to_string()),
        Err(_) => Some("readiness check timed out".to_string()),
    };

    match failure {
        None => (
            StatusCode::OK,
            Json(Readiness {
                status: "ok",
                message: None,
            }),
        )
            .into_response(),
        Some(message) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Readiness {
                status: "failure",
                message: Some(message),
            }),
        )
            .into_response(),
    }
}
