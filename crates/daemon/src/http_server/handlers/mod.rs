use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use common::prelude::ErrorEnvelope;

use crate::http_server::api::error::envelope_response;

pub async fn not_found_handler() -> Response {
    envelope_response(ErrorEnvelope::not_found("not found"))
}

/// Plain-text banner on `/`.
pub async fn root_handler() -> Response {
    (StatusCode::OK, "QuillMind backend is running!").into_response()
}
