//! Rendering of failures as `{code, message}` envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use common::prelude::{ErrorCode, ErrorEnvelope};

use crate::access::ResourceError;

/// Body used for both missing and foreign resources.
pub const NOT_ACCESSIBLE: &str = "Resource not found or not accessible.";

pub fn envelope_response(envelope: ErrorEnvelope) -> Response {
    let status =
        StatusCode::from_u16(envelope.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    envelope_with_status(status, envelope)
}

pub fn envelope_with_status(status: StatusCode, envelope: ErrorEnvelope) -> Response {
    (status, Json(envelope)).into_response()
}

/// Log `err` and answer with a generic internal error.
pub fn internal_error(err: &dyn std::fmt::Display, context: &str) -> Response {
    tracing::error!(error = %err, "{}", context);
    envelope_response(ErrorEnvelope::internal())
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        match self {
            ResourceError::Validation(message) => {
                envelope_response(ErrorEnvelope::validation(message))
            }
            ResourceError::NotFound => envelope_response(ErrorEnvelope::not_found(NOT_ACCESSIBLE)),
            ResourceError::Forbidden => {
                envelope_response(ErrorEnvelope::new(ErrorCode::Forbidden, NOT_ACCESSIBLE))
            }
            ResourceError::Database(err) => internal_error(&err, "resource store failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_statuses() {
        let cases = [
            (ResourceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ResourceError::NotFound, StatusCode::NOT_FOUND),
            (ResourceError::Forbidden, StatusCode::FORBIDDEN),
            (
                ResourceError::Database(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
