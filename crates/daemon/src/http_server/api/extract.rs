//! Request extractors shared by the API handlers.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use common::prelude::{ErrorCode, ErrorEnvelope};

use super::error::{envelope_response, NOT_ACCESSIBLE};
use crate::auth::TokenError;
use crate::ServiceState;

/// The authenticated caller, taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PrincipalRejection {
    #[error("missing bearer token")]
    Missing,
    #[error("invalid bearer token: {0}")]
    Invalid(#[from] TokenError),
}

impl IntoResponse for PrincipalRejection {
    fn into_response(self) -> Response {
        match self {
            PrincipalRejection::Missing => envelope_response(ErrorEnvelope::new(
                ErrorCode::Unauthorized,
                "Access token required.",
            )),
            PrincipalRejection::Invalid(err) => {
                tracing::debug!(error = %err, "rejecting bearer token");
                envelope_response(ErrorEnvelope::forbidden("Invalid or expired token."))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<ServiceState> for Principal {
    type Rejection = PrincipalRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServiceState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| PrincipalRejection::Missing)?;

        let claims = state.tokens().verify(bearer.token())?;
        Ok(Principal {
            user_id: claims.user_id,
            username: claims.username,
        })
    }
}

/// A path id. Anything that isn't a UUID can't name a resource, so it is
/// answered like a missing one.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || envelope_response(ErrorEnvelope::not_found(NOT_ACCESSIBLE));
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;
        Uuid::parse_str(&raw).map(ResourceId).map_err(|_| not_found())
    }
}

/// `Json` whose rejections are validation envelopes.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> Response {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a JSON body with content-type application/json.".to_string()
        }
        other => other.body_text(),
    };
    envelope_response(ErrorEnvelope::validation(message))
}
