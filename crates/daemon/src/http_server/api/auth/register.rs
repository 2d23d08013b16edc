use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use common::prelude::{ErrorCode, ErrorEnvelope};

use crate::auth::{hash_password, PasswordError};
use crate::database::models::User;
use crate::database::unique_violation;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::error::{envelope_response, internal_error};
use crate::http_server::api::extract::ApiJson;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            user_id: *user.user_id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

pub async fn handler(
    State(state): State<ServiceState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, RegisterError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(RegisterError::MissingFields);
    }

    let password = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let user = User::create(username, email, &password_hash, state.database())
        .await
        .map_err(|err| match unique_violation(&err).as_deref() {
            Some("users.email") => RegisterError::EmailTaken,
            Some("users.username") => RegisterError::UsernameTaken,
            _ => RegisterError::Database(err),
        })?;

    tracing::info!(user_id = %user.user_id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully!".to_string(),
            user: user.into(),
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("username, email and password are required")]
    MissingFields,
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),
    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        match self {
            RegisterError::MissingFields => envelope_response(ErrorEnvelope::validation(
                "Username, email, and password are required.",
            )),
            RegisterError::EmailTaken => envelope_response(ErrorEnvelope::new(
                ErrorCode::Conflict,
                "Email already registered.",
            )),
            RegisterError::UsernameTaken => envelope_response(ErrorEnvelope::new(
                ErrorCode::Conflict,
                "Username already taken.",
            )),
            RegisterError::Password(err) => internal_error(&err, "registration failed"),
            RegisterError::Join(err) => internal_error(&err, "registration failed"),
            RegisterError::Database(err) => internal_error(&err, "registration failed"),
        }
    }
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/auth/register")?;
        Ok(client.post(full_url).json(&self))
    }
}
