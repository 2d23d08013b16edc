use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::prelude::{ErrorCode, ErrorEnvelope};

use crate::auth::{verify_password, TokenError};
use crate::database::models::User;
use crate::http_server::api::client::ApiRequest;
use crate::http_server::api::error::{envelope_response, internal_error};
use crate::http_server::api::extract::ApiJson;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: LoggedInUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedInUser {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, LoginError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    // unknown email and wrong password answer the same way
    let user = User::by_email(email, state.database())
        .await?
        .ok_or(LoginError::InvalidCredentials)?;

    let hash = user.password_hash.clone();
    let password = req.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&hash, &password)).await?;
    if !matches {
        tracing::info!(user_id = %user.user_id, "login rejected");
        return Err(LoginError::InvalidCredentials);
    }

    let issued = state.tokens().issue(*user.user_id, &user.username)?;
    tracing::info!(user_id = %user.user_id, "user logged in");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            message: "Login successful!".to_string(),
            access_token: issued.token,
            user: LoggedInUser {
                user_id: *user.user_id,
                username: user.username,
                email: user.email,
            },
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("email and password are required")]
    MissingFields,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token error: {0}")]
    Token(#[from] TokenError),
    #[error("password check task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::MissingFields => envelope_response(ErrorEnvelope::validation(
                "Email and password are required.",
            )),
            LoginError::InvalidCredentials => envelope_response(ErrorEnvelope::new(
                ErrorCode::Unauthorized,
                "Invalid credentials.",
            )),
            LoginError::Token(err) => internal_error(&err, "login failed"),
            LoginError::Join(err) => internal_error(&err, "login failed"),
            LoginError::Database(err) => internal_error(&err, "login failed"),
        }
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/auth/login")?;
        Ok(client.post(full_url).json(&self))
    }
}
