//! Client-side session state.
//!
//! A client only ever holds the access token; it reads the claims out of it to
//! know who is logged in and when to stop using it. Signature verification is
//! the server's job, so nothing here needs the signing secret.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    pub user_id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub expires_at: i64,
}

impl Session {
    /// Restore a session from a stored token.
    ///
    /// Returns `None` if the token can't be decoded or has already expired,
    /// in which case the caller should discard it.
    pub fn restore(token: &str, now: OffsetDateTime) -> Option<Self> {
        let claims = match decode_claims(token) {
            Some(claims) => claims,
            None => {
                tracing::warn!("discarding stored token that could not be decoded");
                return None;
            }
        };

        if claims.is_expired_at(now.unix_timestamp()) {
            tracing::debug!(user_id = %claims.user_id, "stored token has expired");
            return None;
        }

        Some(Self {
            token: token.to_string(),
            user_id: claims.user_id,
            username: claims.username,
            email: None,
            expires_at: claims.exp,
        })
    }

    /// Attach the email returned alongside the token at login.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now.unix_timestamp() >= self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Read the claims segment of a compact token without checking its signature.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    let (_header, payload, _sig) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
