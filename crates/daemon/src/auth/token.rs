//! Signed, time-limited access tokens.
//!
//! Tokens use the JWT compact form (`header.payload.signature`, base64url
//! without padding) signed with HMAC-SHA256. They are stateless: a token is
//! valid iff its signature checks out under our secret and `now < exp`.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::OffsetDateTime;
use uuid::Uuid;

use common::prelude::Claims;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const SECRET_LEN: usize = 32;

const ALGORITHM: &str = "HS256";
const MAX_TOKEN_LEN: usize = 4096;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Fresh random signing secret.
    pub fn generate_secret() -> Result<Vec<u8>, TokenError> {
        let mut secret = vec![0u8; SECRET_LEN];
        getrandom::getrandom(&mut secret).map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok(secret)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, username, OffsetDateTime::now_utc())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        username: &str,
        now: OffsetDateTime,
    ) -> Result<IssuedToken, TokenError> {
        let iat = now.unix_timestamp();
        // an out-of-range ttl saturates instead of wrapping into the past
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .unwrap_or(i64::MAX);
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat,
            exp,
        };

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let header_part = encode_json(&header)?;
        let payload_part = encode_json(&claims)?;
        let signing_input = format!("{}.{}", header_part, payload_part);

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{}.{}", signing_input, sig_part),
            claims,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(TokenError::Malformed("token exceeds max length"));
        }

        let mut parts = token.split('.');
        let (header_part, payload_part, sig_part) = match (parts.next(), parts.next(), parts.next())
        {
            (Some(h), Some(p), Some(s)) if parts.next().is_none() => (h, p, s),
            _ => return Err(TokenError::Malformed("expected three segments")),
        };

        let header: Header = decode_json(header_part)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed("unsupported algorithm"));
        }

        let sig = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| TokenError::Malformed("signature is not base64url"))?;
        let mut mac = self.mac()?;
        mac.update(header_part.as_bytes());
        mac.update(b".");
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&sig)
            .map_err(|_| TokenError::InvalidSignature)?;

        let claims: Claims = decode_json(payload_part)?;
        if claims.is_expired_at(now.unix_timestamp()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TokenError::Signing(e.to_string()))
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let bytes = serde_json::to_vec(value).map_err(|e| TokenError::Signing(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn decode_json<T: for<'de> Deserialize<'de>>(part: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|_| TokenError::Malformed("segment is not base64url"))?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed("segment is not valid json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn test_issue_then_verify() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let issued = tokens.issue(user_id, "ada").unwrap();

        let claims = tokens.verify(&issued.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn test_payload_readable_by_clients() {
        let issued = service().issue(Uuid::new_v4(), "ada").unwrap();
        let decoded = common::session::decode_claims(&issued.token).unwrap();
        assert_eq!(decoded, issued.claims);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service();
        let now = OffsetDateTime::now_utc();
        let issued = tokens.issue_at(Uuid::new_v4(), "ada", now).unwrap();

        let just_before = now + time::Duration::seconds(3599);
        assert!(tokens.verify_at(&issued.token, just_before).is_ok());

        let at_exp = now + time::Duration::seconds(3600);
        assert_eq!(
            tokens.verify_at(&issued.token, at_exp),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let tokens = TokenService::new(
            b"0123456789abcdef0123456789abcdef".to_vec(),
            Duration::from_secs(u64::MAX),
        );
        let issued = tokens.issue(Uuid::new_v4(), "ada").unwrap();
        assert_eq!(issued.claims.exp, i64::MAX);
        assert!(tokens.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = service().issue(Uuid::new_v4(), "ada").unwrap();
        let other = TokenService::new(b"another secret".to_vec(), DEFAULT_TOKEN_TTL);
        assert_eq!(
            other.verify(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = service();
        let issued = tokens.issue(Uuid::new_v4(), "ada").unwrap();
        let forged = tokens.issue(Uuid::new_v4(), "mallory").unwrap();

        let parts: Vec<&str> = issued.token.split('.').collect();
        let forged_payload = forged.token.split('.').nth(1).unwrap();
        let spliced = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert_eq!(tokens.verify(&spliced), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        for garbage in ["", "abc", "a.b", "a.b.c.d", "!!.??.**", "e30.e30.e30"] {
            assert!(
                matches!(tokens.verify(garbage), Err(TokenError::Malformed(_))),
                "expected malformed for {garbage:?}"
            );
        }
    }
}
