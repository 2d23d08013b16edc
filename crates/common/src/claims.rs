use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every access token.
///
/// Only the identity is carried; credentials never are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub username: String,
    /// Issued-at (unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// A token is expired from the second its `exp` is reached.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims {
            user_id: Uuid::new_v4(),
            username: "ada".into(),
            iat: 100,
            exp: 200,
        };
        assert!(!claims.is_expired_at(199));
        assert!(claims.is_expired_at(200));
        assert!(claims.is_expired_at(201));
    }

    #[test]
    fn test_payload_uses_camel_case_user_id() {
        let claims = Claims {
            user_id: Uuid::nil(),
            username: "ada".into(),
            iat: 1,
            exp: 2,
        };
        let value = serde_json::to_value(&claims).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["exp", "iat", "userId", "username"]);
    }
}
