//! HS256 トークンの発行と検証。

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::claims::{Claims, Role};

/// AuthError は認証エラーを表す。
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing Authorization header")]
    MissingToken,

    #[error("invalid Authorization header format")]
    InvalidAuthHeader,

    #[error("token issue failed: {0}")]
    IssueFailed(String),
}

/// TokenService は共有シークレットで JWT を発行・検証する。
pub struct TokenService {
    secret: SecretString,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: SecretString, ttl_secs: u64) -> Self {
        Self { secret, ttl_secs }
    }

    /// ログイン成功時にトークンを発行する。
    pub fn issue(
        &self,
        sub: &str,
        user_id: &str,
        name: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        let now = unix_now();
        let claims = Claims {
            sub: sub.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            role,
            exp: now + self.ttl_secs,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::IssueFailed(e.to_string()))
    }

    /// Bearer トークンを検証して Claims を返す。
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;
        Ok(data.claims)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(SecretString::new("test-secret".to_string()), 3600)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = service();
        let token = tokens
            .issue("9f1c2f6e-0000-0000-0000-000000000001", "USR001", "Asha Verma", Role::Admin)
            .unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, "USR001");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = service();
        assert!(matches!(
            tokens.verify("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issued = service()
            .issue("sub", "USR002", "B", Role::Employee)
            .unwrap();
        let other = TokenService::new(SecretString::new("other-secret".to_string()), 3600);
        assert!(other.verify(&issued).is_err());
    }
}
