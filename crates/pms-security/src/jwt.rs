//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use pms_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Unexpected token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: &'static str, actual: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

#[derive(Clone)]
pub struct JwtService {
    secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            secret,
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_access_token(&self, user_id: &Uuid) -> Result<String, JwtError> {
        self.generate_token(user_id, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    pub fn generate_refresh_token(&self, user_id: &Uuid) -> Result<String, JwtError> {
        self.generate_token(user_id, TOKEN_TYPE_REFRESH, self.refresh_token_expiry)
    }

    pub fn generate_pair(&self, user_id: &Uuid) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user_id)?,
            refresh_token: self.generate_refresh_token(user_id)?,
            token_type: "bearer",
        })
    }

    fn generate_token(&self, user_id: &Uuid, token_type: &str, expiry: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::ValidationError(e.to_string()),
        })
    }

    /// Validates a token and checks it was issued with the given type.
    pub fn validate_typed(&self, token: &str, expected: &'static str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType {
                expected,
                actual: claims.token_type,
            });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret".to_string(), 900, 3600)
    }

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = service().generate_access_token(&user_id).unwrap();
        let claims = service().validate_typed(&token, TOKEN_TYPE_ACCESS).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = service().generate_refresh_token(&Uuid::new_v4()).unwrap();
        let err = service().validate_typed(&token, TOKEN_TYPE_ACCESS).unwrap_err();
        assert!(matches!(err, JwtError::WrongTokenType { .. }));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = service().generate_access_token(&Uuid::new_v4()).unwrap();
        let other = JwtService::new("other-secret".to_string(), 900, 3600);
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let expired = JwtService::new("test-secret".to_string(), -3600, -3600);
        let token = expired.generate_access_token(&Uuid::new_v4()).unwrap();
        assert!(matches!(service().validate_token(&token), Err(JwtError::TokenExpired)));
    }
}
