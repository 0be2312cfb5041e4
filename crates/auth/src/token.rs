use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{AuthClaims, TokenValidationError, validate_claims};

/// Issues and validates bearer tokens.
///
/// Trait seam so the HTTP layer and the ledger service stay decoupled from
/// the signing algorithm.
pub trait TokenService: Send + Sync {
    fn issue(&self, username: &str, email: &str) -> Result<String, TokenError>;
    fn validate(&self, token: &str) -> Result<AuthClaims, TokenError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    /// Malformed token or bad signature. Intentionally carries no detail.
    #[error("invalid token")]
    Invalid,

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// HS256 implementation of [`TokenService`].
pub struct Hs256TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }
}

impl TokenService for Hs256TokenService {
    fn issue(&self, username: &str, email: &str) -> Result<String, TokenError> {
        let claims = AuthClaims::issue(username, email, Utc::now(), self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    fn validate(&self, token: &str) -> Result<AuthClaims, TokenError> {
        // Signature check here; the time window is checked by
        // `validate_claims` so expiry logic lives in one place.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = decode::<AuthClaims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;
        validate_claims(&data.claims, Utc::now())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl_minutes: i64) -> Hs256TokenService {
        Hs256TokenService::new(b"test-secret", Duration::minutes(ttl_minutes))
    }

    #[test]
    fn issue_then_validate_roundtrip() {
        let svc = service(10);
        let token = svc.issue("alice", "alice@example.com").unwrap();
        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.email, "alice@example.com");
    }

    #[test]
    fn garbage_token_rejected() {
        let svc = service(10);
        assert!(matches!(svc.validate("not-a-token"), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_from_other_secret_rejected() {
        let svc = service(10);
        let other = Hs256TokenService::new(b"other-secret", Duration::minutes(10));
        let token = other.issue("alice", "alice@example.com").unwrap();
        assert!(matches!(svc.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn expired_token_rejected() {
        let svc = service(-1);
        let token = svc.issue("alice", "alice@example.com").unwrap();
        assert!(matches!(
            svc.validate(&token),
            Err(TokenError::Claims(TokenValidationError::InvalidTimeWindow))
        ));
    }
}
