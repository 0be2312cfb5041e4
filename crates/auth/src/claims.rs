use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token claims model (transport-agnostic).
///
/// This is the minimal set of claims coffer issues and expects back once a
/// token has been decoded/verified by the signing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject: the account's username.
    pub sub: String,

    /// Email of the account the token was issued to.
    pub email: String,

    /// Issued-at (seconds since the Unix epoch).
    pub iat: i64,

    /// Expiration (seconds since the Unix epoch).
    pub exp: i64,
}

impl AuthClaims {
    /// Build claims for a freshly authenticated account.
    pub fn issue(username: &str, email: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: username.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate token claims.
///
/// Note: this validates the *claims* only. Signature verification and
/// decoding are intentionally outside this module.
pub fn validate_claims(claims: &AuthClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    let now = now.timestamp();
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_at(now: DateTime<Utc>, ttl_minutes: i64) -> AuthClaims {
        AuthClaims::issue("alice", "alice@example.com", now, Duration::minutes(ttl_minutes))
    }

    #[test]
    fn fresh_claims_validate() {
        let now = Utc::now();
        let claims = claims_at(now, 30);
        assert_eq!(validate_claims(&claims, now), Ok(()));
    }

    #[test]
    fn expired_claims_rejected() {
        let now = Utc::now();
        let claims = claims_at(now, 30);
        let later = now + Duration::minutes(31);
        assert_eq!(validate_claims(&claims, later), Err(TokenValidationError::Expired));
    }

    #[test]
    fn future_issued_claims_rejected() {
        let now = Utc::now();
        let claims = claims_at(now + Duration::minutes(5), 30);
        assert_eq!(validate_claims(&claims, now), Err(TokenValidationError::NotYetValid));
    }

    #[test]
    fn inverted_time_window_rejected() {
        let now = Utc::now();
        let mut claims = claims_at(now, 30);
        claims.exp = claims.iat;
        assert_eq!(
            validate_claims(&claims, now),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }
}
