use serde::{Deserialize, Serialize};

use coffer_core::{DomainError, DomainResult};

/// Identifier of an account (store-generated, monotonically increasing).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A ledger account: identity plus a non-negative integer balance.
///
/// # Invariants
/// - `balance` is never negative.
/// - `username` and `email` are globally unique (store-enforced).
/// - `password_hash` is an opaque PHC string, never the cleartext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub balance: i64,
}

/// Fields required to create an account. Balance always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Normalize and validate registration identity fields.
///
/// Usernames are trimmed; emails are trimmed and lowercased so lookups are
/// case-insensitive at the edge rather than in every query.
pub fn normalize_identity(username: &str, email: &str) -> DomainResult<(String, String)> {
    let username = username.trim();
    if username.is_empty() {
        return Err(DomainError::validation("username cannot be empty"));
    }

    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }

    Ok((username.to_string(), email))
}

/// Normalize an email for lookup (trim + lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_trimmed_and_email_lowercased() {
        let (username, email) = normalize_identity("  alice ", " Alice@Example.COM ").unwrap();
        assert_eq!(username, "alice");
        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn empty_username_rejected() {
        let err = normalize_identity("   ", "alice@example.com").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn email_without_at_rejected() {
        let err = normalize_identity("alice", "alice.example.com").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
