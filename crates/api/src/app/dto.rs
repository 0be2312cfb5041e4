//! Request/response DTOs.
//!
//! Field names here are the wire-compatibility surface; change them and
//! every client breaks.

use serde::{Deserialize, Serialize};

use coffer_accounts::Account;

pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub email: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub sender_email: String,
    pub receiver_email: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub username: String,
    pub email: String,
}

/// Public view of an account. Deliberately omits the password hash.
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub balance: i64,
}

impl From<Account> for UserOut {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.as_i64(),
            username: account.username,
            email: account.email,
            balance: account.balance,
        }
    }
}
