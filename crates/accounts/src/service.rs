use std::sync::Arc;

use coffer_auth::{PasswordVault, TokenService};
use coffer_core::{DomainError, DomainResult};

use crate::account::{Account, NewAccount, normalize_email, normalize_identity};
use crate::store::AccountStore;

/// Outcome of a successful registration or login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub username: String,
    pub email: String,
}

/// Outcome of a successful transfer: both updated balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
    pub sender_balance: i64,
    pub receiver_balance: i64,
}

/// The ledger service: every operation the API exposes, with invariants
/// enforced against an injected [`AccountStore`].
///
/// No global state: the store handle and auth collaborators are passed in
/// at construction and shared per request via `Arc`.
pub struct LedgerService {
    store: Arc<dyn AccountStore>,
    passwords: PasswordVault,
    tokens: Arc<dyn TokenService>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn AccountStore>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            store,
            passwords: PasswordVault::new(),
            tokens,
        }
    }

    /// Register a new account with balance 0 and issue a token for it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<IssuedToken> {
        let (username, email) = normalize_identity(username, email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        if self
            .store
            .find_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("user already exists"));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let account = self
            .store
            .create(NewAccount {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(account_id = %account.id, "account registered");
        self.issue_token(&account)
    }

    /// Authenticate by email + password; returns a token plus identity.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let email = normalize_email(email);

        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !self.passwords.verify(password, &account.password_hash) {
            return Err(DomainError::Unauthorized);
        }

        tracing::debug!(account_id = %account.id, "login verified");
        self.issue_token(&account)
    }

    /// Atomically add `amount` to the account's balance.
    pub async fn deposit(&self, email: &str, amount: i64) -> DomainResult<i64> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount);
        }

        let email = normalize_email(email);
        let balance = self.store.deposit(&email, amount).await?;
        tracing::info!(%email, amount, balance, "deposit applied");
        Ok(balance)
    }

    /// Atomically move `amount` from sender to receiver.
    pub async fn transfer(
        &self,
        sender_email: &str,
        receiver_email: &str,
        amount: i64,
    ) -> DomainResult<TransferOutcome> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount);
        }

        let sender = normalize_email(sender_email);
        let receiver = normalize_email(receiver_email);
        if sender == receiver {
            return Err(DomainError::validation(
                "cannot transfer to the same account",
            ));
        }

        let (sender_balance, receiver_balance) =
            self.store.transfer(&sender, &receiver, amount).await?;

        tracing::info!(
            sender_email = %sender,
            receiver_email = %receiver,
            amount,
            "transfer applied"
        );

        Ok(TransferOutcome {
            sender_balance,
            receiver_balance,
        })
    }

    /// Look up an account by email.
    pub async fn balance(&self, email: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        self.store
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// All accounts, ordered by id.
    pub async fn list_accounts(&self) -> DomainResult<Vec<Account>> {
        self.store.list().await
    }

    fn issue_token(&self, account: &Account) -> DomainResult<IssuedToken> {
        let access_token = self
            .tokens
            .issue(&account.username, &account.email)
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            username: account.username.clone(),
            email: account.email.clone(),
        })
    }
}
