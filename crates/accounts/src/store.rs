use async_trait::async_trait;

use coffer_core::DomainResult;

use crate::account::{Account, NewAccount};

/// Contract every account store implementation satisfies.
///
/// Absence is `None`, never an error; uniqueness violations surface as
/// [`coffer_core::DomainError::Conflict`]. The mutation methods are atomic:
/// each reads the current balance(s), validates through [`crate::ledger`],
/// and writes the result inside a single transaction, so no mutation ever
/// observes a stale balance from a concurrent transaction.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DomainResult<Option<Account>>;

    /// Create an account with balance 0.
    async fn create(&self, account: NewAccount) -> DomainResult<Account>;

    /// All accounts, ordered by id.
    async fn list(&self) -> DomainResult<Vec<Account>>;

    /// Atomically add `amount` to the account's balance; returns the new
    /// balance.
    async fn deposit(&self, email: &str, amount: i64) -> DomainResult<i64>;

    /// Atomically debit the sender and credit the receiver; both writes
    /// commit or neither does. Returns `(sender balance, receiver balance)`.
    async fn transfer(
        &self,
        sender_email: &str,
        receiver_email: &str,
        amount: i64,
    ) -> DomainResult<(i64, i64)>;
}
