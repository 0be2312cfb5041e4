//! In-memory account store (dev mode and black-box tests).

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use coffer_accounts::{Account, AccountId, AccountStore, NewAccount, ledger};
use coffer_core::{DomainError, DomainResult};

/// Mutex-guarded map store.
///
/// The single lock serializes conflicting mutations, so the observable
/// semantics match the row-locked Postgres path: no mutation sees a stale
/// balance, and a failed transfer writes nothing.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl Inner {
    fn by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.email == email)
    }

    fn id_by_email(&self, email: &str) -> Option<i64> {
        self.by_email(email).map(|a| a.id.as_i64())
    }
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let inner = self.inner.lock().expect("account store lock poisoned");
        Ok(inner.by_email(email).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DomainResult<Option<Account>> {
        let inner = self.inner.lock().expect("account store lock poisoned");
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username || a.email == email)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> DomainResult<Account> {
        let mut inner = self.inner.lock().expect("account store lock poisoned");

        if inner
            .accounts
            .values()
            .any(|a| a.username == account.username || a.email == account.email)
        {
            return Err(DomainError::conflict(
                "username or email already registered",
            ));
        }

        inner.next_id += 1;
        let created = Account {
            id: AccountId::from_raw(inner.next_id),
            username: account.username,
            email: account.email,
            password_hash: account.password_hash,
            balance: 0,
        };
        inner.accounts.insert(created.id.as_i64(), created.clone());
        Ok(created)
    }

    async fn list(&self) -> DomainResult<Vec<Account>> {
        let inner = self.inner.lock().expect("account store lock poisoned");
        Ok(inner.accounts.values().cloned().collect())
    }

    async fn deposit(&self, email: &str, amount: i64) -> DomainResult<i64> {
        let mut inner = self.inner.lock().expect("account store lock poisoned");

        let id = inner.id_by_email(email).ok_or(DomainError::NotFound)?;
        let account = inner.accounts.get_mut(&id).ok_or(DomainError::NotFound)?;

        let new_balance = ledger::deposit(account.balance, amount)?;
        account.balance = new_balance;
        Ok(new_balance)
    }

    async fn transfer(
        &self,
        sender_email: &str,
        receiver_email: &str,
        amount: i64,
    ) -> DomainResult<(i64, i64)> {
        let mut inner = self.inner.lock().expect("account store lock poisoned");

        let sender_id = inner.id_by_email(sender_email).ok_or(DomainError::NotFound)?;
        let receiver_id = inner
            .id_by_email(receiver_email)
            .ok_or(DomainError::NotFound)?;
        if sender_id == receiver_id {
            return Err(DomainError::validation(
                "cannot transfer to the same account",
            ));
        }

        let sender_balance = inner.accounts[&sender_id].balance;
        let receiver_balance = inner.accounts[&receiver_id].balance;

        // Validate both new balances before touching either account.
        let (new_sender, new_receiver) =
            ledger::transfer(sender_balance, receiver_balance, amount)?;

        inner
            .accounts
            .get_mut(&sender_id)
            .expect("sender row vanished under lock")
            .balance = new_sender;
        inner
            .accounts
            .get_mut(&receiver_id)
            .expect("receiver row vanished under lock")
            .balance = new_receiver;

        Ok((new_sender, new_receiver))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_zero_balance() {
        let store = InMemoryAccountStore::new();
        let a = store.create(new_account("alice", "alice@example.com")).await.unwrap();
        let b = store.create(new_account("bob", "bob@example.com")).await.unwrap();

        assert_eq!(a.balance, 0);
        assert!(b.id > a.id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_identity_is_a_conflict() {
        let store = InMemoryAccountStore::new();
        store.create(new_account("alice", "alice@example.com")).await.unwrap();

        let err = store
            .create(new_account("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = store
            .create(new_account("other", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deposit_to_unknown_account_is_not_found() {
        let store = InMemoryAccountStore::new();
        let err = store.deposit("ghost@example.com", 10).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn failed_transfer_leaves_both_balances_untouched() {
        let store = InMemoryAccountStore::new();
        store.create(new_account("alice", "alice@example.com")).await.unwrap();
        store.create(new_account("bob", "bob@example.com")).await.unwrap();
        store.deposit("alice@example.com", 50).await.unwrap();

        let err = store
            .transfer("alice@example.com", "bob@example.com", 60)
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::InsufficientFunds);

        let alice = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        let bob = store.find_by_email("bob@example.com").await.unwrap().unwrap();
        assert_eq!(alice.balance, 50);
        assert_eq!(bob.balance, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_transfers_never_overdraw() {
        let store = Arc::new(InMemoryAccountStore::new());
        store.create(new_account("alice", "alice@example.com")).await.unwrap();
        store.create(new_account("bob", "bob@example.com")).await.unwrap();
        store.deposit("alice@example.com", 50).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .transfer("alice@example.com", "bob@example.com", 10)
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        let alice = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        let bob = store.find_by_email("bob@example.com").await.unwrap().unwrap();

        // Only 5 of the 10 transfers can be funded from a balance of 50.
        assert_eq!(successes, 5);
        assert_eq!(alice.balance, 0);
        assert_eq!(bob.balance, 50);
        assert!(alice.balance >= 0);
    }
}
