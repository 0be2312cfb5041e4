//! Postgres-backed account store.
//!
//! Every balance mutation runs in an explicit transaction with row-level
//! locks. Dropping a `sqlx::Transaction` before commit rolls back, so all
//! exit paths (including `?` propagation) leave no partial writes.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use coffer_accounts::{Account, AccountId, AccountStore, NewAccount, ledger};
use coffer_core::{DomainError, DomainResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id            BIGSERIAL PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    balance       BIGINT NOT NULL DEFAULT 0 CHECK (balance >= 0)
)
"#;

pub struct PgAccountStore {
    pool: Arc<PgPool>,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the accounts table if it does not exist yet.
    pub async fn migrate(&self) -> DomainResult<()> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(map_sqlx_err)?;
        tracing::debug!("accounts schema ensured");
        Ok(())
    }
}

fn map_sqlx_err(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db) = err {
        // 23505 = unique_violation (username or email already taken).
        if db.code().as_deref() == Some("23505") {
            return DomainError::conflict("username or email already registered");
        }
    }
    DomainError::storage(err.to_string())
}

fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: AccountId::from_raw(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        balance: row.try_get("balance")?,
    })
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, balance \
             FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.as_ref()
            .map(account_from_row)
            .transpose()
            .map_err(map_sqlx_err)
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> DomainResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, balance \
             FROM accounts WHERE username = $1 OR email = $2 LIMIT 1",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx_err)?;

        row.as_ref()
            .map(account_from_row)
            .transpose()
            .map_err(map_sqlx_err)
    }

    async fn create(&self, account: NewAccount) -> DomainResult<Account> {
        let row = sqlx::query(
            "INSERT INTO accounts (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, balance",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx_err)?;

        account_from_row(&row).map_err(map_sqlx_err)
    }

    async fn list(&self) -> DomainResult<Vec<Account>> {
        let rows = sqlx::query(
            "SELECT id, username, email, password_hash, balance \
             FROM accounts ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.iter()
            .map(account_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlx_err)
    }

    async fn deposit(&self, email: &str, amount: i64) -> DomainResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let row = sqlx::query("SELECT id, balance FROM accounts WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        let row = row.ok_or(DomainError::NotFound)?;

        let id: i64 = row.try_get("id").map_err(map_sqlx_err)?;
        let balance: i64 = row.try_get("balance").map_err(map_sqlx_err)?;

        let new_balance = ledger::deposit(balance, amount)?;

        sqlx::query("UPDATE accounts SET balance = $1 WHERE id = $2")
            .bind(new_balance)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(new_balance)
    }

    async fn transfer(
        &self,
        sender_email: &str,
        receiver_email: &str,
        amount: i64,
    ) -> DomainResult<(i64, i64)> {
        if sender_email == receiver_email {
            return Err(DomainError::validation(
                "cannot transfer to the same account",
            ));
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        // Lock both rows in one statement, ordered by id: deterministic
        // lock order, so concurrent opposing transfers cannot deadlock.
        let rows = sqlx::query(
            "SELECT id, email, balance FROM accounts \
             WHERE email IN ($1, $2) ORDER BY id FOR UPDATE",
        )
        .bind(sender_email)
        .bind(receiver_email)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        let mut sender: Option<(i64, i64)> = None;
        let mut receiver: Option<(i64, i64)> = None;
        for row in &rows {
            let id: i64 = row.try_get("id").map_err(map_sqlx_err)?;
            let email: String = row.try_get("email").map_err(map_sqlx_err)?;
            let balance: i64 = row.try_get("balance").map_err(map_sqlx_err)?;
            if email == sender_email {
                sender = Some((id, balance));
            } else if email == receiver_email {
                receiver = Some((id, balance));
            }
        }

        let (Some((sender_id, sender_balance)), Some((receiver_id, receiver_balance))) =
            (sender, receiver)
        else {
            // Transaction drops here: rollback, nothing written.
            return Err(DomainError::NotFound);
        };

        let (new_sender, new_receiver) =
            ledger::transfer(sender_balance, receiver_balance, amount)?;

        sqlx::query("UPDATE accounts SET balance = $1 WHERE id = $2")
            .bind(new_sender)
            .bind(sender_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        sqlx::query("UPDATE accounts SET balance = $1 WHERE id = $2")
            .bind(new_receiver)
            .bind(receiver_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Ok((new_sender, new_receiver))
    }
}
