//! Row-level data accessors
//!
//! Each function is one parameterized statement against one table. They take
//! any Postgres executor: `&PgPool` for reads outside a transaction, or the
//! transaction's `&mut PgConnection` inside [`Store::exec_tx`](super::store::Store::exec_tx).

use sqlx::PgExecutor;

use super::error::LedgerError;
use super::models::{Account, Entry, Transfer};

/// Account table operations
pub struct AccountRepository;

impl AccountRepository {
    /// Get account by ID
    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Account, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Account>(
            "SELECT id, owner, balance, currency, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| LedgerError::from_lookup(e, "account", id))
    }

    /// Create a new account
    pub async fn create<'e, E>(
        executor: E,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let account = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (owner, balance, currency) VALUES ($1, $2, $3)
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(owner)
        .bind(balance)
        .bind(currency)
        .fetch_one(executor)
        .await?;

        Ok(account)
    }

    /// List accounts ordered by ID, optionally for one owner
    pub async fn list<'e, E>(
        executor: E,
        owner: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let accounts = sqlx::query_as::<_, Account>(
            r#"SELECT id, owner, balance, currency, created_at FROM accounts
               WHERE ($1::VARCHAR IS NULL OR owner = $1)
               ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(accounts)
    }

    /// Add `delta` to the stored balance and return the updated row.
    ///
    /// A single UPDATE: the read-modify-write happens inside the storage
    /// engine under the row lock, so concurrent callers on one account
    /// serialize instead of losing updates.
    pub async fn add_balance<'e, E>(executor: E, id: i64, delta: i64) -> Result<Account, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Account>(
            r#"UPDATE accounts SET balance = balance + $1 WHERE id = $2
               RETURNING id, owner, balance, currency, created_at"#,
        )
        .bind(delta)
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| LedgerError::from_lookup(e, "account", id))
    }
}

/// Entry table operations (append-only)
pub struct EntryRepository;

impl EntryRepository {
    pub async fn create<'e, E>(executor: E, account_id: i64, amount: i64) -> Result<Entry, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let entry = sqlx::query_as::<_, Entry>(
            r#"INSERT INTO entries (account_id, amount) VALUES ($1, $2)
               RETURNING id, account_id, amount, created_at"#,
        )
        .bind(account_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Entry, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Entry>(
            "SELECT id, account_id, amount, created_at FROM entries WHERE id = $1",
        )
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| LedgerError::from_lookup(e, "entry", id))
    }

    /// Entries of one account, oldest first
    pub async fn list_by_account<'e, E>(
        executor: E,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let entries = sqlx::query_as::<_, Entry>(
            r#"SELECT id, account_id, amount, created_at FROM entries
               WHERE account_id = $1
               ORDER BY id LIMIT $2 OFFSET $3"#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }
}

/// Transfer table operations (append-only)
pub struct TransferRepository;

impl TransferRepository {
    pub async fn create<'e, E>(
        executor: E,
        from_account_id: i64,
        to_account_id: i64,
        amount: i64,
    ) -> Result<Transfer, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let transfer = sqlx::query_as::<_, Transfer>(
            r#"INSERT INTO transfers (from_account_id, to_account_id, amount)
               VALUES ($1, $2, $3)
               RETURNING id, from_account_id, to_account_id, amount, created_at"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;

        Ok(transfer)
    }

    pub async fn get<'e, E>(executor: E, id: i64) -> Result<Transfer, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers WHERE id = $1"#,
        )
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| LedgerError::from_lookup(e, "transfer", id))
    }

    /// Transfers from `from_account_id` to `to_account_id`, oldest first
    pub async fn list_between<'e, E>(
        executor: E,
        from_account_id: i64,
        to_account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError>
    where
        E: PgExecutor<'e>,
    {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"SELECT id, from_account_id, to_account_id, amount, created_at
               FROM transfers
               WHERE from_account_id = $1 AND to_account_id = $2
               ORDER BY id LIMIT $3 OFFSET $4"#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(transfers)
    }
}
