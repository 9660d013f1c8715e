//! Ledger store: transaction executor and transfer entry point
//!
//! `Store` is cheap to clone (it holds the pool) and is shared by every
//! request task. No application-level locks: concurrent transfers are
//! serialized by Postgres row locks, taken in the order fixed by
//! `TransferTxParams::balance_updates`.

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

use super::error::{ErrorKind, LedgerError};
use super::models::{Account, Entry, Transfer, TransferTxParams, TransferTxResult};
use super::queries::{AccountRepository, EntryRepository, TransferRepository};
use super::transfer::apply_transfer;

#[derive(Clone)]
pub struct Store {
    pool: PgPool,
    tx_timeout: Option<Duration>,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tx_timeout: None,
        }
    }

    /// Abort any transaction whose unit of work runs longer than `timeout`.
    pub fn with_tx_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.tx_timeout = timeout;
        self
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn tx_timeout(&self) -> Option<Duration> {
        self.tx_timeout
    }

    /// Run `unit` inside one database transaction.
    ///
    /// Commits when `unit` returns `Ok`, rolls back otherwise. A failed commit
    /// is [`LedgerError::CommitFailed`]; a failed rollback is
    /// [`LedgerError::RollbackFailed`] carrying the original error too.
    /// Nothing is retried here.
    pub async fn exec_tx<T, F>(&self, unit: F) -> Result<T, LedgerError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, LedgerError>> + Send,
    {
        self.run_tx(self.tx_timeout, unit).await
    }

    /// [`exec_tx`](Self::exec_tx) with a caller-supplied deadline.
    pub async fn exec_tx_with_timeout<T, F>(&self, limit: Duration, unit: F) -> Result<T, LedgerError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, LedgerError>> + Send,
    {
        self.run_tx(Some(limit), unit).await
    }

    async fn run_tx<T, F>(&self, limit: Option<Duration>, unit: F) -> Result<T, LedgerError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, LedgerError>> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let outcome = match limit {
            Some(limit) => match bind_deadline(&mut *tx, limit).await {
                Ok(backend_pid) => match tokio::time::timeout(limit, unit(&mut *tx)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        // The dropped unit may have left a statement running on
                        // the server; the rollback below waits for it.
                        self.cancel_backend(backend_pid, limit).await;
                        Err(LedgerError::Cancelled(limit))
                    }
                },
                Err(e) => Err(e),
            },
            None => unit(&mut *tx).await,
        };

        match outcome {
            Ok(value) => {
                tx.commit().await.map_err(LedgerError::CommitFailed)?;
                Ok(value)
            }
            Err(err) => match tx.rollback().await {
                Ok(()) => Err(err),
                Err(rollback) => {
                    tracing::error!(
                        original = %err,
                        rollback = %rollback,
                        "Rollback failed after aborted transaction"
                    );
                    Err(LedgerError::RollbackFailed {
                        original: Box::new(err),
                        rollback,
                    })
                }
            },
        }
    }

    /// Ask the server to cancel whatever `backend_pid` is executing.
    /// Best effort, bounded by `limit`: if no pool connection is free in
    /// time, the transaction-local `statement_timeout` ends the statement.
    async fn cancel_backend(&self, backend_pid: i32, limit: Duration) {
        let cancel = sqlx::query_scalar::<_, bool>("SELECT pg_cancel_backend($1)")
            .bind(backend_pid)
            .fetch_one(&self.pool);
        match tokio::time::timeout(limit, cancel).await {
            Ok(Ok(_)) => tracing::debug!(backend_pid, "Cancelled timed-out transaction"),
            Ok(Err(e)) => tracing::warn!(backend_pid, "pg_cancel_backend failed: {}", e),
            Err(_) => tracing::warn!(backend_pid, "pg_cancel_backend timed out"),
        }
    }

    /// Move `amount` from one account to another as one atomic unit.
    pub async fn transfer_tx(
        &self,
        params: TransferTxParams,
    ) -> Result<TransferTxResult, LedgerError> {
        self.run_transfer(params, self.tx_timeout).await
    }

    /// [`transfer_tx`](Self::transfer_tx) with a caller-supplied deadline.
    pub async fn transfer_tx_with_timeout(
        &self,
        params: TransferTxParams,
        limit: Duration,
    ) -> Result<TransferTxResult, LedgerError> {
        self.run_transfer(params, Some(limit)).await
    }

    async fn run_transfer(
        &self,
        params: TransferTxParams,
        limit: Option<Duration>,
    ) -> Result<TransferTxResult, LedgerError> {
        params.validate()?;

        let result = self
            .run_tx(limit, move |conn| Box::pin(apply_transfer(conn, params)))
            .await;

        match &result {
            Ok(res) => tracing::info!(
                transfer_id = res.transfer.id,
                from = params.from_account_id,
                to = params.to_account_id,
                amount = params.amount,
                "Transfer committed"
            ),
            Err(e) if e.kind() == ErrorKind::Fatal => tracing::error!(
                from = params.from_account_id,
                to = params.to_account_id,
                amount = params.amount,
                code = e.code(),
                "Transfer failed: {}",
                e
            ),
            Err(e) => tracing::warn!(
                from = params.from_account_id,
                to = params.to_account_id,
                amount = params.amount,
                code = e.code(),
                "Transfer rejected: {}",
                e
            ),
        }

        result
    }

    // === Read-only lookups (no transaction needed: rows are append-only) ===

    pub async fn get_account(&self, id: i64) -> Result<Account, LedgerError> {
        AccountRepository::get(&self.pool, id).await
    }

    pub async fn list_accounts(
        &self,
        owner: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Account>, LedgerError> {
        AccountRepository::list(&self.pool, owner, limit, offset).await
    }

    /// Open an account with the given starting balance.
    ///
    /// No entry is written for `balance`, so a non-zero opening balance is
    /// not covered by "balance = sum of entries"; the gateway always passes 0.
    pub async fn create_account(
        &self,
        owner: &str,
        balance: i64,
        currency: &str,
    ) -> Result<Account, LedgerError> {
        let account = AccountRepository::create(&self.pool, owner, balance, currency).await?;
        tracing::info!(
            account_id = account.id,
            owner = %account.owner,
            currency = %account.currency,
            "Account created"
        );
        Ok(account)
    }

    pub async fn get_entry(&self, id: i64) -> Result<Entry, LedgerError> {
        EntryRepository::get(&self.pool, id).await
    }

    pub async fn list_entries(
        &self,
        account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Entry>, LedgerError> {
        EntryRepository::list_by_account(&self.pool, account_id, limit, offset).await
    }

    pub async fn get_transfer(&self, id: i64) -> Result<Transfer, LedgerError> {
        TransferRepository::get(&self.pool, id).await
    }

    pub async fn list_transfers(
        &self,
        from_account_id: i64,
        to_account_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transfer>, LedgerError> {
        TransferRepository::list_between(&self.pool, from_account_id, to_account_id, limit, offset)
            .await
    }
}

/// Bound every statement of the current transaction by `limit` on the
/// server too, and return the backend pid for cancellation.
async fn bind_deadline(conn: &mut PgConnection, limit: Duration) -> Result<i32, LedgerError> {
    let timeout = timeout_setting(limit);
    let (backend_pid, _, _) = sqlx::query_as::<_, (i32, String, String)>(
        r#"SELECT pg_backend_pid(),
                  set_config('statement_timeout', $1, true),
                  set_config('lock_timeout', $1, true)"#,
    )
    .bind(&timeout)
    .fetch_one(conn)
    .await?;
    Ok(backend_pid)
}

/// Postgres reads `0ms` as "no timeout", so round up to at least 1ms.
fn timeout_setting(limit: Duration) -> String {
    format!("{}ms", limit.as_millis().max(1))
}
