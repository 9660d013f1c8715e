//! Ledger entity model
//!
//! Row types for the three ledger tables plus the request/result pair of the
//! transfer engine. Rows are immutable snapshots; only `accounts.balance`
//! changes after insert, and only through
//! [`AccountRepository::add_balance`](super::queries::AccountRepository::add_balance).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::error::LedgerError;

/// Account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub owner: String,
    /// Balance in the smallest currency unit
    #[schema(example = 100)]
    pub balance: i64,
    #[schema(example = "USD")]
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry: one signed balance adjustment (negative = debit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entry {
    pub id: i64,
    pub account_id: i64,
    #[schema(example = -10)]
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Transfer row (amount is always positive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    #[schema(example = 10)]
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Input of [`Store::transfer_tx`](super::store::Store::transfer_tx)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

impl TransferTxParams {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
        }
    }

    /// Reject requests that must never reach the database.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= 0 {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.from_account_id == self.to_account_id {
            return Err(LedgerError::InvalidInput(format!(
                "cannot transfer from account {} to itself",
                self.from_account_id
            )));
        }
        Ok(())
    }

    /// `(account_id, delta)` pairs in lock order: smaller account id first.
    ///
    /// Every transaction touching the same pair of accounts asks for the row
    /// locks in this order, whichever side is debited. Only meaningful after
    /// [`validate`](Self::validate): negating `i64::MIN` overflows.
    pub(crate) fn balance_updates(&self) -> [(i64, i64); 2] {
        let debit = (self.from_account_id, -self.amount);
        let credit = (self.to_account_id, self.amount);
        if self.from_account_id < self.to_account_id {
            [debit, credit]
        } else {
            [credit, debit]
        }
    }
}

/// Everything a completed transfer wrote, labelled by the caller's from/to
/// roles rather than by lock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_entry: Entry,
    pub to_entry: Entry,
    pub from_account: Account,
    pub to_account: Account,
}
