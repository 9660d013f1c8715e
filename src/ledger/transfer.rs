//! Transfer orchestration
//!
//! The unit of work run inside one transaction for every money movement:
//!
//! ```text
//! 1. INSERT transfers (from, to, amount)
//! 2. INSERT entries   (from, -amount)
//! 3. INSERT entries   (to,   +amount)
//! 4. UPDATE accounts  smaller id first, then larger id
//! ```
//!
//! Step 4 always locks the two account rows in ascending id order. Two
//! transfers over the same pair therefore queue on the first row instead of
//! each holding one row and waiting for the other.

use sqlx::PgConnection;

use super::error::LedgerError;
use super::models::{TransferTxParams, TransferTxResult};
use super::queries::{AccountRepository, EntryRepository, TransferRepository};

/// Write one transfer. `params` must already be validated; the caller owns
/// the transaction.
pub(crate) async fn apply_transfer(
    conn: &mut PgConnection,
    params: TransferTxParams,
) -> Result<TransferTxResult, LedgerError> {
    let TransferTxParams {
        from_account_id,
        to_account_id,
        amount,
    } = params;

    let transfer =
        TransferRepository::create(&mut *conn, from_account_id, to_account_id, amount).await?;
    let from_entry = EntryRepository::create(&mut *conn, from_account_id, -amount).await?;
    let to_entry = EntryRepository::create(&mut *conn, to_account_id, amount).await?;

    let [(first_id, first_delta), (second_id, second_delta)] = params.balance_updates();
    let first = AccountRepository::add_balance(&mut *conn, first_id, first_delta).await?;
    let second = AccountRepository::add_balance(&mut *conn, second_id, second_delta).await?;

    let (from_account, to_account) = if first.id == from_account_id {
        (first, second)
    } else {
        (second, first)
    };

    Ok(TransferTxResult {
        transfer,
        from_entry,
        to_entry,
        from_account,
        to_account,
    })
}
