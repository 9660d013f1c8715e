//! Transfer handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateTransferRequest, ok};
use crate::ledger::{Account, Transfer, TransferTxResult};

/// Move funds between two accounts
///
/// POST /api/v1/transfers
///
/// Both accounts must hold the request currency. The transfer record, the
/// two entries and both balance updates commit together or not at all.
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransferTxResult, content_type = "application/json"),
        (status = 400, description = "Invalid amount, same account or currency mismatch"),
        (status = 404, description = "Account not found"),
        (status = 409, description = "Constraint violation"),
        (status = 503, description = "Storage unavailable or timed out, retry later")
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTransferRequest>,
) -> ApiResult<TransferTxResult> {
    let params = req.validate()?;

    let from = state.store.get_account(params.from_account_id).await?;
    check_currency(&from, &req.currency)?;
    let to = state.store.get_account(params.to_account_id).await?;
    check_currency(&to, &req.currency)?;

    ok(state.store.transfer_tx(params).await?)
}

fn check_currency(account: &Account, currency: &str) -> Result<(), ApiError> {
    if account.currency == currency {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "account [{}] currency mismatch: {} vs {}",
            account.id, account.currency, currency
        )))
    }
}

/// GET /api/v1/transfers/{id}
#[utoipa::path(
    get,
    path = "/api/v1/transfers/{id}",
    params(
        ("id" = i64, Path, description = "Transfer ID")
    ),
    responses(
        (status = 200, description = "Transfer details", body = Transfer, content_type = "application/json"),
        (status = 404, description = "Transfer not found")
    ),
    tag = "Transfer"
)]
pub async fn get_transfer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Transfer> {
    ok(state.store.get_transfer(id).await?)
}
