//! Account handlers (open, list, lookup, statement)

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::super::state::AppState;
use super::super::types::{
    ApiResult, CreateAccountRequest, ListAccountsQuery, PageQuery, ok,
};
use crate::ledger::{Account, Entry};

/// Open a new account
///
/// POST /api/v1/accounts
///
/// Accounts always open with a zero balance; funds arrive by transfer.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = Account, content_type = "application/json"),
        (status = 400, description = "Blank owner or unsupported currency"),
        (status = 409, description = "Owner already holds an account in this currency"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Account> {
    req.validate()?;
    let account = state
        .store
        .create_account(req.owner.trim(), 0, &req.currency)
        .await?;
    ok(account)
}

/// List accounts, optionally filtered by owner
///
/// GET /api/v1/accounts?owner=alice&limit=10&offset=0
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(ListAccountsQuery),
    responses(
        (status = 200, description = "Accounts ordered by id", body = Vec<Account>, content_type = "application/json"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAccountsQuery>,
) -> ApiResult<Vec<Account>> {
    let page = query.page();
    let accounts = state
        .store
        .list_accounts(query.owner.as_deref(), page.limit(), page.offset())
        .await?;
    ok(accounts)
}

/// Get one account with its current balance
///
/// GET /api/v1/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = Account, content_type = "application/json"),
        (status = 404, description = "Account not found"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Account> {
    ok(state.store.get_account(id).await?)
}

/// Balance-change history of an account
///
/// GET /api/v1/accounts/{id}/entries?limit=10&offset=0
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}/entries",
    params(
        ("id" = i64, Path, description = "Account ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Entries ordered by id", body = Vec<Entry>, content_type = "application/json"),
        (status = 404, description = "Account not found"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Account"
)]
pub async fn list_account_entries(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Vec<Entry>> {
    // 404 for unknown accounts rather than an empty list
    state.store.get_account(id).await?;
    let entries = state
        .store
        .list_entries(id, page.limit(), page.offset())
        .await?;
    ok(entries)
}
