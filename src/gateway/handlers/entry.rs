//! Entry lookup

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{ApiResult, ok};
use crate::ledger::Entry;

/// GET /api/v1/entries/{id}
#[utoipa::path(
    get,
    path = "/api/v1/entries/{id}",
    params(
        ("id" = i64, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry details", body = Entry, content_type = "application/json"),
        (status = 404, description = "Entry not found")
    ),
    tag = "Ledger"
)]
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Entry> {
    ok(state.store.get_entry(id).await?)
}
