//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{CreateAccountRequest, CreateTransferRequest};
use crate::ledger::{Account, Entry, Transfer, TransferTxResult};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Simple Ledger API",
        version = "1.0.0",
        description = "Double-entry ledger: accounts, balance entries and atomic transfers.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_account,
        crate::gateway::handlers::list_accounts,
        crate::gateway::handlers::get_account,
        crate::gateway::handlers::list_account_entries,
        crate::gateway::handlers::create_transfer,
        crate::gateway::handlers::get_transfer,
        crate::gateway::handlers::get_entry,
    ),
    components(
        schemas(
            HealthResponse,
            CreateAccountRequest,
            CreateTransferRequest,
            Account,
            Entry,
            Transfer,
            TransferTxResult,
        )
    ),
    tags(
        (name = "Account", description = "Account management and statements"),
        (name = "Transfer", description = "Atomic fund transfers"),
        (name = "Ledger", description = "Balance entries"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
