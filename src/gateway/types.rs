//! API request/response types
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError`: error response built from a [`LedgerError`] kind
//! - request DTOs with their shape validation

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::ledger::currency::is_supported_currency;
use crate::ledger::{ErrorKind, LedgerError, TransferTxParams};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - error: stable error name (errors only)
/// - data: payload (success only)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            error: None,
            data: Some(data),
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const CONSTRAINT_VIOLATION: i32 = 1009;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub error: &'static str,
    pub msg: String,
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: error_codes::INVALID_PARAMETER,
            error: "INVALID_PARAMETER",
            msg: msg.into(),
        }
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: error_codes::SERVICE_UNAVAILABLE,
            error: "SERVICE_UNAVAILABLE",
            msg: msg.into(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match e.kind() {
            ErrorKind::Input => error_codes::INVALID_PARAMETER,
            ErrorKind::NotFound => error_codes::NOT_FOUND,
            ErrorKind::Constraint => error_codes::CONSTRAINT_VIOLATION,
            ErrorKind::Transient => error_codes::SERVICE_UNAVAILABLE,
            ErrorKind::Fatal => error_codes::INTERNAL_ERROR,
        };
        // Storage internals stay in the log
        let msg = match e.kind() {
            ErrorKind::Fatal => "internal error".to_string(),
            ErrorKind::Transient => "storage temporarily unavailable, retry later".to_string(),
            _ => e.to_string(),
        };
        Self {
            status,
            code,
            error: e.code(),
            msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse {
            code: self.code,
            msg: self.msg,
            error: Some(self.error),
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// POST /api/v1/accounts
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[schema(example = "alice")]
    pub owner: String,
    #[schema(example = "USD")]
    pub currency: String,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.owner.trim().is_empty() {
            return Err(ApiError::bad_request("owner cannot be empty"));
        }
        validate_currency(&self.currency)
    }
}

/// POST /api/v1/transfers
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    #[schema(example = 1)]
    pub from_account_id: i64,
    #[schema(example = 2)]
    pub to_account_id: i64,
    /// Smallest currency unit
    #[schema(example = 10)]
    pub amount: i64,
    #[schema(example = "USD")]
    pub currency: String,
}

impl CreateTransferRequest {
    pub fn validate(&self) -> Result<TransferTxParams, ApiError> {
        if self.from_account_id < 1 || self.to_account_id < 1 {
            return Err(ApiError::bad_request("account ids must be positive"));
        }
        validate_currency(&self.currency)?;
        let params = TransferTxParams::new(self.from_account_id, self.to_account_id, self.amount);
        params.validate()?;
        Ok(params)
    }
}

fn validate_currency(currency: &str) -> Result<(), ApiError> {
    if is_supported_currency(currency) {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "unsupported currency: {}",
            currency
        )))
    }
}

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// LIMIT/OFFSET passed straight to the store
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1..=100, default 10
    pub limit: Option<i64>,
    /// default 0
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAccountsQuery {
    pub owner: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListAccountsQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_req(from: i64, to: i64, amount: i64, currency: &str) -> CreateTransferRequest {
        CreateTransferRequest {
            from_account_id: from,
            to_account_id: to,
            amount,
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_transfer_request_valid() {
        let params = transfer_req(1, 2, 10, "USD").validate().unwrap();
        assert_eq!(params, TransferTxParams::new(1, 2, 10));
    }

    #[test]
    fn test_transfer_request_rejections() {
        for req in [
            transfer_req(0, 2, 10, "USD"),
            transfer_req(1, 2, 10, "XYZ"),
            transfer_req(1, 2, -5, "USD"),
            transfer_req(3, 3, 10, "USD"),
        ] {
            let err = req.validate().unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{req:?}");
            assert_eq!(err.code, error_codes::INVALID_PARAMETER);
        }
    }

    #[test]
    fn test_create_account_request_validation() {
        let ok = CreateAccountRequest {
            owner: "alice".to_string(),
            currency: "EUR".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank = CreateAccountRequest {
            owner: "  ".to_string(),
            currency: "EUR".to_string(),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_page_query_clamps() {
        assert_eq!(PageQuery::default().limit(), DEFAULT_LIMIT);
        assert_eq!(PageQuery::default().offset(), 0);

        let page = PageQuery {
            limit: Some(1000),
            offset: Some(-3),
        };
        assert_eq!(page.limit(), MAX_LIMIT);
        assert_eq!(page.offset(), 0);

        let page = PageQuery {
            limit: Some(0),
            offset: Some(20),
        };
        assert_eq!(page.limit(), 1);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_api_error_from_ledger_error() {
        let err = ApiError::from(LedgerError::NotFound {
            entity: "account",
            id: 9,
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, error_codes::NOT_FOUND);
        assert_eq!(err.error, "NOT_FOUND");
        assert_eq!(err.msg, "account 9 not found");

        let err = ApiError::from(LedgerError::Database(sqlx::Error::RowNotFound));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.msg, "internal error");

        let err = ApiError::from(LedgerError::Transient(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }
}
