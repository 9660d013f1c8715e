//! Ledger error types
//!
//! Every failure carries an [`ErrorKind`] so callers branch on the kind
//! instead of matching message strings.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// SQLSTATE codes that signal a retryable storage condition
mod sqlstate {
    pub const SERIALIZATION_FAILURE: &str = "40001";
    pub const DEADLOCK_DETECTED: &str = "40P01";
    pub const LOCK_NOT_AVAILABLE: &str = "55P03";
    pub const QUERY_CANCELED: &str = "57014";
    pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
    /// Class 08: connection exceptions
    pub const CONNECTION_EXCEPTION_CLASS: &str = "08";
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Invalid caller input, rejected before touching the database
    Input,
    /// Referenced row does not exist
    NotFound,
    /// Integrity constraint rejected the write
    Constraint,
    /// Connection loss, timeout, serialization failure; the caller may retry
    Transient,
    /// Storage malfunction (commit/rollback failure, unexpected error)
    Fatal,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violation ({constraint}): {source}")]
    Constraint {
        constraint: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Transient storage error: {0}")]
    Transient(#[source] sqlx::Error),

    #[error("Transaction cancelled after {0:?}")]
    Cancelled(Duration),

    #[error("Commit failed: {0}")]
    CommitFailed(#[source] sqlx::Error),

    #[error("Rollback failed: {rollback} (original error: {original})")]
    RollbackFailed {
        original: Box<LedgerError>,
        #[source]
        rollback: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidInput(_) => ErrorKind::Input,
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::Constraint { .. } => ErrorKind::Constraint,
            LedgerError::Transient(_) | LedgerError::Cancelled(_) => ErrorKind::Transient,
            LedgerError::CommitFailed(_)
            | LedgerError::RollbackFailed { .. }
            | LedgerError::Database(_) => ErrorKind::Fatal,
        }
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidInput(_) => "INVALID_INPUT",
            LedgerError::NotFound { .. } => "NOT_FOUND",
            LedgerError::Constraint { .. } => "CONSTRAINT_VIOLATION",
            LedgerError::Transient(_) => "TRANSIENT_STORAGE",
            LedgerError::Cancelled(_) => "CANCELLED",
            LedgerError::CommitFailed(_) => "COMMIT_FAILED",
            LedgerError::RollbackFailed { .. } => "ROLLBACK_FAILED",
            LedgerError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Input => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Constraint => 409,
            ErrorKind::Transient => 503,
            ErrorKind::Fatal => 500,
        }
    }

    /// The core never retries; this tells the caller whether it may.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }

    /// Map `RowNotFound` to [`LedgerError::NotFound`] for a known entity,
    /// classify anything else.
    pub fn from_lookup(err: sqlx::Error, entity: &'static str, id: i64) -> Self {
        match err {
            sqlx::Error::RowNotFound => LedgerError::NotFound { entity, id },
            other => LedgerError::from(other),
        }
    }
}

fn is_transient_sqlstate(code: &str) -> bool {
    matches!(
        code,
        sqlstate::SERIALIZATION_FAILURE
            | sqlstate::DEADLOCK_DETECTED
            | sqlstate::LOCK_NOT_AVAILABLE
            | sqlstate::QUERY_CANCELED
    ) || code.starts_with(sqlstate::CONNECTION_EXCEPTION_CLASS)
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code().map(|c| c.into_owned());
            let constraint = db_err.constraint().map(str::to_owned);
            let violation = !matches!(db_err.kind(), sqlx::error::ErrorKind::Other);

            if code.as_deref().is_some_and(is_transient_sqlstate) {
                return LedgerError::Transient(err);
            }
            if violation || code.as_deref() == Some(sqlstate::NUMERIC_VALUE_OUT_OF_RANGE) {
                return LedgerError::Constraint {
                    constraint: constraint.unwrap_or_else(|| "unknown".to_string()),
                    source: err,
                };
            }
            return LedgerError::Database(err);
        }

        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => LedgerError::Transient(err),
            other => LedgerError::Database(other),
        }
    }
}
