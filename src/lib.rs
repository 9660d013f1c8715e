//! Simple Ledger - double-entry bookkeeping on PostgreSQL
//!
//! Accounts hold a balance in one currency; every balance change is recorded
//! as an entry, and a transfer moves funds between two accounts atomically.
//!
//! # Modules
//!
//! - [`ledger`] - Rows, accessors, transaction executor and transfer engine
//! - [`db`] - Connection pool and schema bootstrap
//! - [`gateway`] - HTTP API (axum + OpenAPI docs)
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod db;
pub mod gateway;
pub mod ledger;
pub mod logging;

// Convenient re-exports at crate root
pub use config::{AppConfig, DatabaseConfig, GatewayConfig};
pub use db::Database;
pub use ledger::{
    Account, Entry, ErrorKind, LedgerError, Store, Transfer, TransferTxParams, TransferTxResult,
};
