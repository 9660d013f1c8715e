//! Double-entry ledger on PostgreSQL
//!
//! - [`models`] - Account / Entry / Transfer rows
//! - [`queries`] - single-row accessors
//! - [`store`] - transaction executor and transfer entry point
//! - [`transfer`] - the transfer unit of work
//! - [`error`] - classified errors
//! - [`currency`] - supported currency codes

pub mod currency;
pub mod error;
pub mod models;
pub mod queries;
pub mod store;
pub mod transfer;

pub use error::{ErrorKind, LedgerError};
pub use models::{Account, Entry, Transfer, TransferTxParams, TransferTxResult};
pub use queries::{AccountRepository, EntryRepository, TransferRepository};
pub use store::Store;
