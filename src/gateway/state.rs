use crate::db::Database;
use crate::ledger::Store;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Connection pool owner, used for health checks
    pub db: Database,
    /// Ledger store (transaction executor over the same pool)
    pub store: Store,
}

impl AppState {
    pub fn new(db: Database, store: Store) -> Self {
        Self { db, store }
    }
}
