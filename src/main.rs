//! Simple Ledger gateway
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌────────────┐
//! │  Config  │───▶│ Gateway  │───▶│  Store   │───▶│ PostgreSQL │
//! │  (YAML)  │    │  (axum)  │    │ (tx exec)│    │  (sqlx)    │
//! └──────────┘    └──────────┘    └──────────┘    └────────────┘
//! ```
//!
//! Usage: `simple_ledger [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;

use simple_ledger::config::AppConfig;
use simple_ledger::db::{Database, schema};
use simple_ledger::gateway::{self, state::AppState};
use simple_ledger::ledger::Store;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = simple_ledger::logging::init_logging(&app_config);

    tracing::info!(
        version = env!("LEDGER_BUILD"),
        "Starting Simple Ledger in {} mode",
        env
    );

    let db_config = &app_config.database;
    let db = Database::connect(db_config)
        .await
        .context("Failed to connect to PostgreSQL")?;

    if db_config.init_schema {
        schema::init_schema(db.pool()).await?;
    }

    let store = Store::new(db.pool().clone()).with_tx_timeout(db_config.transaction_timeout());
    let state = Arc::new(AppState::new(db.clone(), store));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state).await?;

    db.pool().close().await;
    tracing::info!("Simple Ledger stopped");
    Ok(())
}
