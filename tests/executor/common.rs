//! Common test utilities for executor tests

use std::sync::Arc;
use tally::{Database, Executor, Output, PlayerRecord, Tally};
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness; set `RUST_LOG` to see them.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_test_writer()
        .try_init();
}

/// Create a Tally API wrapper over a fresh database
pub fn create_tally() -> Tally {
    init_logging();
    Tally::open().unwrap()
}

/// Create an executor over a fresh database
pub fn create_executor() -> Executor {
    init_logging();
    Executor::new(Database::open())
}

/// Extract the player list from Output::Players
#[allow(dead_code)]
pub fn extract_players(output: Output) -> Vec<PlayerRecord> {
    match output {
        Output::Players(players) => players,
        other => panic!("Expected Output::Players, got {:?}", other),
    }
}

/// Create a database for shared use
#[allow(dead_code)]
pub fn create_db() -> Arc<Database> {
    init_logging();
    Database::open()
}
