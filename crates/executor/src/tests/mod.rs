//! Executor test modules.

mod invoke;

use crate::Executor;
use tally_engine::Database;

/// Executor over a fresh in-memory database.
pub(crate) fn create_executor() -> Executor {
    Executor::new(Database::open())
}
