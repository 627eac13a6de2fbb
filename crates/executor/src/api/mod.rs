//! High-level typed wrapper for the Executor.
//!
//! The [`Tally`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use tally_executor::Tally;
//!
//! let tally = Tally::open()?;
//! let bob = tally.add_player("Bob")?;
//! tally.add_points(bob, 50)?;
//! tally.subtract_points(bob, 20)?;
//! assert_eq!(tally.player(bob)?.map(|p| p.score), Some(30));
//! ```

mod players;

use std::path::Path;
use std::sync::Arc;

use tally_engine::{Database, LifecycleHooks, TallyConfig};

use crate::convert::convert_result;
use crate::{Executor, Result, Session};

/// High-level typed wrapper for leaderboard operations.
///
/// Opening a `Tally` activates the database: the init lifecycle hook has
/// run by the time a constructor returns.
pub struct Tally {
    executor: Executor,
}

impl Tally {
    /// Open an empty in-memory leaderboard with default settings.
    pub fn open() -> Result<Self> {
        Self::from_database(Database::open())
    }

    /// Open with settings from a `tally.toml` file.
    ///
    /// A missing file means defaults.
    pub fn open_with_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let builder = convert_result(Database::builder().config_file(path))?;
        Self::from_database(builder.open())
    }

    /// Open with an explicit config.
    pub fn open_with_config(config: TallyConfig) -> Result<Self> {
        Self::from_database(Database::with_config(config))
    }

    /// Open with lifecycle hooks installed.
    pub fn open_with_hooks<H: LifecycleHooks + 'static>(hooks: H) -> Result<Self> {
        Self::from_database(Database::builder().hooks(hooks).open())
    }

    /// Wrap an existing database, running its init hook if needed.
    pub fn from_database(db: Arc<Database>) -> Result<Self> {
        convert_result(db.init())?;
        Ok(Self {
            executor: Executor::new(db),
        })
    }

    /// Connect a client session on the same database.
    pub fn session(&self) -> Result<Session> {
        Session::open(Arc::clone(self.database()))
    }

    /// Get a reference to the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Arc<Database> {
        self.executor.database()
    }
}
