//! PlayerTable: the leaderboard's single table
//!
//! ## Design
//!
//! PlayerTable is a stateless facade over the Database engine. Each reducer
//! call runs in its own transaction, retried only when it loses an
//! optimistic concurrency race. Queries read a committed snapshot and never
//! block writers.
//!
//! ## API
//!
//! - `add_player(name)` / `remove_player(id)`
//! - `add_points(id, amount)` / `subtract_points(id, amount)`
//! - `get(id)`, `list()`, `leaderboard(limit)`, `count()`

use std::cmp::Reverse;
use std::sync::Arc;

use tally_concurrency::TransactionContext;
use tally_core::{NewPlayer, PlayerId, PlayerRecord, Result, SnapshotView, TallyError};
use tracing::debug;

use crate::constraints::{adjust_score, require_player, validate_amount, validate_name, Delta};
use crate::database::Database;
use crate::primitives::extensions::PlayerTableExt;

/// Log a reducer rejection and pass the error through unchanged
fn rejected(reducer: &'static str) -> impl Fn(TallyError) -> TallyError {
    move |e| {
        debug!(target: "tally::reducer", reducer, kind = ?e.kind(), message = e.message(), "Reducer rejected");
        e
    }
}

impl PlayerTableExt for TransactionContext {
    fn add_player(&mut self, name: &str) -> Result<PlayerId> {
        let name = validate_name(name).map_err(rejected("add_player"))?;
        let id = self.insert(NewPlayer::named(name))?;
        debug!(target: "tally::reducer", reducer = "add_player", id = id.as_u64(), "Player added");
        Ok(id)
    }

    fn remove_player(&mut self, id: PlayerId) -> Result<()> {
        let player = require_player(self.find_by_id(id)?).map_err(rejected("remove_player"))?;
        self.delete_by_id(player.id)?;
        Ok(())
    }

    fn add_points(&mut self, id: PlayerId, amount: i64) -> Result<()> {
        adjust(self, "add_points", id, amount, Delta::Add)
    }

    fn subtract_points(&mut self, id: PlayerId, amount: i64) -> Result<()> {
        adjust(self, "subtract_points", id, amount, Delta::Subtract)
    }
}

fn adjust(
    txn: &mut TransactionContext,
    reducer: &'static str,
    id: PlayerId,
    amount: i64,
    delta: fn(i64) -> Delta,
) -> Result<()> {
    let player = require_player(txn.find_by_id(id)?).map_err(rejected(reducer))?;
    let amount = validate_amount(amount).map_err(rejected(reducer))?;
    let score = adjust_score(player.score, delta(amount)).map_err(rejected(reducer))?;
    txn.update(player.with_score(score))
}

/// The player table
///
/// Stateless facade over Database: all state lives in the record store.
///
/// # Example
///
/// ```ignore
/// let table = PlayerTable::new(Database::open());
/// let bob = table.add_player("Bob")?;
/// table.add_points(bob, 50)?;
/// table.subtract_points(bob, 20)?;
/// assert_eq!(table.get(bob).unwrap().score, 30);
/// ```
#[derive(Clone)]
pub struct PlayerTable {
    db: Arc<Database>,
}

impl PlayerTable {
    /// Create new PlayerTable instance
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get the underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: Fn(&mut TransactionContext) -> Result<T>,
    {
        self.db.run_reducer(f)
    }

    // ========== Reducers ==========

    /// Add a player and return the id the store assigned
    pub fn add_player(&self, name: &str) -> Result<PlayerId> {
        self.run(|txn| txn.add_player(name))
    }

    /// Remove a player
    pub fn remove_player(&self, id: PlayerId) -> Result<()> {
        self.run(|txn| txn.remove_player(id))
    }

    /// Add points to a player's score
    pub fn add_points(&self, id: PlayerId, amount: i64) -> Result<()> {
        self.run(|txn| txn.add_points(id, amount))
    }

    /// Subtract points from a player's score
    pub fn subtract_points(&self, id: PlayerId, amount: i64) -> Result<()> {
        self.run(|txn| txn.subtract_points(id, amount))
    }

    // ========== Queries ==========

    /// Look up a committed player
    pub fn get(&self, id: PlayerId) -> Option<PlayerRecord> {
        self.db.snapshot().get(id).map(|stored| stored.record)
    }

    /// All committed players in ascending id order
    pub fn list(&self) -> Vec<PlayerRecord> {
        self.db
            .snapshot()
            .iter()
            .map(|stored| stored.record.clone())
            .collect()
    }

    /// Top `limit` players by score, highest first
    ///
    /// Ties are broken by ascending id, so earlier players rank first.
    pub fn leaderboard(&self, limit: usize) -> Vec<PlayerRecord> {
        let mut players = self.list();
        players.sort_by_key(|p| (Reverse(p.score), p.id));
        players.truncate(limit);
        players
    }

    /// Number of committed players
    pub fn count(&self) -> usize {
        self.db.snapshot().len()
    }
}
