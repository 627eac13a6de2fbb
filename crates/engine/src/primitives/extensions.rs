//! Transaction extension trait for the player table
//!
//! Reducer bodies live on the transaction so several of them can run in one
//! atomic scope:
//!
//! ```rust,ignore
//! use tally_engine::PlayerTableExt;
//!
//! db.transaction(|txn| {
//!     let id = txn.add_player("Alice")?;
//!     txn.add_points(id, 100)?;
//!     Ok(id)
//! })?;
//! ```
//!
//! If any reducer in the closure fails, none of the closure's writes are
//! applied.

use tally_core::{PlayerId, Result};

/// Player table reducers within a transaction
///
/// Implemented for `TransactionContext` in `player_table.rs`.
pub trait PlayerTableExt {
    /// Insert a player with the trimmed `name` and a score of 0
    ///
    /// Fails with `InvalidArgument("Name cannot be empty")` if nothing is
    /// left after trimming.
    fn add_player(&mut self, name: &str) -> Result<PlayerId>;

    /// Delete the player with `id`
    ///
    /// Fails with `NotFound("Player not found")` if there is none.
    fn remove_player(&mut self, id: PlayerId) -> Result<()>;

    /// Increase a player's score by `amount`
    ///
    /// Checks existence, then `amount > 0`, then that the new score fits
    /// in an i64.
    fn add_points(&mut self, id: PlayerId, amount: i64) -> Result<()>;

    /// Decrease a player's score by `amount`
    ///
    /// Same checks, in the same order, as `add_points`. Scores may go
    /// negative.
    fn subtract_points(&mut self, id: PlayerId, amount: i64) -> Result<()>;
}
