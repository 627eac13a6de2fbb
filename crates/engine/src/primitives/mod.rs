//! Primitives layer for Tally
//!
//! The player table is a stateless facade over the Database engine. It
//! holds only an `Arc<Database>` and delegates every operation to the
//! transactional engine, so any number of `PlayerTable` handles on the same
//! Database are safe.
//!
//! Reducers compose within one transaction through `PlayerTableExt`:
//!
//! ```rust,ignore
//! use tally_engine::primitives::PlayerTableExt;
//!
//! db.transaction(|txn| {
//!     txn.add_points(winner, 10)?;
//!     txn.subtract_points(loser, 10)
//! })?;
//! ```

pub mod extensions;
pub mod player_table;

pub use extensions::PlayerTableExt;
pub use player_table::PlayerTable;
