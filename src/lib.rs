//! Tally - a transactional leaderboard table
//!
//! Tally keeps one table of players (id, name, score) and changes it only
//! through four validated, atomic reducers: add player, remove player, add
//! points, subtract points.
//!
//! # Quick Start
//!
//! ```ignore
//! use tally::Tally;
//!
//! let tally = Tally::open()?;
//! let bob = tally.add_player("Bob")?;
//! tally.add_points(bob, 50)?;
//! tally.subtract_points(bob, 20)?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which provides a command-based
//! API and the named-call entry point [`Executor::invoke`]. The [`Tally`]
//! struct provides a convenient typed interface, and a [`Session`] represents
//! one connected client.
//!
//! Internal implementation details (storage, concurrency, engine) are not
//! exposed - only the executor API is public.

// Re-export the public API from tally-executor
pub use tally_executor::*;
