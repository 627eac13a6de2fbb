//! # Tally Executor
//!
//! The public API for Tally, a transactional leaderboard table.
//!
//! This is the only crate users need to import. It provides:
//! - [`Tally`] - Typed interface to the player table
//! - [`Command`]/[`Output`] - Command interface for hosts and SDKs
//! - [`Executor::invoke`] - Named calls with JSON arguments
//! - [`Session`] - A connected client, driving the lifecycle hooks
//!
//! ## Quick Start
//!
//! ```text
//! use tally_executor::Tally;
//!
//! let tally = Tally::open()?;
//! let alice = tally.add_player("Alice")?;
//! tally.add_points(alice, 10)?;
//! ```
//!
//! ## Operations
//!
//! | Name | Arguments | Output |
//! |------|-----------|--------|
//! | `add_player` | `name` | `PlayerId` |
//! | `remove_player` | `player_id` | `Unit` |
//! | `add_points` | `player_id`, `amount` | `Unit` |
//! | `subtract_points` | `player_id`, `amount` | `Unit` |
//! | `get_player` | `player_id` | `Player` |
//! | `list_players` | | `Players` |
//! | `leaderboard` | `limit?` | `Players` |
//! | `ping` | | `Pong` |

#![warn(missing_docs)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod session;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::Tally;
pub use command::{Command, DEFAULT_LEADERBOARD_LIMIT};
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use session::Session;

// Re-export data types so users don't need tally-core directly
pub use tally_core::{ConnectionId, PlayerId, PlayerRecord, RowChange, TableUpdate, TallyError};

// Re-export engine types used to configure and observe the database
pub use tally_engine::{
    Database, HookContext, LifecycleHooks, NoopHooks, RetryConfig, SubscriptionId, TallyConfig,
    CONFIG_FILE_NAME,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
