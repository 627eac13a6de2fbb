//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on database state).

use serde::{Deserialize, Serialize};
use tally_core::PlayerRecord;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use tally_executor::{Command, Output};
///
/// match executor.execute(Command::GetPlayer { player_id: 1 })? {
///     Output::Player(Some(p)) => println!("{} has {}", p.name, p.score),
///     Output::Player(None) => println!("No such player"),
///     _ => unreachable!("GetPlayer always returns Player"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (remove and point reducers)
    Unit,

    /// Id assigned by `add_player`
    PlayerId(u64),

    /// Optional player (lookups that may miss)
    Player(Option<PlayerRecord>),

    /// Player list (`list_players`, `leaderboard`)
    Players(Vec<PlayerRecord>),

    /// Ping response
    Pong {
        /// Crate version
        version: String,
    },
}
