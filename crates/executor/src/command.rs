//! Command enum defining all Tally operations.
//!
//! Commands are the "instruction set" of Tally. Every operation a host can
//! invoke is a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Typed**: No generic fallback, every operation has explicit types
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

/// Leaderboard size when a `leaderboard` command gives no limit
pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

/// A command is a self-contained, serializable operation.
///
/// The serialized name of each variant is the operation name a host uses
/// with [`Executor::invoke`](crate::Executor::invoke). Player id arguments
/// are written `player_id` and also accepted as `playerId`.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Reducer | 4 | Atomic, validated table mutations |
/// | Query | 3 | Reads of committed state |
/// | Database | 1 | Liveness |
///
/// # Example
///
/// ```ignore
/// use tally_executor::Command;
///
/// let cmd = Command::AddPoints { player_id: 2, amount: 50 };
/// assert_eq!(
///     serde_json::to_string(&cmd)?,
///     r#"{"add_points":{"player_id":2,"amount":50}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Command {
    // ==================== Reducers (4) ====================
    /// Insert a player with score 0.
    /// Returns: `Output::PlayerId`
    AddPlayer { name: String },

    /// Delete a player.
    /// Returns: `Output::Unit`
    RemovePlayer {
        #[serde(alias = "playerId")]
        player_id: u64,
    },

    /// Increase a player's score.
    /// Returns: `Output::Unit`
    AddPoints {
        #[serde(alias = "playerId")]
        player_id: u64,
        amount: i64,
    },

    /// Decrease a player's score.
    /// Returns: `Output::Unit`
    SubtractPoints {
        #[serde(alias = "playerId")]
        player_id: u64,
        amount: i64,
    },

    // ==================== Queries (3) ====================
    /// Look up one player.
    /// Returns: `Output::Player`
    GetPlayer {
        #[serde(alias = "playerId")]
        player_id: u64,
    },

    /// All players in ascending id order.
    /// Returns: `Output::Players`
    ListPlayers,

    /// Top players by score, highest first.
    /// Returns: `Output::Players`
    Leaderboard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u64>,
    },

    // ==================== Database (1) ====================
    /// Liveness check.
    /// Returns: `Output::Pong`
    Ping,
}

impl Command {
    /// Operation names that take no arguments
    pub(crate) const UNIT_OPERATIONS: &'static [&'static str] = &["list_players", "ping"];

    /// Every operation name, in declaration order
    pub const OPERATION_NAMES: &'static [&'static str] = &[
        "add_player",
        "remove_player",
        "add_points",
        "subtract_points",
        "get_player",
        "list_players",
        "leaderboard",
        "ping",
    ];

    /// The operation name, as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPlayer { .. } => "add_player",
            Command::RemovePlayer { .. } => "remove_player",
            Command::AddPoints { .. } => "add_points",
            Command::SubtractPoints { .. } => "subtract_points",
            Command::GetPlayer { .. } => "get_player",
            Command::ListPlayers => "list_players",
            Command::Leaderboard { .. } => "leaderboard",
            Command::Ping => "ping",
        }
    }

    /// Whether this command is a reducer (may mutate the table)
    pub fn is_reducer(&self) -> bool {
        matches!(
            self,
            Command::AddPlayer { .. }
                | Command::RemovePlayer { .. }
                | Command::AddPoints { .. }
                | Command::SubtractPoints { .. }
        )
    }
}
