//! Read-only command handlers.

use tally_core::PlayerId;
use tally_engine::PlayerTable;

use crate::command::DEFAULT_LEADERBOARD_LIMIT;
use crate::Output;

/// Handle GetPlayer command.
pub fn get_player(table: &PlayerTable, player_id: u64) -> Output {
    Output::Player(table.get(PlayerId::new(player_id)))
}

/// Handle ListPlayers command.
pub fn list_players(table: &PlayerTable) -> Output {
    Output::Players(table.list())
}

/// Handle Leaderboard command.
///
/// Limits beyond `usize` saturate; the table cannot hold that many rows.
pub fn leaderboard(table: &PlayerTable, limit: Option<u64>) -> Output {
    let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    Output::Players(table.leaderboard(limit))
}
