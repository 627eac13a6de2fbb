//! Reducer command handlers.
//!
//! Each handler runs one reducer in its own transaction through
//! `PlayerTable`, which retries optimistic conflicts and nothing else.

use tally_core::PlayerId;
use tally_engine::PlayerTable;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle AddPlayer command.
pub fn add_player(table: &PlayerTable, name: String) -> Result<Output> {
    let id = convert_result(table.add_player(&name))?;
    Ok(Output::PlayerId(id.as_u64()))
}

/// Handle RemovePlayer command.
pub fn remove_player(table: &PlayerTable, player_id: u64) -> Result<Output> {
    convert_result(table.remove_player(PlayerId::new(player_id)))?;
    Ok(Output::Unit)
}

/// Handle AddPoints command.
pub fn add_points(table: &PlayerTable, player_id: u64, amount: i64) -> Result<Output> {
    convert_result(table.add_points(PlayerId::new(player_id), amount))?;
    Ok(Output::Unit)
}

/// Handle SubtractPoints command.
pub fn subtract_points(table: &PlayerTable, player_id: u64, amount: i64) -> Result<Output> {
    convert_result(table.subtract_points(PlayerId::new(player_id), amount))?;
    Ok(Output::Unit)
}
