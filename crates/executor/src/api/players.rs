//! Player table operations.

use tally_core::{PlayerId, PlayerRecord};

use super::Tally;
use crate::{Command, Error, Output, Result};

impl Tally {
    // =========================================================================
    // Reducers
    // =========================================================================

    /// Add a player and return the assigned id.
    ///
    /// The name is stored trimmed; a blank name is rejected.
    pub fn add_player(&self, name: &str) -> Result<PlayerId> {
        match self.executor.execute(Command::AddPlayer {
            name: name.to_string(),
        })? {
            Output::PlayerId(id) => Ok(PlayerId::new(id)),
            _ => Err(Error::Internal {
                reason: "Unexpected output for AddPlayer".into(),
            }),
        }
    }

    /// Remove a player.
    pub fn remove_player(&self, id: PlayerId) -> Result<()> {
        self.expect_unit(
            Command::RemovePlayer {
                player_id: id.as_u64(),
            },
            "RemovePlayer",
        )
    }

    /// Add points to a player's score.
    pub fn add_points(&self, id: PlayerId, amount: i64) -> Result<()> {
        self.expect_unit(
            Command::AddPoints {
                player_id: id.as_u64(),
                amount,
            },
            "AddPoints",
        )
    }

    /// Subtract points from a player's score.
    pub fn subtract_points(&self, id: PlayerId, amount: i64) -> Result<()> {
        self.expect_unit(
            Command::SubtractPoints {
                player_id: id.as_u64(),
                amount,
            },
            "SubtractPoints",
        )
    }

    fn expect_unit(&self, cmd: Command, label: &str) -> Result<()> {
        match self.executor.execute(cmd)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", label),
            }),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Result<Option<PlayerRecord>> {
        match self.executor.execute(Command::GetPlayer {
            player_id: id.as_u64(),
        })? {
            Output::Player(p) => Ok(p),
            _ => Err(Error::Internal {
                reason: "Unexpected output for GetPlayer".into(),
            }),
        }
    }

    /// All players in ascending id order.
    pub fn players(&self) -> Result<Vec<PlayerRecord>> {
        self.expect_players(Command::ListPlayers, "ListPlayers")
    }

    /// Top `limit` players by score, ties broken by ascending id.
    pub fn leaderboard(&self, limit: u64) -> Result<Vec<PlayerRecord>> {
        self.expect_players(Command::Leaderboard { limit: Some(limit) }, "Leaderboard")
    }

    fn expect_players(&self, cmd: Command, label: &str) -> Result<Vec<PlayerRecord>> {
        match self.executor.execute(cmd)? {
            Output::Players(players) => Ok(players),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", label),
            }),
        }
    }

    /// Check the executor is alive; returns the crate version.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }
}
