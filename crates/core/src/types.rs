//! Core types for the player table
//!
//! This module defines the foundational types:
//! - PlayerId: Unique, store-assigned identifier (starts at 1, never reused)
//! - PlayerRecord: A committed player row
//! - NewPlayer: Insert candidate without an id
//! - VersionedRecord: Record plus the commit version that last wrote it
//! - Write: A buffered mutation awaiting commit
//! - RowChange / TableUpdate: What observers see after a commit
//! - ConnectionId: Client session identity

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a player record
///
/// Ids are assigned by the record store on insert. The first id is 1 and
/// every later id is strictly greater than all ids handed out before it.
/// Callers can name an id to look a record up, but cannot choose the id
/// of a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Wrap a raw id value (used for lookups and decoding requests)
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PlayerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the player table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Store-assigned id, immutable after insert
    pub id: PlayerId,
    /// Trimmed, non-empty display name, immutable after insert
    pub name: String,
    /// Current score, changed only by point adjustments
    pub score: i64,
}

impl PlayerRecord {
    /// Copy of this record with a different score
    pub fn with_score(&self, score: i64) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            score,
        }
    }
}

/// Message for a name that is empty after trimming
pub const EMPTY_NAME: &str = "Name cannot be empty";
/// Message for an insert candidate that does not start at score 0
pub const NONZERO_INITIAL_SCORE: &str = "Initial score must be 0";
/// Message for an update that would rename an existing player
pub const NAME_CHANGED: &str = "Player name cannot change";

/// Insert candidate for the player table
///
/// Carries everything except the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    /// Name to store (already validated and trimmed by the caller)
    pub name: String,
    /// Initial score
    pub score: i64,
}

impl NewPlayer {
    /// Candidate with a zero score
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }

    /// Attach the assigned id
    pub fn into_record(self, id: PlayerId) -> PlayerRecord {
        PlayerRecord {
            id,
            name: self.name,
            score: self.score,
        }
    }
}

/// A stored record tagged with the commit version that last wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    /// The row
    pub record: PlayerRecord,
    /// Commit version of the transaction that wrote this row
    pub version: u64,
}

/// A buffered mutation, applied to the store at commit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    /// Insert or replace the row with this id
    Put(PlayerRecord),
    /// Remove the row with the given id
    Delete(PlayerId),
}

impl Write {
    /// Id of the row this write targets
    pub fn id(&self) -> PlayerId {
        match self {
            Write::Put(record) => record.id,
            Write::Delete(id) => *id,
        }
    }
}

/// A committed change to one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowChange {
    /// Row did not exist before the commit
    Inserted(PlayerRecord),
    /// Row existed and was replaced
    Updated {
        /// Row before the commit
        old: PlayerRecord,
        /// Row after the commit
        new: PlayerRecord,
    },
    /// Row existed and was removed
    Deleted(PlayerRecord),
}

impl RowChange {
    /// Id of the affected row
    pub fn id(&self) -> PlayerId {
        match self {
            RowChange::Inserted(r) | RowChange::Deleted(r) => r.id,
            RowChange::Updated { new, .. } => new.id,
        }
    }
}

/// All row changes produced by one committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableUpdate {
    /// Commit version of the transaction
    pub version: u64,
    /// Changes in ascending id order
    pub changes: Vec<RowChange>,
}

/// Identity of a connected client session
///
/// Wraps a UUID v4 minted by the database when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Create a new random ConnectionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a ConnectionId from its string form
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
