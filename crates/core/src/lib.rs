//! Core types and traits for Tally
//!
//! This crate defines the foundational types used throughout the system:
//! - PlayerId: Store-assigned, strictly increasing record identifier
//! - PlayerRecord / NewPlayer: The player row and its insert candidate
//! - VersionedRecord: A record tagged with the commit version that wrote it
//! - RowChange / TableUpdate: Committed changes delivered to observers
//! - ConnectionId: Identity of a connected client session
//! - Error: TallyError and the Result alias
//! - Traits: Storage and SnapshotView

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, Result, TallyError};
pub use traits::{IdAllocator, SnapshotView, Storage};
pub use types::{
    ConnectionId, NewPlayer, PlayerId, PlayerRecord, RowChange, TableUpdate, VersionedRecord,
    Write, EMPTY_NAME, NAME_CHANGED, NONZERO_INITIAL_SCORE,
};
