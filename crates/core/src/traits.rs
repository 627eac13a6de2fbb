//! Core traits for storage and snapshot abstraction
//!
//! This module defines the Storage and SnapshotView traits that let the
//! concurrency layer validate and commit transactions without knowing how
//! the record store is laid out.

use crate::error::Result;
use crate::types::{PlayerId, RowChange, VersionedRecord, Write};

/// Storage abstraction for the player table
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync). Writes arrive only through
/// [`Storage::apply`], which the transaction manager calls under its
/// commit lock.
pub trait Storage: IdAllocator {
    /// Snapshot type handed to new transactions
    type Snapshot: SnapshotView + 'static;

    /// Current row for `id`, with the version that wrote it
    fn get(&self, id: PlayerId) -> Option<VersionedRecord>;

    /// Version of the most recent commit applied to this store
    fn current_version(&self) -> u64;

    /// Apply a batch of writes atomically at `version`
    ///
    /// Readers observe either none or all of the batch. Returns the row
    /// changes actually made, in ascending id order.
    fn apply(&self, writes: &[Write], version: u64) -> Vec<RowChange>;

    /// Point-in-time view of the whole table
    fn snapshot(&self) -> Self::Snapshot;
}

/// Source of fresh player ids
///
/// Split from [`Storage`] so a transaction can hold it as a trait object.
pub trait IdAllocator: Send + Sync {
    /// Reserve the next player id
    ///
    /// Ids are strictly increasing and never handed out twice, even if the
    /// reserving transaction later aborts.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the id space is exhausted.
    fn reserve_id(&self) -> Result<PlayerId>;
}

/// Read-only, point-in-time view of the player table
///
/// A snapshot never observes commits that happen after it was taken.
pub trait SnapshotView: Send + Sync {
    /// Row for `id` as of this snapshot
    fn get(&self, id: PlayerId) -> Option<VersionedRecord>;

    /// Commit version this snapshot reflects
    fn version(&self) -> u64;

    /// All rows in ascending id order
    fn scan(&self) -> Vec<VersionedRecord>;

    /// Number of rows
    fn len(&self) -> usize;

    /// Whether the table was empty at this snapshot
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
