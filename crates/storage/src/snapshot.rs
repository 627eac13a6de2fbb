//! StoreSnapshot: point-in-time view of the player table
//!
//! The record store keeps its rows in an `Arc<BTreeMap>` and never mutates a
//! map that a snapshot can see: commits clone-on-write when snapshots are
//! alive. Taking a snapshot is therefore a reference-count bump.
//!
//! # Design Notes
//!
//! - **Immutable**: Once created, the snapshot never changes
//! - **Thread-safe**: Can be shared across threads (Arc-wrapped data)
//! - **Ordered**: Rows are kept by ascending id, so scans are stable

use std::collections::BTreeMap;
use std::sync::Arc;

use tally_core::{PlayerId, SnapshotView, VersionedRecord};

/// Immutable view of the table at one commit version
///
/// # Example
///
/// ```ignore
/// let store = RecordStore::new();
/// let snapshot = store.snapshot();
///
/// // Commits after snapshot creation are not visible
/// store.apply(&[Write::Put(record)], 1);
/// assert!(snapshot.get(record.id).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    version: u64,
    rows: Arc<BTreeMap<PlayerId, VersionedRecord>>,
}

impl StoreSnapshot {
    /// Wrap shared rows at `version`
    ///
    /// Typically called by `RecordStore::snapshot()`, not directly.
    pub fn new(version: u64, rows: Arc<BTreeMap<PlayerId, VersionedRecord>>) -> Self {
        Self { version, rows }
    }

    /// Iterate rows in ascending id order without cloning
    pub fn iter(&self) -> impl Iterator<Item = &VersionedRecord> {
        self.rows.values()
    }
}

impl SnapshotView for StoreSnapshot {
    fn get(&self, id: PlayerId) -> Option<VersionedRecord> {
        self.rows.get(&id).cloned()
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn scan(&self) -> Vec<VersionedRecord> {
        self.rows.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
