//! RecordStore: in-memory player table with id assignment and versioning
//!
//! This module implements the Storage trait using:
//! - `Arc<BTreeMap<PlayerId, VersionedRecord>>` for ordered rows
//! - `parking_lot::RwLock` guarding the map together with its commit version
//! - `AtomicU64` for the id counter
//!
//! # Design Notes
//!
//! - **Copy-on-write**: `apply` uses `Arc::make_mut`, so a commit clones the
//!   map only while some snapshot still holds the previous one
//! - **Atomic batches**: all writes of a commit are applied under a single
//!   write-lock acquisition; readers never see half a transaction
//! - **Id ownership**: only `reserve_id` advances the counter, and it never
//!   goes backwards, so an id is never reassigned after a delete

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use tally_core::{
    IdAllocator, PlayerId, Result, RowChange, Storage, TallyError, VersionedRecord, Write,
};

use crate::snapshot::StoreSnapshot;

/// First id handed out by a fresh store
const FIRST_PLAYER_ID: u64 = 1;

#[derive(Debug)]
struct Inner {
    rows: Arc<BTreeMap<PlayerId, VersionedRecord>>,
    version: u64,
}

/// The player table
///
/// Thread-safe through `parking_lot::RwLock` and `AtomicU64`. The store does
/// not validate rows; constraint checks happen in the reducer layer before a
/// write is ever buffered.
#[derive(Debug)]
pub struct RecordStore {
    inner: RwLock<Inner>,
    next_id: AtomicU64,
}

impl RecordStore {
    /// Create a new empty store
    ///
    /// Initial version is 0 (no commits) and the first reserved id is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: Arc::new(BTreeMap::new()),
                version: 0,
            }),
            next_id: AtomicU64::new(FIRST_PLAYER_ID),
        }
    }

    /// Number of committed rows
    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    /// Whether the table has no committed rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id the next `reserve_id` call will return
    pub fn peek_next_id(&self) -> PlayerId {
        PlayerId::new(self.next_id.load(Ordering::SeqCst))
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for RecordStore {
    fn reserve_id(&self) -> Result<PlayerId> {
        self.next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map(PlayerId::new)
            .map_err(|_| TallyError::internal("player id space exhausted"))
    }
}

impl Storage for RecordStore {
    type Snapshot = StoreSnapshot;

    fn get(&self, id: PlayerId) -> Option<VersionedRecord> {
        self.inner.read().rows.get(&id).cloned()
    }

    fn current_version(&self) -> u64 {
        self.inner.read().version
    }

    fn apply(&self, writes: &[Write], version: u64) -> Vec<RowChange> {
        let mut inner = self.inner.write();
        debug_assert!(
            version > inner.version,
            "commit versions must be strictly increasing"
        );

        let rows = Arc::make_mut(&mut inner.rows);
        let mut changes = Vec::with_capacity(writes.len());

        for write in writes {
            match write {
                Write::Put(record) => {
                    let stored = VersionedRecord {
                        record: record.clone(),
                        version,
                    };
                    match rows.insert(record.id, stored) {
                        None => changes.push(RowChange::Inserted(record.clone())),
                        Some(old) if old.record != *record => changes.push(RowChange::Updated {
                            old: old.record,
                            new: record.clone(),
                        }),
                        Some(_) => {}
                    }
                }
                Write::Delete(id) => {
                    if let Some(old) = rows.remove(id) {
                        changes.push(RowChange::Deleted(old.record));
                    }
                }
            }
        }

        inner.version = version;
        changes.sort_by_key(RowChange::id);

        trace!(
            target: "tally::storage",
            version,
            writes = writes.len(),
            changes = changes.len(),
            "Applied commit"
        );

        changes
    }

    fn snapshot(&self) -> StoreSnapshot {
        let inner = self.inner.read();
        StoreSnapshot::new(inner.version, Arc::clone(&inner.rows))
    }
}
