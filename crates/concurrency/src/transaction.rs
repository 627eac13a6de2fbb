//! Transaction context for OCC
//!
//! TransactionContext is the explicit transaction scope. It reads from a
//! snapshot taken at begin, buffers every mutation locally, and records the
//! version of each record it reads so the manager can detect conflicting
//! commits. Nothing reaches the store until the manager applies the buffer.
//!
//! The record-store contract (`insert`, `find_by_id`, `update`,
//! `delete_by_id`) is exposed here so reducers only ever mutate the table
//! inside a scope.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tally_core::{
    IdAllocator, NewPlayer, PlayerId, PlayerRecord, Result, SnapshotView, Storage, TallyError,
    Write, EMPTY_NAME, NAME_CHANGED, NONZERO_INITIAL_SCORE,
};

use crate::validation::{validate_read_set, ValidationResult, ABSENT_VERSION};

/// Error type for commit failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// Transaction aborted due to read-set conflicts
    #[error("commit failed: {} conflict(s)", .0.conflict_count())]
    ValidationFailed(ValidationResult),

    /// Transaction was not in the correct state for commit
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl From<CommitError> for TallyError {
    fn from(e: CommitError) -> Self {
        match e {
            CommitError::ValidationFailed(result) => TallyError::conflict(format!(
                "{} conflicting record(s): {:?}",
                result.conflict_count(),
                result
                    .conflicting_ids()
                    .iter()
                    .map(PlayerId::as_u64)
                    .collect::<Vec<_>>()
            )),
            CommitError::InvalidState(state) => TallyError::TransactionNotActive { state },
        }
    }
}

/// Summary of buffered operations that would be discarded on abort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingOperations {
    /// Buffered inserts and updates
    pub puts: usize,
    /// Buffered deletes
    pub deletes: usize,
}

impl PendingOperations {
    /// Total number of pending operations
    pub fn total(&self) -> usize {
        self.puts + self.deletes
    }

    /// Check if there are no pending operations
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Status of a transaction in its lifecycle
///
/// State transitions:
/// - `Active` → `Validating` (begin commit)
/// - `Validating` → `Committed` (validation passed)
/// - `Validating` → `Aborted` (conflict detected)
/// - `Active` → `Aborted` (reducer error or explicit abort)
///
/// `Committed` and `Aborted` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Transaction is executing, can read/write
    Active,
    /// Transaction is being validated for conflicts
    Validating,
    /// Transaction committed successfully
    Committed,
    /// Transaction was aborted
    Aborted {
        /// Human-readable reason for abort
        reason: String,
    },
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Active => write!(f, "Active"),
            TransactionStatus::Validating => write!(f, "Validating"),
            TransactionStatus::Committed => write!(f, "Committed"),
            TransactionStatus::Aborted { reason } => write!(f, "Aborted ({})", reason),
        }
    }
}

/// A transaction scope over the player table
pub struct TransactionContext {
    /// Unique transaction id
    pub txn_id: u64,
    /// Commit version of the snapshot this transaction reads from
    pub start_version: u64,
    /// Current lifecycle status
    pub status: TransactionStatus,
    snapshot: Box<dyn SnapshotView>,
    ids: Arc<dyn IdAllocator>,
    read_set: BTreeMap<PlayerId, u64>,
    write_set: BTreeMap<PlayerId, Write>,
    inserted: BTreeSet<PlayerId>,
    started_at: Instant,
}

impl TransactionContext {
    /// Create an active transaction over `snapshot`
    ///
    /// `ids` is the store's id allocator; `insert` draws from it directly.
    pub fn with_snapshot(
        txn_id: u64,
        snapshot: Box<dyn SnapshotView>,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        Self {
            txn_id,
            start_version: snapshot.version(),
            status: TransactionStatus::Active,
            snapshot,
            ids,
            read_set: BTreeMap::new(),
            write_set: BTreeMap::new(),
            inserted: BTreeSet::new(),
            started_at: Instant::now(),
        }
    }

    // ========== State ==========

    /// Whether the transaction can still read and write
    pub fn is_active(&self) -> bool {
        self.status == TransactionStatus::Active
    }

    /// Fail with `TransactionNotActive` unless the transaction is active
    pub fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TallyError::TransactionNotActive {
                state: self.status.to_string(),
            })
        }
    }

    /// Whether the transaction can still be aborted
    pub fn can_rollback(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Active | TransactionStatus::Validating
        )
    }

    /// Abort the transaction, discarding all buffered writes
    ///
    /// # Errors
    ///
    /// Returns `TransactionNotActive` if already committed or aborted.
    pub fn mark_aborted(&mut self, reason: impl Into<String>) -> Result<()> {
        if !self.can_rollback() {
            return Err(TallyError::TransactionNotActive {
                state: self.status.to_string(),
            });
        }
        self.write_set.clear();
        self.inserted.clear();
        self.status = TransactionStatus::Aborted {
            reason: reason.into(),
        };
        Ok(())
    }

    /// Reason the transaction was aborted, if it was
    pub fn abort_reason(&self) -> Option<&str> {
        match &self.status {
            TransactionStatus::Aborted { reason } => Some(reason),
            _ => None,
        }
    }

    /// Time since the transaction began
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    // ========== Record store contract ==========

    /// Look up a record by id
    ///
    /// Sees this transaction's own buffered writes. The first lookup of a
    /// committed id records its version (or absence) in the read set.
    pub fn find_by_id(&mut self, id: PlayerId) -> Result<Option<PlayerRecord>> {
        self.ensure_active()?;

        if let Some(write) = self.write_set.get(&id) {
            return Ok(match write {
                Write::Put(record) => Some(record.clone()),
                Write::Delete(_) => None,
            });
        }
        if self.inserted.contains(&id) {
            return Ok(None);
        }

        let stored = self.snapshot.get(id);
        self.read_set
            .entry(id)
            .or_insert_with(|| stored.as_ref().map_or(ABSENT_VERSION, |s| s.version));
        Ok(stored.map(|s| s.record))
    }

    /// Insert a new record and return its store-assigned id
    ///
    /// The name is stored trimmed. No id is reserved for a rejected
    /// candidate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty after trimming or the
    /// initial score is not 0.
    pub fn insert(&mut self, candidate: NewPlayer) -> Result<PlayerId> {
        self.ensure_active()?;
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(TallyError::invalid_argument(EMPTY_NAME));
        }
        if candidate.score != 0 {
            return Err(TallyError::invalid_argument(NONZERO_INITIAL_SCORE));
        }
        let candidate = NewPlayer::named(name);

        let id = self.ids.reserve_id()?;
        self.inserted.insert(id);
        self.write_set
            .insert(id, Write::Put(candidate.into_record(id)));
        Ok(id)
    }

    /// Replace the record carrying `record.id`
    ///
    /// Only the score may change; ids and names are fixed at insert.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such record is visible to this transaction,
    /// and `InvalidArgument` if `record.name` differs from the stored name.
    pub fn update(&mut self, record: PlayerRecord) -> Result<()> {
        let Some(current) = self.find_by_id(record.id)? else {
            return Err(TallyError::not_found(format!(
                "no record with id {}",
                record.id
            )));
        };
        if current.name != record.name {
            return Err(TallyError::invalid_argument(NAME_CHANGED));
        }
        self.write_set.insert(record.id, Write::Put(record));
        Ok(())
    }

    /// Delete the record with `id`
    ///
    /// Returns `true` if the record existed. Deleting an absent id changes
    /// nothing.
    pub fn delete_by_id(&mut self, id: PlayerId) -> Result<bool> {
        if self.find_by_id(id)?.is_none() {
            return Ok(false);
        }
        if self.inserted.contains(&id) {
            // Created and removed inside this transaction: nothing to apply.
            self.write_set.remove(&id);
        } else {
            self.write_set.insert(id, Write::Delete(id));
        }
        Ok(true)
    }

    /// All records visible to this transaction, in ascending id order
    ///
    /// Every committed row returned is added to the read set. Rows that
    /// other transactions insert concurrently are not tracked.
    pub fn scan(&mut self) -> Result<Vec<PlayerRecord>> {
        self.ensure_active()?;

        let mut rows: BTreeMap<PlayerId, PlayerRecord> = BTreeMap::new();
        for stored in self.snapshot.scan() {
            self.read_set
                .entry(stored.record.id)
                .or_insert(stored.version);
            rows.insert(stored.record.id, stored.record);
        }
        for (id, write) in &self.write_set {
            match write {
                Write::Put(record) => {
                    rows.insert(*id, record.clone());
                }
                Write::Delete(_) => {
                    rows.remove(id);
                }
            }
        }
        Ok(rows.into_values().collect())
    }

    // ========== Commit support ==========

    /// Ids read from committed state, with the versions observed
    pub fn read_set(&self) -> &BTreeMap<PlayerId, u64> {
        &self.read_set
    }

    /// Buffered writes in ascending id order
    pub fn writes(&self) -> Vec<Write> {
        self.write_set.values().cloned().collect()
    }

    /// Whether the transaction has buffered no writes
    pub fn is_read_only(&self) -> bool {
        self.write_set.is_empty()
    }

    /// Counts of buffered operations
    pub fn pending_operations(&self) -> PendingOperations {
        self.write_set
            .values()
            .fold(PendingOperations::default(), |mut acc, w| {
                match w {
                    Write::Put(_) => acc.puts += 1,
                    Write::Delete(_) => acc.deletes += 1,
                }
                acc
            })
    }

    /// Validate against `store` and move to `Committed`
    ///
    /// Performs `Active → Validating → Committed`, or
    /// `Active → Validating → Aborted` if the read set conflicts.
    /// Applying the writes is the manager's job; this only decides.
    pub fn commit<S: Storage>(&mut self, store: &S) -> std::result::Result<(), CommitError> {
        if !self.is_active() {
            return Err(CommitError::InvalidState(self.status.to_string()));
        }
        self.status = TransactionStatus::Validating;

        let result = validate_read_set(&self.read_set, store);
        if !result.is_valid() {
            self.write_set.clear();
            self.inserted.clear();
            self.status = TransactionStatus::Aborted {
                reason: format!("{} read-write conflict(s)", result.conflict_count()),
            };
            return Err(CommitError::ValidationFailed(result));
        }

        self.status = TransactionStatus::Committed;
        Ok(())
    }
}

impl fmt::Debug for TransactionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionContext")
            .field("txn_id", &self.txn_id)
            .field("start_version", &self.start_version)
            .field("status", &self.status)
            .field("reads", &self.read_set.len())
            .field("writes", &self.write_set.len())
            .finish()
    }
}
