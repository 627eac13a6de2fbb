//! Transaction manager for coordinating commit operations
//!
//! Provides atomic commit by orchestrating, under one commit lock:
//! 1. Validation (first-committer-wins)
//! 2. Version allocation
//! 3. Storage application (visibility)
//! 4. Commit notification
//!
//! ## Commit Sequence
//!
//! ```text
//! 1. lock commit_lock
//! 2. txn.commit(store) - Active → Validating → Committed | Aborted
//! 3. IF conflicts: return error (store untouched)
//! 4. IF read-only: return current version (no version consumed)
//! 5. allocate commit_version (increment global version)
//! 6. store.apply(writes, commit_version) - single atomic swap
//! 7. on_commit(TableUpdate) - observers see commits in version order
//! 8. unlock, return Ok(commit_version)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tally_core::{Storage, TableUpdate};
use tracing::trace;

use crate::{CommitError, TransactionContext};

/// Manages transaction ids, commit versions, and atomic commits
///
/// The global version counter is incremented once per committed
/// transaction that wrote something. All rows written by a transaction get
/// the same commit version.
pub struct TransactionManager {
    /// Monotonically increasing commit version
    version: AtomicU64,
    /// Next transaction id
    next_txn_id: AtomicU64,
    /// Serializes validate + apply so no two commits interleave
    commit_lock: Mutex<()>,
}

impl TransactionManager {
    /// Create a manager starting at `initial_version`
    ///
    /// # Arguments
    /// * `initial_version` - Current version of the store being managed
    pub fn new(initial_version: u64) -> Self {
        Self {
            version: AtomicU64::new(initial_version),
            next_txn_id: AtomicU64::new(1),
            commit_lock: Mutex::new(()),
        }
    }

    /// Get current global version
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Allocate next transaction id
    pub fn next_txn_id(&self) -> u64 {
        self.next_txn_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Allocate next commit version (increment global version)
    fn allocate_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a transaction atomically
    ///
    /// `on_commit` runs while the commit lock is still held, after the
    /// writes are visible to new snapshots, and only when the commit
    /// changed at least one row. It must not start another commit.
    ///
    /// # Returns
    /// - `Ok(commit_version)` on success (the current version for read-only
    ///   transactions)
    /// - `Err(CommitError)` if validation fails or the transaction is not
    ///   active; the store is untouched in both cases
    pub fn commit<S, F>(
        &self,
        txn: &mut TransactionContext,
        store: &S,
        on_commit: F,
    ) -> Result<u64, CommitError>
    where
        S: Storage,
        F: FnOnce(&TableUpdate),
    {
        let _guard = self.commit_lock.lock();

        txn.commit(store)?;

        if txn.is_read_only() {
            return Ok(self.current_version());
        }

        let commit_version = self.allocate_version();
        let changes = store.apply(&txn.writes(), commit_version);

        trace!(
            target: "tally::txn",
            txn_id = txn.txn_id,
            commit_version,
            changes = changes.len(),
            "Writes applied"
        );

        if !changes.is_empty() {
            on_commit(&TableUpdate {
                version: commit_version,
                changes,
            });
        }

        Ok(commit_version)
    }

    /// Run `f` while holding the commit lock
    ///
    /// No commit can validate, apply, or notify while `f` runs. Used to
    /// pair a snapshot with a subscription without missing a commit. `f`
    /// must not commit.
    pub fn with_commit_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.commit_lock.lock();
        f()
    }

    /// Explicitly abort a transaction
    ///
    /// All buffered operations are discarded; the store is never touched.
    pub fn abort(
        &self,
        txn: &mut TransactionContext,
        reason: impl Into<String>,
    ) -> tally_core::Result<()> {
        txn.mark_aborted(reason)
    }
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new(0)
    }
}
