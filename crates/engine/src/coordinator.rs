//! Transaction coordinator for managing transaction lifecycle
//!
//! The TransactionCoordinator wraps TransactionManager and adds:
//! - Active transaction tracking
//! - Transaction metrics (started, committed, aborted)
//! - Conversion of commit failures into `TallyError`

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tally_concurrency::{TransactionContext, TransactionManager};
use tally_core::{IdAllocator, Result, SnapshotView, Storage, TableUpdate, TallyError};
use tally_storage::RecordStore;
use tracing::{debug, warn};

/// Transaction coordinator for the database
///
/// # Memory Ordering
///
/// The metric counters use Relaxed ordering: they are observational only
/// and do not synchronize any other memory operations.
pub struct TransactionCoordinator {
    manager: TransactionManager,
    active_count: AtomicU64,
    total_started: AtomicU64,
    total_committed: AtomicU64,
    total_aborted: AtomicU64,
}

impl TransactionCoordinator {
    /// Create new coordinator with initial version
    pub fn new(initial_version: u64) -> Self {
        Self {
            manager: TransactionManager::new(initial_version),
            active_count: AtomicU64::new(0),
            total_started: AtomicU64::new(0),
            total_committed: AtomicU64::new(0),
            total_aborted: AtomicU64::new(0),
        }
    }

    /// Start a new transaction over a snapshot of `storage`
    pub fn start_transaction(&self, storage: &Arc<RecordStore>) -> TransactionContext {
        let txn_id = self.manager.next_txn_id();
        let snapshot = storage.snapshot();

        self.active_count.fetch_add(1, Ordering::Relaxed);
        self.total_started.fetch_add(1, Ordering::Relaxed);

        debug!(
            target: "tally::txn",
            txn_id,
            start_version = snapshot.version(),
            "Transaction started"
        );

        TransactionContext::with_snapshot(
            txn_id,
            Box::new(snapshot),
            Arc::clone(storage) as Arc<dyn IdAllocator>,
        )
    }

    /// Commit a transaction through the concurrency layer
    ///
    /// Records commit/abort metrics and converts `CommitError` into
    /// `TallyError`. `on_commit` is forwarded to the manager.
    pub fn commit<S, F>(
        &self,
        txn: &mut TransactionContext,
        store: &S,
        on_commit: F,
    ) -> Result<u64>
    where
        S: Storage,
        F: FnOnce(&TableUpdate),
    {
        match self.manager.commit(txn, store, on_commit) {
            Ok(version) => {
                self.record_commit();
                debug!(
                    target: "tally::txn",
                    txn_id = txn.txn_id,
                    version,
                    elapsed_us = txn.elapsed().as_micros() as u64,
                    "Transaction committed"
                );
                Ok(version)
            }
            Err(e) => {
                self.record_abort();
                warn!(target: "tally::txn", txn_id = txn.txn_id, error = %e, "Transaction aborted");
                Err(TallyError::from(e))
            }
        }
    }

    /// Abort a transaction, discarding its writes
    pub fn abort(&self, txn: &mut TransactionContext, reason: impl Into<String>) {
        if txn.can_rollback() {
            let _ = self.manager.abort(txn, reason);
        }
        self.record_abort();
        debug!(target: "tally::txn", txn_id = txn.txn_id, "Transaction rolled back");
    }

    fn record_commit(&self) {
        let _ = self
            .active_count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |x| {
                Some(x.saturating_sub(1))
            });
        self.total_committed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_abort(&self) {
        let _ = self
            .active_count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |x| {
                Some(x.saturating_sub(1))
            });
        self.total_aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Run `f` with commits held off
    pub fn with_commit_lock<R>(&self, f: impl FnOnce() -> R) -> R {
        self.manager.with_commit_lock(f)
    }

    /// Get current global version
    pub fn current_version(&self) -> u64 {
        self.manager.current_version()
    }

    /// Get transaction metrics
    pub fn metrics(&self) -> TransactionMetrics {
        let started = self.total_started.load(Ordering::Relaxed);
        let committed = self.total_committed.load(Ordering::Relaxed);

        TransactionMetrics {
            active_count: self.active_count.load(Ordering::Relaxed),
            total_started: started,
            total_committed: committed,
            total_aborted: self.total_aborted.load(Ordering::Relaxed),
            commit_rate: if started > 0 {
                committed as f64 / started as f64
            } else {
                0.0
            },
        }
    }
}

/// Transaction metrics
#[derive(Debug, Clone)]
pub struct TransactionMetrics {
    /// Number of currently active transactions
    pub active_count: u64,
    /// Total number of transactions started
    pub total_started: u64,
    /// Total number of transactions committed
    pub total_committed: u64,
    /// Total number of transactions aborted
    pub total_aborted: u64,
    /// Commit success rate (committed / started)
    pub commit_rate: f64,
}

impl TransactionMetrics {
    /// Total transactions that completed (committed + aborted)
    pub fn total_completed(&self) -> u64 {
        self.total_committed + self.total_aborted
    }

    /// Abort rate (aborted / started)
    pub fn abort_rate(&self) -> f64 {
        if self.total_started > 0 {
            self.total_aborted as f64 / self.total_started as f64
        } else {
            0.0
        }
    }
}
