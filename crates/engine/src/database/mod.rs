//! Database struct and transaction API
//!
//! This module provides the main Database struct that orchestrates:
//! - The record store and its id counter
//! - Transactions (optimistic, serializable)
//! - Commit subscriptions
//! - Lifecycle hook dispatch
//!
//! ## Transaction API
//!
//! The Database provides two ways to execute transactions:
//!
//! 1. **Closure API** (recommended): `db.transaction(|txn| { ... })`
//!    - Automatic commit on success, abort on error
//!    - Returns the closure's return value
//!
//! 2. **Manual API**: `begin_transaction()` + `commit_transaction()`
//!    - For cases requiring external control over commit timing

mod builder;
pub mod config;
mod transactions;

pub use builder::DatabaseBuilder;
pub use config::{TallyConfig, CONFIG_FILE_NAME};
pub use transactions::RetryConfig;

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tally_concurrency::TransactionContext;
use tally_core::{ConnectionId, PlayerRecord, Result, SnapshotView, Storage, TableUpdate};
use tally_storage::{RecordStore, StoreSnapshot};
use tracing::{debug, info, warn};

use crate::coordinator::{TransactionCoordinator, TransactionMetrics};
use crate::lifecycle::{HookContext, LifecycleHooks};
use crate::subscription::{CommitObserver, SubscriptionId, SubscriptionRegistry};

/// Main database struct with transaction support
///
/// Owns the player table. Create one with `Database::open()` or
/// `Database::builder()`; share it as `Arc<Database>`.
///
/// # Example
///
/// ```text
/// use tally_engine::{Database, PlayerTableExt};
///
/// let db = Database::open();
/// let id = db.transaction(|txn| txn.add_player("Alice"))?;
/// db.transaction(|txn| txn.add_points(id, 50))?;
/// ```
pub struct Database {
    /// Copy-on-write player table, shared with transaction snapshots
    storage: Arc<RecordStore>,

    /// Commit protocol, version allocation, and metrics
    coordinator: TransactionCoordinator,

    /// Configuration (mirrors tally.toml)
    config: RwLock<TallyConfig>,

    /// Host lifecycle callbacks
    hooks: Arc<dyn LifecycleHooks>,

    /// Commit observers
    subscriptions: SubscriptionRegistry,

    /// Held for the whole of each reducer call, so reducers never race
    /// each other on the optimistic path
    reducer_lock: Mutex<()>,

    /// Sessions that connected and have not disconnected yet
    connections: Mutex<HashSet<ConnectionId>>,

    /// Whether the init hook has succeeded. The mutex also serializes
    /// concurrent `init` calls so the hook runs once.
    initialized: Mutex<bool>,
}

impl Database {
    pub(crate) fn new(config: TallyConfig, hooks: Arc<dyn LifecycleHooks>) -> Self {
        let storage = Arc::new(RecordStore::new());
        let coordinator = TransactionCoordinator::new(storage.current_version());
        Self {
            storage,
            coordinator,
            config: RwLock::new(config),
            hooks,
            subscriptions: SubscriptionRegistry::new(),
            reducer_lock: Mutex::new(()),
            connections: Mutex::new(HashSet::new()),
            initialized: Mutex::new(false),
        }
    }

    /// Open an empty database with the default config and no-op hooks
    pub fn open() -> Arc<Self> {
        Self::builder().open()
    }

    /// Open an empty database with `config` and no-op hooks
    pub fn with_config(config: TallyConfig) -> Arc<Self> {
        Self::builder().config(config).open()
    }

    /// Start configuring a database
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current configuration
    pub fn config(&self) -> TallyConfig {
        self.config.read().clone()
    }

    /// Modify the configuration in place
    ///
    /// Takes effect for transactions started afterwards.
    pub fn update_config<F: FnOnce(&mut TallyConfig)>(&self, f: F) {
        let mut config = self.config.write();
        f(&mut config);
        debug!(target: "tally::config", max_retries = config.retry.max_retries, "Config updated");
    }

    /// Version of the latest commit that changed the table
    pub fn current_version(&self) -> u64 {
        self.coordinator.current_version()
    }

    /// Point-in-time view of the committed table
    pub fn snapshot(&self) -> StoreSnapshot {
        self.storage.snapshot()
    }

    /// Transaction counters
    pub fn metrics(&self) -> TransactionMetrics {
        self.coordinator.metrics()
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Execute a transaction with the given closure
    ///
    /// - Creates a TransactionContext over a snapshot
    /// - Executes the closure with the transaction
    /// - Validates and commits on success
    /// - Aborts on error, leaving the table untouched
    ///
    /// # Returns
    /// * `Ok(T)` - Closure return value on successful commit
    /// * `Err` - The closure's error, or `TransactionConflict` if a
    ///   concurrent commit invalidated what the closure read
    ///
    /// # Example
    /// ```text
    /// let score = db.transaction(|txn| {
    ///     let player = txn.find_by_id(id)?;
    ///     Ok(player.map(|p| p.score))
    /// })?;
    /// ```
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut TransactionContext) -> Result<T>,
    {
        self.transaction_with_version(f).map(|(value, _)| value)
    }

    /// Execute a transaction and return both the result and commit version
    ///
    /// Read-only transactions report the current version without
    /// consuming a new one.
    pub fn transaction_with_version<F, T>(&self, f: F) -> Result<(T, u64)>
    where
        F: FnOnce(&mut TransactionContext) -> Result<T>,
    {
        let mut txn = self.begin_transaction();
        let result = f(&mut txn);
        self.run_single_attempt(&mut txn, result)
    }

    /// Execute a transaction with automatic retry on conflict
    ///
    /// The closure is called repeatedly until either:
    /// - The transaction commits successfully
    /// - A non-conflict error occurs (not retried)
    /// - Maximum retries are exceeded (the last conflict is returned)
    ///
    /// Each attempt runs against a fresh snapshot.
    pub fn transaction_with_retry<F, T>(&self, config: RetryConfig, f: F) -> Result<T>
    where
        F: Fn(&mut TransactionContext) -> Result<T>,
    {
        let mut attempt = 0;
        loop {
            let mut txn = self.begin_transaction();
            let result = f(&mut txn);
            match self.run_single_attempt(&mut txn, result) {
                Ok((value, _)) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < config.max_retries => {
                    let delay = config.calculate_delay(attempt);
                    debug!(
                        target: "tally::txn",
                        attempt = attempt + 1,
                        max_retries = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after conflict"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Run a reducer body in its own transaction, one reducer at a time
    ///
    /// Reducer calls on the same database are serialized, so two reducers
    /// never conflict with each other. A conflict can only come from a raw
    /// transaction committing concurrently, and is retried under the
    /// configured `RetryConfig`. Must not be called from inside another
    /// reducer body.
    pub fn run_reducer<F, T>(&self, f: F) -> Result<T>
    where
        F: Fn(&mut TransactionContext) -> Result<T>,
    {
        let retry = self.config().retry;
        let _guard = self.reducer_lock.lock();
        self.transaction_with_retry(retry, f)
    }

    /// Begin a new transaction (for manual control)
    ///
    /// Returns a TransactionContext that must be committed with
    /// `commit_transaction()` or discarded with `abort_transaction()`.
    /// Dropping it without either discards it too, but is not counted in
    /// the metrics.
    pub fn begin_transaction(&self) -> TransactionContext {
        self.coordinator.start_transaction(&self.storage)
    }

    /// Commit a transaction
    ///
    /// # Returns
    /// * `Ok(commit_version)` - All writes applied with this version
    ///
    /// # Errors
    /// - `TransactionConflict` - A record the transaction read changed
    /// - `TransactionNotActive` - The transaction already finished
    pub fn commit_transaction(&self, txn: &mut TransactionContext) -> Result<u64> {
        let subscriptions = &self.subscriptions;
        self.coordinator
            .commit(txn, self.storage.as_ref(), |update: &TableUpdate| {
                subscriptions.notify(update)
            })
    }

    /// Abort a transaction, discarding its buffered writes
    pub fn abort_transaction(&self, txn: &mut TransactionContext, reason: impl Into<String>) {
        self.coordinator.abort(txn, reason);
    }

    fn run_single_attempt<T>(
        &self,
        txn: &mut TransactionContext,
        result: Result<T>,
    ) -> Result<(T, u64)> {
        match result {
            Ok(value) => {
                let commit_version = self.commit_transaction(txn)?;
                Ok((value, commit_version))
            }
            Err(e) => {
                self.coordinator.abort(txn, format!("Closure error: {}", e));
                Err(e)
            }
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Subscribe to committed changes
    ///
    /// Returns the subscription handle and the committed rows at the moment
    /// of registration, in ascending id order. Every later commit that
    /// changes the table is delivered to `observer` exactly once, in
    /// version order. The observer runs on the committing thread with the
    /// commit lock held and must not run transactions or subscribe.
    pub fn subscribe<F>(&self, observer: F) -> (SubscriptionId, Vec<PlayerRecord>)
    where
        F: Fn(&TableUpdate) + Send + Sync + 'static,
    {
        let observer: CommitObserver = Arc::new(observer);
        let (id, snapshot) = self.coordinator.with_commit_lock(|| {
            (self.subscriptions.register(observer), self.storage.snapshot())
        });
        debug!(
            target: "tally::txn",
            subscription = %id,
            version = snapshot.version(),
            "Subscribed"
        );
        let rows = snapshot.iter().map(|stored| stored.record.clone()).collect();
        (id, rows)
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(id)
    }

    /// Number of registered observers
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Run the init hook if it has not succeeded yet
    ///
    /// Later calls are no-ops. If the hook fails, the error is returned
    /// and the next call runs it again.
    pub fn init(&self) -> Result<()> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }
        if let Err(e) = self.hooks.init(&HookContext::init()) {
            warn!(target: "tally::lifecycle", error = %e, "Init hook failed");
            return Err(e);
        }
        *initialized = true;
        info!(target: "tally::lifecycle", "Module initialized");
        Ok(())
    }

    /// Whether the init hook has succeeded
    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }

    /// Register a new client session
    ///
    /// # Errors
    ///
    /// Whatever `client_connected` returns; the connection is rejected and
    /// not registered.
    pub fn connect(&self) -> Result<ConnectionId> {
        let id = ConnectionId::new();
        if let Err(e) = self
            .hooks
            .client_connected(&HookContext::for_connection(id))
        {
            warn!(target: "tally::lifecycle", connection = %id, error = %e, "Connection rejected");
            return Err(e);
        }
        self.connections.lock().insert(id);
        info!(target: "tally::lifecycle", connection = %id, "Client connected");
        Ok(id)
    }

    /// End a client session
    ///
    /// Runs `client_disconnected` once per connected id. Returns `false`
    /// (and runs nothing) for ids that are unknown or already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        if !self.connections.lock().remove(&id) {
            debug!(target: "tally::lifecycle", connection = %id, "Disconnect for unknown connection");
            return false;
        }
        if let Err(e) = self
            .hooks
            .client_disconnected(&HookContext::for_connection(id))
        {
            warn!(target: "tally::lifecycle", connection = %id, error = %e, "Disconnect hook failed");
        }
        info!(target: "tally::lifecycle", connection = %id, "Client disconnected");
        true
    }

    /// Whether `id` is a live session
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().contains(&id)
    }

    /// Number of live sessions
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("version", &self.current_version())
            .field("players", &self.storage.len())
            .field("subscribers", &self.subscriber_count())
            .field("connections", &self.connection_count())
            .finish()
    }
}
