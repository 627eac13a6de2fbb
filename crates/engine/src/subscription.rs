//! Commit subscriptions
//!
//! The player table is public: observers can subscribe to every committed
//! change. Observers are called by the committing thread while the commit
//! lock is held, so they see updates in commit-version order, after the
//! writes are visible and before the committing call returns. Aborted
//! transactions never notify.
//!
//! Observers must be quick and must not run transactions on the same
//! database.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tally_core::TableUpdate;

/// Callback receiving committed table updates
pub type CommitObserver = Arc<dyn Fn(&TableUpdate) + Send + Sync>;

/// Handle returned by `Database::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Registered observers, in registration order
#[derive(Default)]
pub(crate) struct SubscriptionRegistry {
    next_id: AtomicU64,
    observers: RwLock<Vec<(SubscriptionId, CommitObserver)>>,
}

impl SubscriptionRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, observer: CommitObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub(crate) fn notify(&self, update: &TableUpdate) {
        // Clone the list so an observer may unsubscribe without deadlocking.
        let observers: Vec<CommitObserver> = self
            .observers
            .read()
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in observers {
            observer(update);
        }
    }
}
