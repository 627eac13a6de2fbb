//! Reducer engine for Tally
//!
//! This crate orchestrates the lower layers:
//! - Database: owns the record store, runs transactions, dispatches
//!   lifecycle hooks and commit subscriptions
//! - Constraint validation for reducer inputs
//! - Player table reducers (`PlayerTableExt`) and the `PlayerTable` facade
//! - Transaction coordination and metrics
//! - Configuration via TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constraints;
pub mod coordinator;
pub mod database;
pub mod lifecycle;
pub mod primitives;
pub mod subscription;

pub use coordinator::{TransactionCoordinator, TransactionMetrics};
pub use database::{Database, DatabaseBuilder, RetryConfig, TallyConfig, CONFIG_FILE_NAME};
pub use lifecycle::{HookContext, LifecycleHooks, NoopHooks};
pub use primitives::{PlayerTable, PlayerTableExt};
pub use subscription::{CommitObserver, SubscriptionId};

pub use tally_concurrency::TransactionContext;
