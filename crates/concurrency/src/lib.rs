//! Concurrency layer for Tally
//!
//! This crate implements the transaction scope and optimistic concurrency
//! control (OCC) for the player table:
//! - TransactionContext: buffered writes and read-set tracking over a snapshot
//! - Read-set validation (first-committer-wins) at commit time
//! - TransactionManager: commit lock, version allocation, atomic apply
//!
//! A transaction either applies all of its buffered writes in one step or
//! none of them. Aborting never touches the store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;
pub mod validation;

pub use manager::TransactionManager;
pub use transaction::{CommitError, PendingOperations, TransactionContext, TransactionStatus};
pub use validation::{validate_read_set, ConflictType, ValidationResult};
