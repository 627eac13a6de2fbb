//! Storage layer for Tally
//!
//! This crate implements the player record store:
//! - RecordStore: copy-on-write `BTreeMap` behind a `parking_lot::RwLock`
//! - Store-owned id counter (starts at 1, strictly increasing, never reused)
//! - Commit version tracking
//! - StoreSnapshot: O(1) point-in-time views for transaction isolation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod snapshot;
pub mod store;

pub use snapshot::StoreSnapshot;
pub use store::RecordStore;
