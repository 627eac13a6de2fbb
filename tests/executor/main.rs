//! Executor Layer Tests
//!
//! Tests for the public surface re-exported by `tally`:
//! - Tally - high-level typed wrapper API
//! - Executor::invoke - named calls as a host forwards them
//! - Session - connected clients and lifecycle hooks
//! - Subscriptions - commit notifications

mod common;

mod concurrent_clients;
mod lifecycle_hooks;
mod named_calls;
mod subscriptions;
mod tally_api;
