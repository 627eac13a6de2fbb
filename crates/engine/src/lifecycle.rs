//! Lifecycle hooks invoked by the host
//!
//! Three callbacks: module init (once per database), client connected, and
//! client disconnected. The default implementations do nothing; they are the
//! extension point for state such as presence tracking.
//!
//! Hooks run outside any reducer transaction and are not ordered relative to
//! concurrent reducer calls.

use chrono::{DateTime, Utc};
use tally_core::{ConnectionId, Result};

/// Context handed to every lifecycle hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    /// The client the event concerns; `None` for module init
    pub connection: Option<ConnectionId>,
    /// When the host raised the event
    pub timestamp: DateTime<Utc>,
}

impl HookContext {
    /// Context for module init
    pub fn init() -> Self {
        Self {
            connection: None,
            timestamp: Utc::now(),
        }
    }

    /// Context for a connect or disconnect event
    pub fn for_connection(connection: ConnectionId) -> Self {
        Self {
            connection: Some(connection),
            timestamp: Utc::now(),
        }
    }
}

/// Host-invoked callbacks around reducer execution
///
/// An error from `init` fails database activation; an error from
/// `client_connected` rejects the connection. `client_disconnected` errors
/// are logged and otherwise ignored, since the session is gone either way.
pub trait LifecycleHooks: Send + Sync {
    /// Called once, the first time the database is activated
    fn init(&self, _ctx: &HookContext) -> Result<()> {
        Ok(())
    }

    /// Called once per new client session
    fn client_connected(&self, _ctx: &HookContext) -> Result<()> {
        Ok(())
    }

    /// Called once per ended client session
    fn client_disconnected(&self, _ctx: &HookContext) -> Result<()> {
        Ok(())
    }
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl LifecycleHooks for NoopHooks {}
