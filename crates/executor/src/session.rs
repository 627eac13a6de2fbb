//! Client sessions.
//!
//! A [`Session`] is one connected client. Opening it raises the
//! client-connected lifecycle event; closing or dropping it raises
//! client-disconnected, exactly once.
//!
//! # Usage
//!
//! ```ignore
//! use tally_executor::{Command, Session};
//!
//! let session = Session::open(db.clone())?;
//! session.execute(Command::AddPlayer { name: "Alice".into() })?;
//! session.close();
//! ```

use std::sync::Arc;

use tally_core::ConnectionId;
use tally_engine::Database;

use crate::convert::convert_result;
use crate::{Command, Executor, Output, Result};

/// A connected client that executes commands through an [`Executor`].
pub struct Session {
    executor: Executor,
    connection: ConnectionId,
    open: bool,
}

impl Session {
    /// Connect a new client session.
    ///
    /// # Errors
    ///
    /// Returns the client-connected hook's error if it rejects the
    /// connection; no session exists in that case.
    pub fn open(db: Arc<Database>) -> Result<Self> {
        let connection = convert_result(db.connect())?;
        Ok(Self {
            executor: Executor::new(db),
            connection,
            open: true,
        })
    }

    /// The connection id assigned at open
    pub fn connection_id(&self) -> ConnectionId {
        self.connection
    }

    /// Whether the session has not been closed
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Execute a command on behalf of this client.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        self.executor.execute(cmd)
    }

    /// Invoke a named operation on behalf of this client.
    pub fn invoke(&self, name: &str, args: serde_json::Value) -> Result<Output> {
        self.executor.invoke(name, args)
    }

    /// Get a reference to the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Disconnect the session.
    pub fn close(mut self) {
        self.disconnect();
    }

    fn disconnect(&mut self) {
        if self.open {
            self.open = false;
            self.executor.database().disconnect(self.connection);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("connection", &self.connection)
            .field("open", &self.open)
            .finish()
    }
}
