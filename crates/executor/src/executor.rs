//! The Executor - single entry point to Tally's engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! player table and converts results to outputs.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tally_engine::{Database, PlayerTable};
use tracing::debug;

use crate::handlers::{player, query};
use crate::{Command, Error, Output, Result};

/// The command executor - single entry point to Tally's engine.
///
/// The Executor is **stateless**: it holds a reference to the database but
/// maintains no state of its own. All state lives in the engine.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use tally_executor::{Command, Executor};
///
/// let executor = Executor::new(Database::open());
///
/// // Typed command
/// let out = executor.execute(Command::AddPlayer { name: "Alice".into() })?;
///
/// // Named call, as a host would forward it
/// executor.invoke("add_points", serde_json::json!({"player_id": 1, "amount": 50}))?;
/// ```
#[derive(Clone)]
pub struct Executor {
    table: PlayerTable,
}

impl Executor {
    /// Create a new executor over a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            table: PlayerTable::new(db),
        }
    }

    /// The database this executor runs against
    pub fn database(&self) -> &Arc<Database> {
        self.table.database()
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error. A failed reducer leaves the
    /// table exactly as it was.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let result = self.dispatch(cmd);
        if let Err(e) = &result {
            debug!(target: "tally::executor", command = name, error = %e, "Command failed");
        }
        result
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        let table = &self.table;
        match cmd {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),

            // Reducers
            Command::AddPlayer { name } => player::add_player(table, name),
            Command::RemovePlayer { player_id } => player::remove_player(table, player_id),
            Command::AddPoints { player_id, amount } => {
                player::add_points(table, player_id, amount)
            }
            Command::SubtractPoints { player_id, amount } => {
                player::subtract_points(table, player_id, amount)
            }

            // Queries
            Command::GetPlayer { player_id } => Ok(query::get_player(table, player_id)),
            Command::ListPlayers => Ok(query::list_players(table)),
            Command::Leaderboard { limit } => Ok(query::leaderboard(table, limit)),
        }
    }

    /// Execute multiple commands in order.
    ///
    /// Each command runs in its own transaction; a failure does not stop
    /// later commands or undo earlier ones. Results are returned in input
    /// order.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Invoke an operation by name with JSON arguments.
    ///
    /// This is the host-facing entry point: the transport decodes a named
    /// call into `name` and an argument object, and forwards the result.
    /// Operations without arguments accept `null` or `{}`; operations with
    /// only optional arguments also accept `null`.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` if `name` is not an operation
    /// - `InvalidArguments` if `args` does not decode for that operation
    /// - Otherwise whatever the operation returns
    pub fn invoke(&self, name: &str, args: JsonValue) -> Result<Output> {
        let cmd = decode_call(name, args)?;
        self.execute(cmd)
    }
}

/// Decode a named call into a Command
pub(crate) fn decode_call(name: &str, args: JsonValue) -> Result<Command> {
    if !Command::OPERATION_NAMES.contains(&name) {
        return Err(Error::UnknownOperation {
            name: name.to_string(),
        });
    }

    let tagged = if Command::UNIT_OPERATIONS.contains(&name) {
        match &args {
            JsonValue::Null => JsonValue::String(name.to_string()),
            JsonValue::Object(map) if map.is_empty() => JsonValue::String(name.to_string()),
            other => {
                return Err(Error::InvalidArguments {
                    reason: format!("{} takes no arguments, got {}", name, other),
                })
            }
        }
    } else {
        let args = match args {
            JsonValue::Null => JsonValue::Object(serde_json::Map::new()),
            other => other,
        };
        let mut map = serde_json::Map::new();
        map.insert(name.to_string(), args);
        JsonValue::Object(map)
    };

    serde_json::from_value(tagged).map_err(|e| Error::InvalidArguments {
        reason: format!("{}: {}", name, e),
    })
}
