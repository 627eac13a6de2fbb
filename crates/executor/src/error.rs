//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: No error information is lost in conversion from internal errors

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Reducer | `InvalidArgument`, `NotFound` | Rejected by validation; nothing changed |
/// | Concurrency | `Conflict` | Lost an optimistic race after all retries |
/// | Dispatch | `UnknownOperation`, `InvalidArguments` | Named call could not be decoded |
/// | Transaction | `TransactionNotActive` | Transaction already finished |
/// | System | `Config`, `Internal` | Infrastructure errors |
///
/// # Example
///
/// ```ignore
/// use tally_executor::{Command, Error};
///
/// match executor.execute(Command::AddPoints { player_id: 999, amount: 10 }) {
///     Ok(_) => {}
///     Err(Error::NotFound { message }) => println!("{}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Reducer Errors ====================
    /// Malformed or out-of-policy input
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Referenced player does not exist
    #[error("not found: {message}")]
    NotFound { message: String },

    // ==================== Concurrency Errors ====================
    /// Optimistic concurrency conflict
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    // ==================== Dispatch Errors ====================
    /// No operation with this name
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    /// Arguments could not be decoded for the named operation
    #[error("invalid arguments: {reason}")]
    InvalidArguments { reason: String },

    // ==================== Transaction Errors ====================
    /// Transaction already committed or aborted
    #[error("transaction not active (state: {state})")]
    TransactionNotActive { state: String },

    // ==================== System Errors ====================
    /// Configuration error
    #[error("config error: {reason}")]
    Config { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Whether the failure came from reducer validation
    ///
    /// Validation failures never mutate state and fail identically when
    /// repeated with the same input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. } | Error::NotFound { .. })
    }
}
