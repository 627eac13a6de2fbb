//! Error types for Tally
//!
//! This module defines the error taxonomy shared by every layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Caller-visible reducer failures are `InvalidArgument` and `NotFound`.
//! Both abort the triggering transaction with no side effects and are never
//! retried. `TransactionConflict` is raised by optimistic validation at
//! commit time and is the only error the engine retries.

use thiserror::Error;

/// Result type alias for Tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Coarse classification of a [`TallyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-policy input
    InvalidArgument,
    /// Referenced record does not exist
    NotFound,
    /// Commit-time validation detected a concurrent write
    Conflict,
    /// Operation attempted on a finished transaction
    TransactionNotActive,
    /// Configuration could not be loaded or parsed
    Config,
    /// Invariant violation inside the engine
    Internal,
}

/// Error type for all Tally operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// Input rejected by a constraint (empty name, non-positive amount)
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable reason
        message: String,
    },

    /// Referenced player does not exist
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable reason
        message: String,
    },

    /// Transaction aborted because a record it read changed before commit
    #[error("transaction conflict: {reason}")]
    TransactionConflict {
        /// Description of the conflict
        reason: String,
    },

    /// Transaction is committed or aborted and can no longer be used
    #[error("transaction not active (state: {state})")]
    TransactionNotActive {
        /// State the transaction was in
        state: String,
    },

    /// Configuration error
    #[error("config error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// Internal error (bug or exhausted resource)
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable reason
        message: String,
    },
}

impl TallyError {
    /// Construct an `InvalidArgument` error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        TallyError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Construct a `NotFound` error
    pub fn not_found(message: impl Into<String>) -> Self {
        TallyError::NotFound {
            message: message.into(),
        }
    }

    /// Construct a `TransactionConflict` error
    pub fn conflict(reason: impl Into<String>) -> Self {
        TallyError::TransactionConflict {
            reason: reason.into(),
        }
    }

    /// Construct a `Config` error
    pub fn config(message: impl Into<String>) -> Self {
        TallyError::Config {
            message: message.into(),
        }
    }

    /// Construct an `Internal` error
    pub fn internal(message: impl Into<String>) -> Self {
        TallyError::Internal {
            message: message.into(),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TallyError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            TallyError::NotFound { .. } => ErrorKind::NotFound,
            TallyError::TransactionConflict { .. } => ErrorKind::Conflict,
            TallyError::TransactionNotActive { .. } => ErrorKind::TransactionNotActive,
            TallyError::Config { .. } => ErrorKind::Config,
            TallyError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// The bare message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            TallyError::InvalidArgument { message }
            | TallyError::NotFound { message }
            | TallyError::Config { message }
            | TallyError::Internal { message } => message,
            TallyError::TransactionConflict { reason } => reason,
            TallyError::TransactionNotActive { state } => state,
        }
    }

    /// Whether retrying the same transaction body may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, TallyError::TransactionConflict { .. })
    }
}
