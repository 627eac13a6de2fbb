//! Error conversion from internal error types.
//!
//! This module provides conversions from internal Tally errors to
//! the executor's [`Error`] type.

use tally_core::TallyError;

use crate::Error;

/// Convert a TallyError to an executor Error.
///
/// Each engine variant has a direct counterpart, so the message survives
/// unchanged.
impl From<TallyError> for Error {
    fn from(err: TallyError) -> Self {
        match err {
            TallyError::InvalidArgument { message } => Error::InvalidArgument { message },
            TallyError::NotFound { message } => Error::NotFound { message },
            TallyError::TransactionConflict { reason } => Error::Conflict { reason },
            TallyError::TransactionNotActive { state } => Error::TransactionNotActive { state },
            TallyError::Config { message } => Error::Config { reason: message },
            TallyError::Internal { message } => Error::Internal { reason: message },
        }
    }
}

/// Convert an engine result into an executor result
pub(crate) fn convert_result<T>(result: tally_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
