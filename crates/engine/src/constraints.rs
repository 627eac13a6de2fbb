//! Constraint validation for player table reducers
//!
//! Pure predicate checks. Each failure carries a fixed, caller-visible
//! message and no check mutates anything. Reducers that need several checks
//! run existence before amount sign, so a missing player is reported even
//! when the amount is also invalid.

use tally_core::{PlayerRecord, Result, TallyError};

pub use tally_core::EMPTY_NAME;
/// Message for a reference to a missing player
pub const PLAYER_NOT_FOUND: &str = "Player not found";
/// Message for a zero or negative point delta
pub const NON_POSITIVE_AMOUNT: &str = "Amount must be positive";
/// Message for a score adjustment that leaves the i64 range
pub const SCORE_OUT_OF_RANGE: &str = "Score out of range";

/// Trim `name` and reject it if nothing is left
///
/// Returns the trimmed form, which is what gets stored.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TallyError::invalid_argument(EMPTY_NAME));
    }
    Ok(trimmed.to_string())
}

/// Require that a lookup found a player
pub fn require_player(found: Option<PlayerRecord>) -> Result<PlayerRecord> {
    found.ok_or_else(|| TallyError::not_found(PLAYER_NOT_FOUND))
}

/// Require a strictly positive point delta
pub fn validate_amount(amount: i64) -> Result<i64> {
    if amount <= 0 {
        return Err(TallyError::invalid_argument(NON_POSITIVE_AMOUNT));
    }
    Ok(amount)
}

/// Apply a signed delta to a score without leaving the i64 range
pub fn adjust_score(score: i64, delta: Delta) -> Result<i64> {
    let adjusted = match delta {
        Delta::Add(amount) => score.checked_add(amount),
        Delta::Subtract(amount) => score.checked_sub(amount),
    };
    adjusted.ok_or_else(|| TallyError::invalid_argument(SCORE_OUT_OF_RANGE))
}

/// Direction of a point adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// Increase the score
    Add(i64),
    /// Decrease the score
    Subtract(i64),
}
