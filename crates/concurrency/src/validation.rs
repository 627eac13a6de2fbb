//! Transaction validation for OCC
//!
//! Key rules:
//! - First-committer-wins based on the READ-SET
//! - A record the transaction read (or found absent) must still be at the
//!   same version when the transaction commits
//! - Inserts of freshly reserved ids never conflict, because no other
//!   transaction can hold the same id
//!
//! Every reducer reads a record before it writes it, so read-set validation
//! alone makes reducer transactions serializable.

use std::collections::BTreeMap;

use tally_core::{PlayerId, Storage};

/// Version recorded for a record that did not exist when read
pub const ABSENT_VERSION: u64 = 0;

/// Types of conflicts that can occur during transaction validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    /// Record was read at one version but the store now holds another
    ///
    /// Covers all three shapes of concurrent change: the record was
    /// updated, deleted (`current_version == 0`), or created where the
    /// transaction saw nothing (`read_version == 0`).
    ReadWriteConflict {
        /// The record that changed
        id: PlayerId,
        /// Version recorded in the read set
        read_version: u64,
        /// Version in storage at validation time
        current_version: u64,
    },
}

/// Result of transaction validation
///
/// A transaction commits only if `is_valid()` returns true.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    /// All conflicts detected during validation
    pub conflicts: Vec<ConflictType>,
}

impl ValidationResult {
    /// A successful validation result (no conflicts)
    pub fn ok() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Ids involved in conflicts
    pub fn conflicting_ids(&self) -> Vec<PlayerId> {
        self.conflicts
            .iter()
            .map(|c| match c {
                ConflictType::ReadWriteConflict { id, .. } => *id,
            })
            .collect()
    }
}

/// Validate a read set against current storage state
///
/// For each id in the read set, compare the recorded version with the
/// version currently stored (`ABSENT_VERSION` if the row is gone).
/// All conflicts are collected, not just the first.
pub fn validate_read_set<S: Storage>(
    read_set: &BTreeMap<PlayerId, u64>,
    store: &S,
) -> ValidationResult {
    let conflicts = read_set
        .iter()
        .filter_map(|(&id, &read_version)| {
            let current_version = store
                .get(id)
                .map(|stored| stored.version)
                .unwrap_or(ABSENT_VERSION);
            (current_version != read_version).then_some(ConflictType::ReadWriteConflict {
                id,
                read_version,
                current_version,
            })
        })
        .collect();

    ValidationResult { conflicts }
}
