//! Error types for snapshot persistence
//!
//! Store operations themselves report [`chefbook_errors::StoreError`]; the
//! errors here only arise when a table is rebuilt from a snapshot.

use chefbook_errors::FieldViolation;
use thiserror::Error;

/// Errors that can occur while loading a profile snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Snapshot written by a newer release
    #[error("Unsupported snapshot schema version {found}: maximum supported is {supported}")]
    UnsupportedSchemaVersion {
        /// Version found in the snapshot
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },

    /// Two records claim the same owner
    #[error("Duplicate profile owner in snapshot: {0}")]
    DuplicateOwner(String),

    /// A stored record violates a field constraint
    #[error("Invalid profile for {owner}: {violation}")]
    InvalidRecord {
        /// Owner of the rejected record
        owner: String,
        /// The violated constraint
        violation: FieldViolation,
    },
}

impl SnapshotError {
    /// Create an invalid record error
    pub fn invalid_record(owner: impl Into<String>, violation: FieldViolation) -> Self {
        Self::InvalidRecord {
            owner: owner.into(),
            violation,
        }
    }
}
