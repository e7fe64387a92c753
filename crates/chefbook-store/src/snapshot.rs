//! Serialized form of a whole profile table

use chefbook_profile::{CURRENT_SCHEMA_VERSION, ChefProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SnapshotError;

/// A point-in-time copy of every stored profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Schema format version for migration tracking.
    /// Snapshots written before versioning deserialize as 0.
    #[serde(default)]
    pub schema_version: u32,
    /// When the snapshot was taken
    #[serde(default)]
    pub written_at: Option<DateTime<Utc>>,
    /// Records, ordered by owner
    pub profiles: Vec<ChefProfile>,
}

impl ProfileSnapshot {
    /// Snapshot of `profiles` taken now, at the current schema version
    pub fn new(profiles: Vec<ChefProfile>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            written_at: Some(Utc::now()),
            profiles,
        }
    }

    /// Parse a snapshot and bring it up to the current schema version
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        migrate_snapshot(&mut snapshot)?;
        Ok(snapshot)
    }

    /// Pretty-printed JSON form
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Migrate a snapshot to the current schema version.
///
/// Returns `Ok(true)` if migration was performed, `Ok(false)` if the snapshot
/// was already current.
///
/// # Errors
///
/// Returns [`SnapshotError::UnsupportedSchemaVersion`] for snapshots written
/// by a newer release.
pub fn migrate_snapshot(snapshot: &mut ProfileSnapshot) -> Result<bool, SnapshotError> {
    if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(SnapshotError::UnsupportedSchemaVersion {
            found: snapshot.schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    if snapshot.schema_version == CURRENT_SCHEMA_VERSION {
        return Ok(false);
    }

    // v0 -> v1: record layout unchanged, only the version field was added.
    let from = snapshot.schema_version;
    snapshot.schema_version = CURRENT_SCHEMA_VERSION;
    info!(from, to = CURRENT_SCHEMA_VERSION, "Snapshot migrated");
    Ok(true)
}
