//! The identity → profile mapping table

use chefbook_profile::{ChefProfile, Identity, validate_profile};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;

use crate::error::SnapshotError;

type Rows = HashMap<Identity, ChefProfile>;

/// The single mapping table behind a [`crate::ProfileStore`].
///
/// A table is an ordinary owned value. Hosts create one and hand it to the
/// store (usually behind an `Arc`); there is no process-wide instance.
///
/// Every mutation in the store holds the write guard for its whole
/// read-validate-commit step, so no reader ever sees a half-applied change.
#[derive(Debug, Default)]
pub struct ProfileTable {
    rows: RwLock<Rows>,
}

impl ProfileTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from stored records.
    ///
    /// Every record is re-validated; a duplicate owner or any invalid record
    /// rejects the whole set.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = ChefProfile>,
    ) -> Result<Self, SnapshotError> {
        let mut rows = Rows::new();

        for profile in profiles {
            validate_profile(&profile).map_err(|violation| {
                SnapshotError::invalid_record(profile.owner().as_str(), violation)
            })?;

            let owner = profile.owner().clone();
            if rows.contains_key(&owner) {
                return Err(SnapshotError::DuplicateOwner(owner.to_string()));
            }
            rows.insert(owner, profile);
        }

        Ok(Self {
            rows: RwLock::new(rows),
        })
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the table holds no profiles
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Whether `owner` has a profile
    pub fn contains(&self, owner: &Identity) -> bool {
        self.rows.read().contains_key(owner)
    }

    /// Copy of every record, ordered by owner
    pub fn profiles(&self) -> Vec<ChefProfile> {
        let rows = self.rows.read();
        let mut profiles: Vec<ChefProfile> = rows.values().cloned().collect();
        profiles.sort_by(|a, b| a.owner().cmp(b.owner()));
        profiles
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Rows> {
        self.rows.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Rows> {
        self.rows.write()
    }
}
