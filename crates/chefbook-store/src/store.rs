//! Profile store core implementation

use chefbook_errors::{FieldViolation, ListField, Result, StoreError};
use chefbook_profile::{
    ChefProfile, Identity, ProfileFields, validate_fields, validate_list, validate_new_name,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::snapshot::ProfileSnapshot;
use crate::table::ProfileTable;

/// The operation a [`Confirmation`] acknowledges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `create`
    Create,
    /// `modify`
    Modify,
    /// `delete`
    Delete,
    /// `update_name`
    UpdateName,
    /// `upgrade_recipe_collection`
    UpgradeRecipeCollection,
    /// `restore_from_backup`
    RestoreFromBackup,
    /// `endorse_chef`
    EndorseChef,
}

impl Operation {
    /// Operation name as used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Modify => "modify",
            Operation::Delete => "delete",
            Operation::UpdateName => "update_name",
            Operation::UpgradeRecipeCollection => "upgrade_recipe_collection",
            Operation::RestoreFromBackup => "restore_from_backup",
            Operation::EndorseChef => "endorse_chef",
        }
    }
}

/// Success value of every mutating operation.
///
/// `owner` is the identity whose record the operation addressed; for
/// [`Operation::EndorseChef`] that is the endorsed chef.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    /// The acknowledged operation
    pub operation: Operation,
    /// Addressed identity
    pub owner: Identity,
}

impl Confirmation {
    fn new(operation: Operation, owner: Identity) -> Self {
        Self { operation, owner }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = &self.owner;
        match self.operation {
            Operation::Create => write!(f, "Profile created for {owner}"),
            Operation::Modify => write!(f, "Profile updated for {owner}"),
            Operation::Delete => write!(f, "Profile deleted for {owner}"),
            Operation::UpdateName => write!(f, "Chef name updated for {owner}"),
            Operation::UpgradeRecipeCollection => {
                write!(f, "Recipe collection upgraded for {owner}")
            }
            Operation::RestoreFromBackup => write!(f, "Profile restored for {owner}"),
            Operation::EndorseChef => write!(f, "Endorsement of {owner} accepted"),
        }
    }
}

/// Identity-keyed store of validated chef profiles.
///
/// Every mutating call takes the caller identity explicitly; the store never
/// looks up an ambient "current caller". A record is only ever committed
/// after it passed validation, and a failed call leaves the table unchanged.
///
/// Cloning a store is cheap and yields a handle onto the same table.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    table: Arc<ProfileTable>,
}

impl ProfileStore {
    /// Create a store over an existing table
    pub fn new(table: Arc<ProfileTable>) -> Self {
        Self { table }
    }

    /// Create a store over a fresh, empty table
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, re-validating every record
    pub fn from_snapshot(snapshot: ProfileSnapshot) -> std::result::Result<Self, SnapshotError> {
        let table = ProfileTable::from_profiles(snapshot.profiles)?;
        info!(profiles = table.len(), "Profile store restored from snapshot");
        Ok(Self::new(Arc::new(table)))
    }

    /// Capture a consistent copy of the whole table
    pub fn export_snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot::new(self.table.profiles())
    }

    /// The underlying table
    pub fn table(&self) -> &Arc<ProfileTable> {
        &self.table
    }

    /// Create the caller's profile.
    ///
    /// Fails with `AlreadyExists` if the caller already owns one, or
    /// `InvalidInput` if any field breaks its constraint.
    pub fn create(&self, caller: &Identity, fields: ProfileFields) -> Result<Confirmation> {
        let mut rows = self.table.write();

        if rows.contains_key(caller) {
            warn!(owner = %caller, "Create rejected: profile already exists");
            return Err(StoreError::already_exists(caller.as_str()));
        }
        check(Operation::Create, caller, validate_fields(&fields))?;

        rows.insert(caller.clone(), ChefProfile::new(caller.clone(), fields));

        info!(owner = %caller, "Profile created");
        Ok(Confirmation::new(Operation::Create, caller.clone()))
    }

    /// Replace every field of the caller's profile. The owner never changes.
    pub fn modify(&self, caller: &Identity, fields: ProfileFields) -> Result<Confirmation> {
        let mut rows = self.table.write();

        let profile = rows
            .get_mut(caller)
            .ok_or_else(|| missing(Operation::Modify, caller))?;
        check(Operation::Modify, caller, validate_fields(&fields))?;

        profile.replace_fields(fields);

        info!(owner = %caller, "Profile modified");
        Ok(Confirmation::new(Operation::Modify, caller.clone()))
    }

    /// Remove the caller's profile entirely
    pub fn delete(&self, caller: &Identity) -> Result<Confirmation> {
        let mut rows = self.table.write();

        rows.remove(caller).ok_or_else(|| missing(Operation::Delete, caller))?;

        info!(owner = %caller, "Profile deleted");
        Ok(Confirmation::new(Operation::Delete, caller.clone()))
    }

    /// Replace only the chef name.
    ///
    /// A rename must be at least three characters long, which is stricter
    /// than what `create` accepts.
    pub fn update_name(
        &self,
        caller: &Identity,
        new_name: impl Into<String>,
    ) -> Result<Confirmation> {
        let new_name = new_name.into();
        let mut rows = self.table.write();

        let profile = rows
            .get_mut(caller)
            .ok_or_else(|| missing(Operation::UpdateName, caller))?;
        check(Operation::UpdateName, caller, validate_new_name(&new_name))?;

        profile.set_chef_name(new_name);

        info!(owner = %caller, "Chef name updated");
        Ok(Confirmation::new(Operation::UpdateName, caller.clone()))
    }

    /// Replace only the recipe collection
    pub fn upgrade_recipe_collection(
        &self,
        caller: &Identity,
        new_recipes: Vec<String>,
    ) -> Result<Confirmation> {
        let mut rows = self.table.write();

        let profile = rows
            .get_mut(caller)
            .ok_or_else(|| missing(Operation::UpgradeRecipeCollection, caller))?;
        check(
            Operation::UpgradeRecipeCollection,
            caller,
            validate_list(ListField::RecipeCollection, &new_recipes),
        )?;

        let count = new_recipes.len();
        profile.set_recipe_collection(new_recipes);

        info!(owner = %caller, recipes = count, "Recipe collection upgraded");
        Ok(Confirmation::new(
            Operation::UpgradeRecipeCollection,
            caller.clone(),
        ))
    }

    /// Insert or overwrite the caller's profile after full validation
    pub fn restore_from_backup(
        &self,
        caller: &Identity,
        fields: ProfileFields,
    ) -> Result<Confirmation> {
        let mut rows = self.table.write();

        check(Operation::RestoreFromBackup, caller, validate_fields(&fields))?;

        let previous = rows.insert(caller.clone(), ChefProfile::new(caller.clone(), fields));

        info!(
            owner = %caller,
            replaced = previous.is_some(),
            "Profile restored from backup"
        );
        Ok(Confirmation::new(
            Operation::RestoreFromBackup,
            caller.clone(),
        ))
    }

    /// Full record of any identity
    pub fn retrieve_full(&self, target: &Identity) -> Result<ChefProfile> {
        self.read_record(target, Clone::clone)
    }

    /// Cuisine specialties of any identity
    pub fn retrieve_cuisine_specialties(&self, target: &Identity) -> Result<Vec<String>> {
        self.read_record(target, |p| p.cuisine_specialties().to_vec())
    }

    /// Signature dishes of any identity
    pub fn retrieve_signature_dishes(&self, target: &Identity) -> Result<Vec<String>> {
        self.read_record(target, |p| p.signature_dishes().to_vec())
    }

    /// Recipe collection of any identity
    pub fn retrieve_recipe_collection(&self, target: &Identity) -> Result<Vec<String>> {
        self.read_record(target, |p| p.recipe_collection().to_vec())
    }

    /// Check that `caller` may endorse `target`.
    ///
    /// Both chefs must have a profile, they must differ, and the note must
    /// not be empty. Nothing is recorded: a successful call only confirms
    /// the preconditions held.
    pub fn endorse_chef(
        &self,
        caller: &Identity,
        target: &Identity,
        note: &str,
    ) -> Result<Confirmation> {
        let rows = self.table.read();

        if !rows.contains_key(caller) {
            return Err(missing(Operation::EndorseChef, caller));
        }
        if !rows.contains_key(target) {
            return Err(missing(Operation::EndorseChef, target));
        }
        if caller == target {
            return Err(rejected(
                Operation::EndorseChef,
                caller,
                FieldViolation::SelfEndorsement,
            ));
        }
        if note.is_empty() {
            return Err(rejected(
                Operation::EndorseChef,
                caller,
                FieldViolation::EmptyNote,
            ));
        }

        info!(owner = %caller, target = %target, "Endorsement accepted (not persisted)");
        Ok(Confirmation::new(Operation::EndorseChef, target.clone()))
    }

    /// Every stored profile, ordered by owner
    pub fn list_profiles(&self) -> Vec<ChefProfile> {
        self.table.profiles()
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no profile is stored
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether `owner` has a profile
    pub fn contains(&self, owner: &Identity) -> bool {
        self.table.contains(owner)
    }

    fn read_record<T>(
        &self,
        target: &Identity,
        select: impl FnOnce(&ChefProfile) -> T,
    ) -> Result<T> {
        debug!(owner = %target, "Reading profile");

        let rows = self.table.read();
        match rows.get(target) {
            Some(profile) => Ok(select(profile)),
            None => {
                debug!(owner = %target, "Profile not found");
                Err(StoreError::not_found(target.as_str()))
            }
        }
    }
}

fn check(
    operation: Operation,
    caller: &Identity,
    outcome: std::result::Result<(), FieldViolation>,
) -> Result<()> {
    outcome.map_err(|violation| rejected(operation, caller, violation))
}

fn rejected(operation: Operation, caller: &Identity, violation: FieldViolation) -> StoreError {
    warn!(
        owner = %caller,
        operation = operation.as_str(),
        field = violation.field(),
        reason = %violation,
        "Validation failed"
    );
    StoreError::InvalidInput(violation)
}

fn missing(operation: Operation, owner: &Identity) -> StoreError {
    warn!(owner = %owner, operation = operation.as_str(), "Profile not found");
    StoreError::not_found(owner.as_str())
}
