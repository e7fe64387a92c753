//! Convenience re-exports for common types

pub use crate::error::SnapshotError;
pub use crate::snapshot::ProfileSnapshot;
pub use crate::storage::{FileStorage, SnapshotConfig};
pub use crate::store::{Confirmation, Operation, ProfileStore};
pub use crate::table::ProfileTable;

pub use chefbook_errors::{ErrorKind, FieldViolation, ListField, StoreError};
pub use chefbook_profile::{ChefProfile, Identity, IdentityError, ProfileFields};
