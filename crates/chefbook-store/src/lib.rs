//! Identity-keyed chef profile store
//!
//! Each caller identity owns at most one chef profile. This crate provides:
//! - [`ProfileStore`]: create, modify, delete, partial updates, upsert
//!   restore and per-field reads, all gated by field validation
//! - [`ProfileTable`]: the identity → profile mapping, injected into the store
//! - [`ProfileSnapshot`]: a serializable copy of the whole table
//! - [`FileStorage`]: JSON snapshot files with atomic writes and backups
//!
//! # Atomicity
//!
//! Every mutating operation runs its read-validate-commit step under one
//! write lock. A failed operation returns an error and leaves the table
//! exactly as it was.
//!
//! # Example
//!
//! ```
//! use chefbook_store::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ProfileStore::in_memory();
//! let ana = Identity::parse("chef-ana")?;
//!
//! let fields = ProfileFields::new("Chef Ana", 5)
//!     .with_specialties(["Italian"])
//!     .with_dishes(["Lasagna"])
//!     .with_recipes(["Carbonara"]);
//! store.create(&ana, fields)?;
//!
//! assert_eq!(store.retrieve_signature_dishes(&ana)?, vec!["Lasagna"]);
//!
//! let err = store.update_name(&ana, "Al").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod prelude;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod table;

pub use error::SnapshotError;
pub use snapshot::{ProfileSnapshot, migrate_snapshot};
pub use storage::{FileStorage, SnapshotConfig};
pub use store::{Confirmation, Operation, ProfileStore};
pub use table::ProfileTable;

pub use chefbook_errors::{ErrorKind, Result, StoreError};
