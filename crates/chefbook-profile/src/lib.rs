//! Chef profile data model and validation
//!
//! This crate defines the record kept for every identity in the Chefbook
//! store and the field constraints every committed record satisfies.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod identity;
pub mod types;
pub mod validation;

pub use identity::{Identity, IdentityError};
pub use types::*;
pub use validation::*;

/// Current record schema version.
/// Increment this when the `ChefProfile` structure changes incompatibly.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;
