//! Convenience re-exports for error handling.
//!
//! ```
//! use chefbook_errors::prelude::*;
//!
//! fn check_note(note: &str) -> Result<()> {
//!     if note.trim().is_empty() {
//!         return Err(FieldViolation::EmptyNote.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_note("great pasta").is_ok());
//! assert_eq!(check_note(" ").map_err(|e| e.kind()), Err(ErrorKind::InvalidInput));
//! ```

pub use crate::{
    Result,
    common::{ErrorKind, ErrorSeverity},
    store::StoreError,
    validation::{FieldViolation, ListField},
};
