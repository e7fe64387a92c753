//! Error taxonomy for the Chefbook profile store
//!
//! Every store operation either commits a valid new state or reports one of
//! the errors defined here and leaves the table untouched.
//!
//! # Architecture
//!
//! - [`common`]: externally reported [`ErrorKind`] with stable numeric codes,
//!   plus [`ErrorSeverity`]
//! - [`validation`]: granular [`FieldViolation`] describing which field failed
//! - [`store`]: [`StoreError`], the error returned by every store operation
//!
//! Validation failures are reported with the coarse [`ErrorKind::InvalidInput`]
//! kind while the underlying [`FieldViolation`] stays available for callers
//! that want to tell the user which field was rejected.
//!
//! # Example
//!
//! ```
//! use chefbook_errors::prelude::*;
//!
//! let err = StoreError::from(FieldViolation::experience_out_of_range(1, 2, 75));
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! assert_eq!(err.code(), 3);
//! assert!(matches!(err.violation(), Some(FieldViolation::ExperienceOutOfRange { .. })));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod prelude;
pub mod store;
pub mod validation;

pub use common::{ErrorKind, ErrorSeverity};
pub use store::StoreError;
pub use validation::{FieldViolation, ListField};

/// A specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
