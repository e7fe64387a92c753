//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use chefbook_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some, must_with};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{chef_ana, identity, items, valid_fields};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
