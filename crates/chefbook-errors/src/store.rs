//! The error returned by every profile store operation.

use crate::common::{ErrorKind, ErrorSeverity};
use crate::validation::FieldViolation;

/// Profile store errors.
///
/// Owners are carried as their textual form so this crate does not depend on
/// the data model.
///
/// # Examples
///
/// ```
/// use chefbook_errors::{ErrorKind, ErrorSeverity, StoreError};
///
/// let err = StoreError::not_found("chef-ana");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// assert!(err.to_string().contains("chef-ana"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record for the queried or target identity
    #[error("No profile found for {owner}")]
    NotFound {
        /// Identity that has no record
        owner: String,
    },

    /// The caller already owns a record
    #[error("A profile already exists for {owner}")]
    AlreadyExists {
        /// Identity that already has a record
        owner: String,
    },

    /// A field failed its constraint
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FieldViolation),
}

impl StoreError {
    /// Coarse, externally reported kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            StoreError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Numeric code of [`Self::kind`].
    pub fn code(&self) -> u8 {
        self.kind().code()
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::NotFound { .. } | StoreError::AlreadyExists { .. } => {
                ErrorSeverity::Warning
            }
            StoreError::InvalidInput(v) => v.severity(),
        }
    }

    /// The granular field violation behind an `InvalidInput` error.
    pub fn violation(&self) -> Option<&FieldViolation> {
        match self {
            StoreError::InvalidInput(v) => Some(v),
            _ => None,
        }
    }

    /// Create a not found error.
    pub fn not_found(owner: impl Into<String>) -> Self {
        StoreError::NotFound {
            owner: owner.into(),
        }
    }

    /// Create an already exists error.
    pub fn already_exists(owner: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            owner: owner.into(),
        }
    }
}
