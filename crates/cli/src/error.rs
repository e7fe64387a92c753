//! Error types for chefctl

use chefbook_store::prelude::{ErrorKind, IdentityError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No caller identity given: pass --caller or set CHEFCTL_CALLER")]
    MissingCaller,

    #[error("Invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Store failures map their kind onto a fixed code; identity problems
    /// count as invalid input.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Store(e) => match e.kind() {
                ErrorKind::NotFound => 2,
                ErrorKind::AlreadyExists => 3,
                ErrorKind::InvalidInput => 4,
            },
            CliError::MissingCaller | CliError::InvalidIdentity(_) => 4,
        }
    }

    /// Stable error type name used in JSON output
    pub fn type_name(&self) -> &'static str {
        match self {
            CliError::Store(e) => e.kind().as_str(),
            CliError::MissingCaller => "missing_caller",
            CliError::InvalidIdentity(_) => "invalid_identity",
        }
    }
}
