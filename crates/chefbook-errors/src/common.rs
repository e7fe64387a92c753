//! Error kinds and severity shared by every Chefbook crate.

use core::fmt;

/// Externally reported error kind.
///
/// Each kind carries a distinct numeric code. A missing profile and an
/// invalid recipe collection are different kinds and never share a code.
///
/// # Examples
///
/// ```
/// use chefbook_errors::ErrorKind;
///
/// assert_eq!(ErrorKind::NotFound.code(), 1);
/// assert_eq!(ErrorKind::from_code(3), Some(ErrorKind::InvalidInput));
/// assert_eq!(ErrorKind::from_code(0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// No record exists for the queried identity
    NotFound = 1,
    /// `create` was invoked while the caller already owns a record
    AlreadyExists = 2,
    /// A field failed its constraint
    InvalidInput = 3,
}

impl ErrorKind {
    /// All kinds, in code order.
    pub const ALL: [ErrorKind; 3] = [
        ErrorKind::NotFound,
        ErrorKind::AlreadyExists,
        ErrorKind::InvalidInput,
    ];

    /// Get the numeric error code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Create a kind from its numeric code.
    ///
    /// Returns `None` if the code does not correspond to a known kind.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ErrorKind::NotFound),
            2 => Some(ErrorKind::AlreadyExists),
            3 => Some(ErrorKind::InvalidInput),
            _ => None,
        }
    }

    /// Stable machine-readable name, used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "NotFound"),
            ErrorKind::AlreadyExists => write!(f, "AlreadyExists"),
            ErrorKind::InvalidInput => write!(f, "InvalidInput"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// The request referred to state that is not there; nothing is broken
    Warning = 1,
    /// The request itself was malformed
    Error = 2,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}
