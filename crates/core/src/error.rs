//! Error types for the facet record store.

use crate::value::Value;
use core::fmt;

/// Result type alias for facet operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for store operations.
///
/// Every error is synchronous and local: a failing operation leaves the
/// store value it was called on fully intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A value supplied where a record was required is not a record.
    NotARecord {
        got: &'static str,
    },
    /// An index kind tag was not recognized.
    UnknownIndexKind {
        kind: String,
    },
    /// An insert-only operation found the id already occupied.
    KeyAlreadyPresent {
        id: Value,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotARecord { got } => {
                write!(f, "Expected a record, got {}", got)
            }
            Error::UnknownIndexKind { kind } => {
                write!(f, "Unknown index kind: {}", kind)
            }
            Error::KeyAlreadyPresent { id } => {
                write!(f, "Key already present: {:?}", id)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates a not-a-record error from the offending value's kind name.
    pub fn not_a_record(got: &'static str) -> Self {
        Error::NotARecord { got }
    }

    /// Creates an unknown index kind error.
    pub fn unknown_index_kind(kind: impl Into<String>) -> Self {
        Error::UnknownIndexKind { kind: kind.into() }
    }

    /// Creates a key-already-present error.
    pub fn key_already_present(id: Value) -> Self {
        Error::KeyAlreadyPresent { id }
    }
}
