//! Index kind tags.

use core::fmt;
use core::str::FromStr;
use facet_core::Error;

/// The three secondary index kinds. A key may have any subset of the
/// three built independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Exact-match lookup, value -> set of ids.
    Equality,
    /// Value -> single id; the caller guarantees one-to-one.
    Unique,
    /// Ordered structure supporting bounded ascending/descending scans.
    Sorted,
}

impl IndexKind {
    /// All kinds, in a fixed order.
    pub const ALL: [IndexKind; 3] = [IndexKind::Equality, IndexKind::Unique, IndexKind::Sorted];

    /// Returns the canonical tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Equality => "eq",
            IndexKind::Unique => "uniq",
            IndexKind::Sorted => "sorted",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(IndexKind::Equality),
            "uniq" => Ok(IndexKind::Unique),
            "sorted" => Ok(IndexKind::Sorted),
            other => Err(Error::unknown_index_kind(other)),
        }
    }
}
