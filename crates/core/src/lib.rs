//! Facet Core - Core types for the facet record store.
//!
//! This crate provides the foundational types shared by the rest of the
//! workspace:
//!
//! - `Value`: dynamic attribute values (Boolean, Int64, Float64, String, Bytes, Record)
//! - `Record`: an immutable flat mapping from attribute key to `Value`
//! - `EntityId`: the opaque key under which a record is stored
//! - `Error`: error types for store operations
//!
//! # Example
//!
//! ```rust
//! use facet_core::{Record, Value};
//!
//! let rec = Record::from_pairs([("name", "Alice"), ("city", "Oslo")]);
//! assert_eq!(rec.get("name"), Some(&Value::String("Alice".into())));
//!
//! // Records are persistent: `set` returns a new record, the old one
//! // is untouched.
//! let rec2 = rec.set("city", Value::from("Bergen"));
//! assert_eq!(rec.get("city"), Some(&Value::String("Oslo".into())));
//! assert_eq!(rec2.get("city"), Some(&Value::String("Bergen".into())));
//! ```

mod error;
mod record;
mod value;

pub use error::{Error, Result};
pub use record::Record;
pub use value::Value;

/// The key under which a record is stored. Ids are opaque to the store:
/// any orderable, hashable value works, including values extracted from
/// the records themselves.
pub type EntityId = Value;
