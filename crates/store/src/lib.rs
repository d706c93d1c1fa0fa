//! Facet Store - the immutable, auto-indexing store facade.
//!
//! A `Store` behaves like a plain mapping from entity id to `Record`, but
//! transparently builds and maintains secondary indexes: an equality
//! index, a unique index, and a sorted index, each per attribute key,
//! each created lazily on first query and patched incrementally across
//! mutations from then on.
//!
//! Every mutation returns a new `Store`; the input store is never
//! altered and stays valid for any other holder.
//!
//! # Example
//!
//! ```rust
//! use facet_core::{Record, Value};
//! use facet_store::Store;
//!
//! let store = Store::keyed_by(
//!     |rec| rec.get("id").cloned().unwrap_or(Value::Null),
//!     [
//!         Record::from_pairs([("id", Value::from(1)), ("age", Value::from(10))]),
//!         Record::from_pairs([("id", Value::from(2)), ("age", Value::from(42))]),
//!     ],
//! );
//!
//! // First call builds the equality index for "age"; later calls reuse it.
//! let ids = store.eq("age", &Value::from(10));
//! assert!(ids.contains(&Value::from(1)));
//! ```

mod mutate;
mod store;

pub use mutate::EditOp;
pub use store::{PrimaryStore, Store};
