//! Facet - an immutable, auto-indexing key-to-record store.
//!
//! A `Store` maps entity ids to flat attribute records and behaves like
//! a plain persistent mapping, but transparently accelerates repeated
//! equality, uniqueness, and range queries: a secondary index is built
//! lazily the first time a key is queried and maintained incrementally
//! across mutations from then on. Every mutation returns a new store
//! value; the input is never altered.
//!
//! # Example
//!
//! ```rust
//! use facet_db::{query, IndexKind, KeyRange, Record, Store, Term, Value};
//!
//! let store = Store::keyed_by(
//!     |rec| rec.get("id").cloned().unwrap_or(Value::Null),
//!     [
//!         Record::from_pairs([("id", Value::from(1)), ("name", Value::from("foo")), ("age", Value::from(10))]),
//!         Record::from_pairs([("id", Value::from(2)), ("name", Value::from("bar")), ("age", Value::from(42))]),
//!         Record::from_pairs([("id", Value::from(3)), ("name", Value::from("baz")), ("age", Value::from(10))]),
//!     ],
//! );
//!
//! // Equality lookup builds the "age" index on first use.
//! let tens = store.eq("age", &Value::from(10));
//! assert_eq!(tens.len(), 2);
//!
//! // Mutations produce a new store; the old one is untouched.
//! let store2 = store.add(Value::from(4), Record::from_pairs([("age", 10)]));
//! assert_eq!(store2.eq("age", &Value::from(10)).len(), 3);
//! assert_eq!(store.eq("age", &Value::from(10)).len(), 2);
//!
//! // Composable queries over the same indexes.
//! let ids = query(
//!     &store2,
//!     &[Term::range("age", KeyRange::upper_bound(Value::from(20), false))],
//! );
//! assert_eq!(ids.len(), 3);
//!
//! // Pay index construction eagerly when preferred.
//! store2.force("name", IndexKind::Unique);
//! assert_eq!(store2.uniq("name", &Value::from("bar")), Some(Value::from(2)));
//! ```

pub use facet_core::{EntityId, Error, Record, Result, Value};
pub use facet_index::{EqIndex, IdSet, IndexKind, KeyRange, SortedIndex, UniqIndex};
pub use facet_query::{eval, query, query_records, Term};
pub use facet_store::{EditOp, PrimaryStore, Store};
