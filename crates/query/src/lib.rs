//! Facet Query - query term grammar and evaluator.
//!
//! A query is a small tree of `Term`s; every term evaluates to a set of
//! entity ids against a `Store`, delegating to the store's lazily built
//! indexes. `query` runs an implicit conjunction over its top-level
//! terms and stops evaluating (and therefore stops building indexes) the
//! moment an intermediate intersection is empty.
//!
//! # Example
//!
//! ```rust
//! use facet_core::{Record, Value};
//! use facet_index::KeyRange;
//! use facet_query::{query, Term};
//! use facet_store::Store;
//!
//! let store = Store::from_iter([
//!     (Value::from(1), Record::from_pairs([("age", 10), ("score", 7)])),
//!     (Value::from(2), Record::from_pairs([("age", 42), ("score", 7)])),
//! ]);
//!
//! let ids = query(
//!     &store,
//!     &[
//!         Term::eq("score", Value::from(7)),
//!         Term::range("age", KeyRange::upper_bound(Value::from(20), false)),
//!     ],
//! );
//! assert!(ids.contains(&Value::from(1)));
//! assert_eq!(ids.len(), 1);
//! ```

mod eval;
mod term;

pub use eval::{eval, query, query_records};
pub use term::Term;
