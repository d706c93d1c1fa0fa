//! Facet Index - Secondary index implementations for the facet record store.
//!
//! This crate provides the three per-attribute index kinds:
//!
//! - `EqIndex`: value -> id-set lookup for exact-match queries
//! - `UniqIndex`: value -> single-id lookup, caller guarantees one-to-one
//! - `SortedIndex`: ordered value -> id-set structure for bounded scans
//!
//! Every index is a persistent structure: incremental patch methods take
//! `&mut self` but only touch the affected buckets, so a cloned index
//! shares everything else with its ancestor.
//!
//! # Example
//!
//! ```rust
//! use facet_index::{EqIndex, SortedIndex, KeyRange};
//! use facet_core::Value;
//!
//! let mut eq = EqIndex::new();
//! eq.insert(&Value::from(10), &Value::from("a"));
//! eq.insert(&Value::from(10), &Value::from("b"));
//! assert_eq!(eq.ids(&Value::from(10)).len(), 2);
//!
//! let mut sorted = SortedIndex::new();
//! sorted.insert(&Value::from(5), &Value::from("a"));
//! sorted.insert(&Value::from(9), &Value::from("b"));
//! let range = KeyRange::lower_bound(Value::from(6), false);
//! assert_eq!(sorted.scan(&range, false), vec![Value::from("b")]);
//! ```

mod eq;
mod kind;
mod range;
mod sorted;
mod uniq;

pub use eq::EqIndex;
pub use kind::IndexKind;
pub use range::KeyRange;
pub use sorted::SortedIndex;
pub use uniq::UniqIndex;

use facet_core::EntityId;

/// The set of entity ids occupying one index bucket.
pub type IdSet = im::OrdSet<EntityId>;
