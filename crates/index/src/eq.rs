//! Equality index: value -> set of entity ids.

use crate::IdSet;
use facet_core::{EntityId, Record, Value};
use im::HashMap;

/// An equality index over one attribute key.
///
/// `id ∈ ids(v)` exactly when the entity's record holds the indexed key
/// with value `v`. Entities lacking the key are simply absent; there is
/// no missing-value bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EqIndex {
    buckets: HashMap<Value, IdSet>,
}

impl EqIndex {
    /// Creates an empty equality index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index for `key` by scanning every entity once.
    pub fn build<'a>(
        entries: impl Iterator<Item = (&'a EntityId, &'a Record)>,
        key: &str,
    ) -> Self {
        let mut index = Self::new();
        for (id, record) in entries {
            if let Some(value) = record.get(key) {
                index.insert(value, id);
            }
        }
        index
    }

    /// Returns the id set for `value`, empty if no entity holds it.
    pub fn ids(&self, value: &Value) -> IdSet {
        self.buckets.get(value).cloned().unwrap_or_default()
    }

    /// Returns true if any entity holds `value` under the indexed key.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.buckets.contains_key(value)
    }

    /// Adds `id` to the bucket for `value`.
    pub fn insert(&mut self, value: &Value, id: &EntityId) {
        match self.buckets.get_mut(value) {
            Some(bucket) => {
                bucket.insert(id.clone());
            }
            None => {
                self.buckets
                    .insert(value.clone(), IdSet::unit(id.clone()));
            }
        }
    }

    /// Removes `id` from the bucket for `value`, pruning the bucket when
    /// it empties. Readers treat an absent bucket and an empty bucket
    /// identically.
    pub fn remove(&mut self, value: &Value, id: &EntityId) {
        let emptied = match self.buckets.get_mut(value) {
            Some(bucket) => {
                bucket.remove(id);
                bucket.is_empty()
            }
            None => false,
        };
        if emptied {
            self.buckets.remove(value);
        }
    }

    /// Returns the number of distinct indexed values.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
