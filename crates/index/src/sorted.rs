//! Sorted index: order-preserving value -> id-set structure.

use crate::range::KeyRange;
use crate::IdSet;
use facet_core::{EntityId, Record, Value};
use im::OrdMap;

/// A sorted index over one attribute key, supporting bounded and
/// unbounded scans in both directions.
///
/// Membership law is the same as the equality kind's; only the bucket
/// ordering differs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedIndex {
    buckets: OrdMap<Value, IdSet>,
}

impl SortedIndex {
    /// Creates an empty sorted index.
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

    /// Removes `id` from the bucket for `value`, pruning empty buckets.
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

    /// Returns ids whose indexed value falls within `range`, ordered by
    /// value ascending. With `reverse`, both the bucket order and the id
    /// order inside each bucket are reversed, so a reversed ascending
    /// scan equals the descending scan of the same range.
    pub fn scan(&self, range: &KeyRange<Value>, reverse: bool) -> Vec<EntityId> {
        let mut out = Vec::new();
        if reverse {
            for (_, bucket) in self.buckets.range(range.bounds()).rev() {
                out.extend(bucket.iter().rev().cloned());
            }
        } else {
            for (_, bucket) in self.buckets.range(range.bounds()) {
                out.extend(bucket.iter().cloned());
            }
        }
        out
    }

    /// Returns the smallest indexed value and its ids.
    pub fn min(&self) -> Option<(&Value, &IdSet)> {
        self.buckets.get_min().map(|(k, v)| (k, v))
    }

    /// Returns the largest indexed value and its ids.
    pub fn max(&self) -> Option<(&Value, &IdSet)> {
        self.buckets.get_max().map(|(k, v)| (k, v))
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
