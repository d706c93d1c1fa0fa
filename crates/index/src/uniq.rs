//! Unique index: value -> single entity id.

use facet_core::{EntityId, Record, Value};
use im::HashMap;

/// A unique index over one attribute key.
///
/// The caller guarantees at most one entity per value. If that contract
/// is broken, the most recently written id occupies the slot and earlier
/// occupants are silently evicted; this is a documented precondition
/// violation, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UniqIndex {
    slots: HashMap<Value, EntityId>,
}

impl UniqIndex {
    /// Creates an empty unique index.
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

    /// Returns the id registered for `value`, if any.
    pub fn id_for(&self, value: &Value) -> Option<&EntityId> {
        self.slots.get(value)
    }

    /// Registers `id` under `value`, overwriting any current occupant.
    pub fn insert(&mut self, value: &Value, id: &EntityId) {
        self.slots.insert(value.clone(), id.clone());
    }

    /// Clears the slot for `value`, but only if it still maps to `id`.
    /// A slot stolen by a later writer stays put when the evicted entity
    /// is deleted.
    pub fn remove_if(&mut self, value: &Value, id: &EntityId) {
        if self.slots.get(value) == Some(id) {
            self.slots.remove(value);
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> EntityId {
        Value::from(n)
    }

    #[test]
    fn test_uniq_index_insert_and_lookup() {
        let mut index = UniqIndex::new();
        index.insert(&Value::from("foo"), &id(1));

        assert_eq!(index.id_for(&Value::from("foo")), Some(&id(1)));
        assert_eq!(index.id_for(&Value::from("bar")), None);
    }

    #[test]
    fn test_uniq_index_last_writer_wins() {
        let mut index = UniqIndex::new();
        index.insert(&Value::from("dup"), &id(1));
        index.insert(&Value::from("dup"), &id(2));

        assert_eq!(index.id_for(&Value::from("dup")), Some(&id(2)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_uniq_index_guarded_removal() {
        let mut index = UniqIndex::new();
        index.insert(&Value::from("dup"), &id(1));
        index.insert(&Value::from("dup"), &id(2));

        // Entity 1 was evicted; deleting it must not clear entity 2's slot
        index.remove_if(&Value::from("dup"), &id(1));
        assert_eq!(index.id_for(&Value::from("dup")), Some(&id(2)));

        index.remove_if(&Value::from("dup"), &id(2));
        assert_eq!(index.id_for(&Value::from("dup")), None);
    }

    #[test]
    fn test_uniq_index_build() {
        let entries = vec![
            (id(1), Record::from_pairs([("name", "foo")])),
            (id(2), Record::from_pairs([("name", "bar")])),
            (id(3), Record::from_pairs([("age", 10)])),
        ];
        let index = UniqIndex::build(entries.iter().map(|(i, r)| (i, r)), "name");

        assert_eq!(index.id_for(&Value::from("foo")), Some(&id(1)));
        assert_eq!(index.id_for(&Value::from("bar")), Some(&id(2)));
        assert_eq!(index.len(), 2);
    }
}
