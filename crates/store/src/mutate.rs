//! Mutation operations: add, delete, replace, edit.
//!
//! Every operation here returns a new `Store` built from the old one's
//! primary store plus a patched snapshot of its index tables. Per-key
//! indexes untouched by a mutation are shared structurally between the
//! old and new store.

use facet_core::{EntityId, Error, Record, Result, Value};
use hashbrown::HashSet;

use crate::store::{IndexTables, Store};

/// A canonical record transformation for `Store::edit`.
///
/// Each variant has a direct incremental fast path: it routes only the
/// attributes it names through the single-key update procedure instead
/// of diffing whole records. Arbitrary transformations go through
/// `Store::edit_with`.
#[derive(Clone, Debug)]
pub enum EditOp {
    /// Set each named attribute to the given value.
    Set(Vec<(String, Value)>),
    /// Remove each named attribute.
    Remove(Vec<String>),
    /// Merge a partial record in; its values win on conflict.
    MergeIn(Record),
    /// Merge a partial record in; existing values win on conflict.
    Union(Record),
}

/// Routes one (id, key) value change through every index currently built
/// for `key`. `old == None` is an insertion; otherwise an update.
fn apply_key_set(
    tables: &mut IndexTables,
    id: &EntityId,
    key: &str,
    old: Option<&Value>,
    new: &Value,
) {
    if old == Some(new) {
        return;
    }
    if let Some(old) = old {
        apply_key_delete(tables, id, key, old);
    }
    if let Some(ix) = tables.eq.get_mut(key) {
        ix.insert(new, id);
    }
    if let Some(ix) = tables.uniq.get_mut(key) {
        ix.insert(new, id);
    }
    if let Some(ix) = tables.sorted.get_mut(key) {
        ix.insert(new, id);
    }
}

/// Removes one (id, key) occupancy from every index currently built for
/// `key`. The unique slot is cleared only while it still maps to `id`.
fn apply_key_delete(tables: &mut IndexTables, id: &EntityId, key: &str, old: &Value) {
    if let Some(ix) = tables.eq.get_mut(key) {
        ix.remove(old, id);
    }
    if let Some(ix) = tables.uniq.get_mut(key) {
        ix.remove_if(old, id);
    }
    if let Some(ix) = tables.sorted.get_mut(key) {
        ix.remove(old, id);
    }
}

impl Store {
    fn snapshot_tables(&self) -> IndexTables {
        self.indexes.read().clone()
    }

    /// Merges `partial`'s attributes into the entity under `id`,
    /// creating the entity if absent. `partial`'s values win on
    /// conflict. Merging an empty partial into an existing entity is a
    /// no-op; into an absent one it creates an empty record.
    pub fn add(&self, id: impl Into<EntityId>, partial: Record) -> Store {
        let id = id.into();
        let current = self.entities.get(&id);
        let merged = match current {
            Some(cur) => cur.merged(&partial),
            None => partial.clone(),
        };

        let tables = self.snapshot_tables();
        if tables.is_empty() {
            // Fast path: nothing built yet, no per-key bookkeeping.
            return Store::from_parts(self.entities.update(id, merged), tables);
        }

        let mut tables = tables;
        for (key, value) in partial.iter() {
            apply_key_set(
                &mut tables,
                &id,
                key,
                current.and_then(|r| r.get(key)),
                value,
            );
        }
        Store::from_parts(self.entities.update(id, merged), tables)
    }

    /// Insert-only variant of `add`: fails if `id` is already occupied.
    pub fn insert_new(&self, id: impl Into<EntityId>, record: Record) -> Result<Store> {
        let id = id.into();
        if self.entities.contains_key(&id) {
            return Err(Error::key_already_present(id));
        }
        Ok(self.add(id, record))
    }

    /// Removes the entity under `id`, dropping it from every index
    /// bucket it occupied. Deleting an absent id returns a store equal
    /// to the input.
    pub fn delete(&self, id: impl Into<EntityId>) -> Store {
        let id = id.into();
        let Some(record) = self.entities.get(&id) else {
            return self.clone();
        };
        let mut tables = self.snapshot_tables();
        for (key, value) in record.iter() {
            apply_key_delete(&mut tables, &id, key, value);
        }
        Store::from_parts(self.entities.without(&id), tables)
    }

    /// Wholesale overwrite of the entity under `id`. Fails with
    /// `NotARecord` unless `value` is a record.
    pub fn replace(&self, id: impl Into<EntityId>, value: Value) -> Result<Store> {
        match value {
            Value::Record(rec) => Ok(self.replace_record(id, rec)),
            other => Err(Error::not_a_record(other.kind_name())),
        }
    }

    /// Wholesale overwrite with a known record. If `record` is the same
    /// instance as the current one (pointer identity) this is a no-op;
    /// otherwise only the keys whose values actually differ are routed
    /// through the index patch procedures.
    pub fn replace_record(&self, id: impl Into<EntityId>, record: Record) -> Store {
        let id = id.into();
        let current = self.entities.get(&id);
        if let Some(cur) = current {
            if cur.ptr_eq(&record) {
                return self.clone();
            }
        }

        let tables = self.snapshot_tables();
        if tables.is_empty() {
            return Store::from_parts(self.entities.update(id, record), tables);
        }

        let mut tables = tables;
        Self::apply_record_diff(&mut tables, &id, current, &record);
        Store::from_parts(self.entities.update(id, record), tables)
    }

    /// Applies a canonical transformation to the entity under `id`. An
    /// absent entity is treated as the empty record, so `edit` can
    /// create entities just like `add`.
    pub fn edit(&self, id: impl Into<EntityId>, op: EditOp) -> Result<Store> {
        let id = id.into();
        match op {
            EditOp::Set(pairs) => Ok(self.add(id, Record::from_pairs(pairs))),
            EditOp::MergeIn(partial) => Ok(self.add(id, partial)),
            EditOp::Remove(keys) => {
                let current = self.entities.get(&id).cloned().unwrap_or_default();
                let mut tables = self.snapshot_tables();
                let mut record = current.clone();
                for key in &keys {
                    if let Some(old) = current.get(key) {
                        apply_key_delete(&mut tables, &id, key, old);
                        record = record.without(key);
                    }
                }
                Ok(Store::from_parts(self.entities.update(id, record), tables))
            }
            EditOp::Union(partial) => {
                let current = self.entities.get(&id).cloned().unwrap_or_default();
                let unioned = current.union(&partial);
                let mut tables = self.snapshot_tables();
                for (key, value) in partial.iter() {
                    if !current.contains_key(key) {
                        apply_key_set(&mut tables, &id, key, None, value);
                    }
                }
                Ok(Store::from_parts(self.entities.update(id, unioned), tables))
            }
        }
    }

    /// Applies an arbitrary transformation to the entity under `id`
    /// (`None` when absent). Fails with `NotARecord` unless the
    /// transformation yields a record; otherwise the result replaces the
    /// entity via the keyset-diff procedure.
    pub fn edit_with(
        &self,
        id: impl Into<EntityId>,
        f: impl FnOnce(Option<&Record>) -> Value,
    ) -> Result<Store> {
        let id = id.into();
        let result = f(self.entities.get(&id));
        match result {
            Value::Record(rec) => Ok(self.replace_record(id, rec)),
            other => Err(Error::not_a_record(other.kind_name())),
        }
    }

    /// Map-style insertion: replaces whatever is under `id` with
    /// `record`.
    pub fn insert(&self, id: impl Into<EntityId>, record: Record) -> Store {
        self.replace_record(id, record)
    }

    /// Merges another id -> record mapping in, entry by entry, using the
    /// replace rules.
    pub fn merged(&self, entries: impl IntoIterator<Item = (EntityId, Record)>) -> Store {
        let mut store = self.clone();
        for (id, record) in entries {
            store = store.replace_record(id, record);
        }
        store
    }

    /// Symmetric keyset diff between the current and replacement record:
    /// removed keys are routed through the delete procedure, added or
    /// changed keys through the set procedure, unchanged keys are left
    /// alone (caught by the equality check inside `apply_key_set`).
    fn apply_record_diff(
        tables: &mut IndexTables,
        id: &EntityId,
        current: Option<&Record>,
        replacement: &Record,
    ) {
        let mut keys: HashSet<&String> = replacement.keys().collect();
        if let Some(cur) = current {
            keys.extend(cur.keys());
        }
        for key in keys {
            let old = current.and_then(|r| r.get(key));
            match replacement.get(key) {
                Some(new) => apply_key_set(tables, id, key, old, new),
                None => {
                    if let Some(old) = old {
                        apply_key_delete(tables, id, key, old);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_index::{EqIndex, IndexKind, KeyRange, SortedIndex, UniqIndex};

    fn person(name: &str, age: i64) -> Record {
        Record::from_pairs([("name", Value::from(name)), ("age", Value::from(age))])
    }

    fn sample() -> Store {
        Store::from_iter([
            (Value::from(1), person("foo", 10)),
            (Value::from(2), person("bar", 42)),
            (Value::from(3), person("baz", 10)),
        ])
    }

    #[test]
    fn test_scenario_add_indexes_new_entity() {
        let store = sample();
        assert_eq!(store.eq("age", &Value::from(10)).len(), 2);

        // Entity 4 has an "age" but no "name"
        let store2 = store.add(Value::from(4), Record::from_pairs([("age", 10)]));
        let ids = store2.eq("age", &Value::from(10));
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&Value::from(4)));

        // The original store is untouched
        assert_eq!(store.eq("age", &Value::from(10)).len(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_fast_path_without_indexes() {
        let store = sample();
        let store2 = store.add(Value::from(4), person("qux", 7));
        assert!(!store2.has_index("age", IndexKind::Equality));
        assert_eq!(store2.len(), 4);
    }

    #[test]
    fn test_add_merges_partial() {
        let store = sample();
        store.force("age", IndexKind::Equality);

        let store2 = store.add(Value::from(1), Record::from_pairs([("age", 11)]));
        let rec = store2.get(&Value::from(1)).unwrap();
        // Existing attributes survive, the partial's value wins
        assert_eq!(rec.get("name"), Some(&Value::from("foo")));
        assert_eq!(rec.get("age"), Some(&Value::from(11)));

        // The index moved the id between buckets
        assert!(!store2.eq("age", &Value::from(10)).contains(&Value::from(1)));
        assert!(store2.eq("age", &Value::from(11)).contains(&Value::from(1)));
    }

    #[test]
    fn test_add_empty_partial() {
        let store = sample();
        let same = store.add(Value::from(1), Record::new());
        assert_eq!(same, store);

        let created = store.add(Value::from(9), Record::new());
        assert_eq!(created.get(&Value::from(9)), Some(&Record::new()));
    }

    #[test]
    fn test_insert_new_conflict() {
        let store = sample();
        let err = store.insert_new(Value::from(1), person("dup", 1)).unwrap_err();
        assert_eq!(
            err,
            Error::key_already_present(Value::from(1))
        );
        assert!(store.insert_new(Value::from(4), person("new", 1)).is_ok());
    }

    #[test]
    fn test_delete_removes_from_all_buckets() {
        let store = sample();
        store.force_all([
            ("age", IndexKind::Equality),
            ("age", IndexKind::Sorted),
            ("name", IndexKind::Unique),
        ]);

        let store2 = store.delete(Value::from(2));
        assert!(!store2.contains(&Value::from(2)));
        assert!(store2.eq("age", &Value::from(42)).is_empty());
        assert_eq!(store2.uniq("name", &Value::from("bar")), None);
        assert_eq!(
            store2.ascending("age", &KeyRange::all()),
            vec![Value::from(1), Value::from(3)]
        );

        // The pre-delete store still sees entity 2 everywhere
        assert!(store.eq("age", &Value::from(42)).contains(&Value::from(2)));
    }

    #[test]
    fn test_delete_absent_id() {
        let store = sample();
        let same = store.delete(Value::from(99));
        assert_eq!(same, store);
    }

    #[test]
    fn test_replace_rejects_non_record() {
        let store = sample();
        let err = store.replace(Value::from(1), Value::from(5)).unwrap_err();
        assert_eq!(err, Error::not_a_record("int64"));
        // The failed operation left the store untouched
        assert_eq!(store.get(&Value::from(1)), Some(&person("foo", 10)));
    }

    #[test]
    fn test_replace_idempotent() {
        let store = sample();
        store.force("age", IndexKind::Equality);
        let rec = person("foo", 11);

        let once = store.replace_record(Value::from(1), rec.clone());
        let twice = once.replace_record(Value::from(1), rec.clone());
        assert_eq!(once, twice);
        assert_eq!(
            twice.eq("age", &Value::from(11)).len(),
            once.eq("age", &Value::from(11)).len()
        );
    }

    #[test]
    fn test_replace_identity_short_circuit() {
        let store = sample();
        let rec = store.get(&Value::from(1)).unwrap().clone();
        let same = store.replace_record(Value::from(1), rec);
        assert_eq!(same, store);
    }

    #[test]
    fn test_replace_diff_routes_only_changes() {
        let store = sample();
        store.force_all([("age", IndexKind::Equality), ("name", IndexKind::Equality)]);

        // Same name, new age, dropped via a brand-new record instance
        let store2 = store.replace_record(
            Value::from(1),
            Record::from_pairs([("name", Value::from("foo")), ("age", Value::from(99))]),
        );
        assert!(store2.eq("age", &Value::from(99)).contains(&Value::from(1)));
        assert!(!store2.eq("age", &Value::from(10)).contains(&Value::from(1)));
        assert!(store2.eq("name", &Value::from("foo")).contains(&Value::from(1)));
    }

    #[test]
    fn test_replace_removed_keys_leave_indexes() {
        let store = sample();
        store.force("name", IndexKind::Equality);

        let store2 = store.replace_record(
            Value::from(1),
            Record::from_pairs([("age", Value::from(10))]),
        );
        assert!(store2.eq("name", &Value::from("foo")).is_empty());
        assert!(!store2.get(&Value::from(1)).unwrap().contains_key("name"));
    }

    #[test]
    fn test_edit_set_and_remove() {
        let store = sample();
        store.force("age", IndexKind::Sorted);

        let store2 = store
            .edit(
                Value::from(1),
                EditOp::Set(vec![("age".into(), Value::from(50))]),
            )
            .unwrap();
        assert_eq!(
            store2.ascending("age", &KeyRange::lower_bound(Value::from(42), false)),
            vec![Value::from(2), Value::from(1)]
        );

        let store3 = store2
            .edit(Value::from(1), EditOp::Remove(vec!["age".into()]))
            .unwrap();
        assert!(!store3.get(&Value::from(1)).unwrap().contains_key("age"));
        assert_eq!(
            store3.ascending("age", &KeyRange::all()),
            vec![Value::from(3), Value::from(2)]
        );
    }

    #[test]
    fn test_edit_union_existing_wins() {
        let store = sample();
        store.force("age", IndexKind::Equality);

        let partial = Record::from_pairs([("age", Value::from(99)), ("city", Value::from("Oslo"))]);
        let store2 = store.edit(Value::from(1), EditOp::Union(partial)).unwrap();

        let rec = store2.get(&Value::from(1)).unwrap();
        assert_eq!(rec.get("age"), Some(&Value::from(10)));
        assert_eq!(rec.get("city"), Some(&Value::from("Oslo")));
        // "age" was not touched in the index either
        assert!(store2.eq("age", &Value::from(10)).contains(&Value::from(1)));
        assert!(store2.eq("age", &Value::from(99)).is_empty());
    }

    #[test]
    fn test_edit_absent_id_acts_on_empty_record() {
        let store = sample();
        let store2 = store
            .edit(
                Value::from(9),
                EditOp::Set(vec![("age".into(), Value::from(1))]),
            )
            .unwrap();
        assert_eq!(
            store2.get(&Value::from(9)),
            Some(&Record::from_pairs([("age", 1)]))
        );

        let store3 = store.edit(Value::from(9), EditOp::Remove(vec!["x".into()])).unwrap();
        assert_eq!(store3.get(&Value::from(9)), Some(&Record::new()));
    }

    #[test]
    fn test_edit_with_custom_transform() {
        let store = sample();
        let store2 = store
            .edit_with(Value::from(1), |cur| {
                let rec = cur.cloned().unwrap_or_default();
                Value::Record(rec.set("age", Value::from(11)))
            })
            .unwrap();
        assert_eq!(
            store2.get(&Value::from(1)).unwrap().get("age"),
            Some(&Value::from(11))
        );

        let err = store
            .edit_with(Value::from(1), |_| Value::from("oops"))
            .unwrap_err();
        assert_eq!(err, Error::not_a_record("string"));
    }

    #[test]
    fn test_merged_mapping() {
        let store = sample();
        let store2 = store.merged([
            (Value::from(2), person("BAR", 42)),
            (Value::from(4), person("qux", 7)),
        ]);
        assert_eq!(store2.len(), 4);
        assert_eq!(
            store2.get(&Value::from(2)).unwrap().get("name"),
            Some(&Value::from("BAR"))
        );
    }

    #[test]
    fn test_incremental_matches_from_scratch() {
        // Drive a store through a mutation sequence with indexes live,
        // then rebuild the same indexes from the final primary store and
        // compare structures.
        let store = sample();
        store.force_all([
            ("age", IndexKind::Equality),
            ("age", IndexKind::Unique),
            ("age", IndexKind::Sorted),
        ]);

        let current = store
            .add(Value::from(4), Record::from_pairs([("age", 10)]))
            .replace_record(Value::from(1), person("foo", 42))
            .delete(Value::from(3))
            .edit(Value::from(2), EditOp::Remove(vec!["age".into()]))
            .unwrap();

        let scratch_eq = EqIndex::build(current.iter(), "age");
        let scratch_sorted = SortedIndex::build(current.iter(), "age");

        for value in [10, 42, 99].map(Value::from) {
            assert_eq!(current.eq("age", &value), scratch_eq.ids(&value));
        }
        assert_eq!(
            current.ascending("age", &KeyRange::all()),
            scratch_sorted.scan(&KeyRange::all(), false)
        );

        let scratch_uniq = UniqIndex::build(current.iter(), "age");
        for value in [10, 42].map(Value::from) {
            assert_eq!(
                current.uniq("age", &value),
                scratch_uniq.id_for(&value).cloned()
            );
        }
    }
}
