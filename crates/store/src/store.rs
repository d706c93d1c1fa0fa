//! The `Store` facade: primary store, lazy index tables, read operations.

use core::hash::{Hash, Hasher};
use std::fmt;
use std::sync::Arc;

use facet_core::{EntityId, Error, Record, Result, Value};
use facet_index::{EqIndex, IdSet, IndexKind, KeyRange, SortedIndex, UniqIndex};
use im::OrdMap;
use parking_lot::RwLock;

/// The ground-truth mapping from entity id to record. Every index is a
/// pure function of this mapping for a given attribute key.
pub type PrimaryStore = OrdMap<EntityId, Record>;

/// Per-kind tables of built per-key indexes. A key absent from a table
/// simply has not been requested for that kind yet.
#[derive(Clone, Debug, Default)]
pub(crate) struct IndexTables {
    pub(crate) eq: im::HashMap<String, EqIndex>,
    pub(crate) uniq: im::HashMap<String, UniqIndex>,
    pub(crate) sorted: im::HashMap<String, SortedIndex>,
}

impl IndexTables {
    pub(crate) fn is_empty(&self) -> bool {
        self.eq.is_empty() && self.uniq.is_empty() && self.sorted.is_empty()
    }
}

/// An immutable mapping from entity id to `Record` with lazily built,
/// incrementally maintained secondary indexes.
///
/// Equality and hashing are defined purely on the entity content: two
/// stores holding the same entities compare and hash equal no matter
/// which indexes either of them happens to have cached.
///
/// # Concurrency
///
/// Clones of one store value share their index cache behind a read/write
/// lock. When several threads race to build the same missing index, each
/// builds outside the lock and only the first install wins; the others
/// adopt the winner's structure. Mutations snapshot the tables and wrap
/// the patched copy in a fresh lock, so a derived store never aliases
/// its parent's cache slots.
#[derive(Clone)]
pub struct Store {
    pub(crate) entities: PrimaryStore,
    pub(crate) indexes: Arc<RwLock<IndexTables>>,
}

impl Store {
    /// Creates an empty store.
    pub fn empty() -> Self {
        Self::wrap(PrimaryStore::new())
    }

    /// Wraps an existing id -> record mapping. O(1): no scanning, no
    /// index construction.
    pub fn wrap(entities: PrimaryStore) -> Self {
        Self::from_parts(entities, IndexTables::default())
    }

    /// Builds a store from id/value pairs, rejecting any value that is
    /// not a record.
    pub fn try_from_values(
        pairs: impl IntoIterator<Item = (EntityId, Value)>,
    ) -> Result<Self> {
        let mut entities = PrimaryStore::new();
        for (id, value) in pairs {
            match value {
                Value::Record(rec) => {
                    entities.insert(id, rec);
                }
                other => return Err(Error::not_a_record(other.kind_name())),
            }
        }
        Ok(Self::wrap(entities))
    }

    /// Builds a store by keying each record with `key_fn`. Later records
    /// win when `key_fn` collides.
    pub fn keyed_by(
        key_fn: impl Fn(&Record) -> EntityId,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        let mut entities = PrimaryStore::new();
        for record in records {
            let id = key_fn(&record);
            entities.insert(id, record);
        }
        Self::wrap(entities)
    }

    pub(crate) fn from_parts(entities: PrimaryStore, tables: IndexTables) -> Self {
        Self {
            entities,
            indexes: Arc::new(RwLock::new(tables)),
        }
    }

    // ==================== map contract ====================

    /// Returns the record stored under `id`, if any.
    pub fn get(&self, id: &EntityId) -> Option<&Record> {
        self.entities.get(id)
    }

    /// Returns the record stored under `id`, or `default` when absent.
    pub fn get_or(&self, id: &EntityId, default: Record) -> Record {
        self.entities.get(id).cloned().unwrap_or(default)
    }

    /// Returns true if an entity is stored under `id`.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over (id, record) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Record)> {
        self.entities.iter()
    }

    /// Iterates over entity ids in order.
    pub fn keys(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.keys()
    }

    /// Iterates over records in id order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entities.values()
    }

    /// Returns the underlying id -> record mapping.
    pub fn entities(&self) -> &PrimaryStore {
        &self.entities
    }

    // ==================== lazy index construction ====================

    fn ensure_eq(&self, key: &str) {
        if self.indexes.read().eq.contains_key(key) {
            return;
        }
        tracing::debug!(key, kind = "eq", "building index");
        let built = EqIndex::build(self.entities.iter(), key);
        let mut tables = self.indexes.write();
        // First builder wins; racers adopt the installed structure.
        if !tables.eq.contains_key(key) {
            tables.eq.insert(key.to_string(), built);
        }
    }

    fn ensure_uniq(&self, key: &str) {
        if self.indexes.read().uniq.contains_key(key) {
            return;
        }
        tracing::debug!(key, kind = "uniq", "building index");
        let built = UniqIndex::build(self.entities.iter(), key);
        let mut tables = self.indexes.write();
        if !tables.uniq.contains_key(key) {
            tables.uniq.insert(key.to_string(), built);
        }
    }

    fn ensure_sorted(&self, key: &str) {
        if self.indexes.read().sorted.contains_key(key) {
            return;
        }
        tracing::debug!(key, kind = "sorted", "building index");
        let built = SortedIndex::build(self.entities.iter(), key);
        let mut tables = self.indexes.write();
        if !tables.sorted.contains_key(key) {
            tables.sorted.insert(key.to_string(), built);
        }
    }

    /// Ensures the (kind, key) index exists without running a query.
    /// Useful for paying construction cost at startup instead of on the
    /// first lookup.
    pub fn force(&self, key: &str, kind: IndexKind) {
        match kind {
            IndexKind::Equality => self.ensure_eq(key),
            IndexKind::Unique => self.ensure_uniq(key),
            IndexKind::Sorted => self.ensure_sorted(key),
        }
    }

    /// Forces several (key, kind) pairs at once.
    pub fn force_all<'a>(&self, specs: impl IntoIterator<Item = (&'a str, IndexKind)>) {
        for (key, kind) in specs {
            self.force(key, kind);
        }
    }

    /// Returns true if the (kind, key) index is currently built. Exposed
    /// for tests and instrumentation; readers never need to check this.
    pub fn has_index(&self, key: &str, kind: IndexKind) -> bool {
        let tables = self.indexes.read();
        match kind {
            IndexKind::Equality => tables.eq.contains_key(key),
            IndexKind::Unique => tables.uniq.contains_key(key),
            IndexKind::Sorted => tables.sorted.contains_key(key),
        }
    }

    // ==================== read operations ====================

    /// Returns the ids of all entities whose `key` attribute equals
    /// `value`. Builds the equality index for `key` on first use.
    pub fn eq(&self, key: &str, value: &Value) -> IdSet {
        self.ensure_eq(key);
        self.indexes
            .read()
            .eq
            .get(key)
            .map(|ix| ix.ids(value))
            .unwrap_or_default()
    }

    /// Conjunction of several (key, value) equality constraints. Stops
    /// early (without touching later keys' indexes) once the running
    /// intersection is empty.
    pub fn eq_all<'a>(&self, pairs: impl IntoIterator<Item = (&'a str, &'a Value)>) -> IdSet {
        let mut result: Option<IdSet> = None;
        for (key, value) in pairs {
            let ids = match &result {
                Some(acc) if acc.is_empty() => break,
                _ => self.eq(key, value),
            };
            result = Some(match result {
                None => ids,
                Some(acc) => acc.iter().filter(|id| ids.contains(id)).cloned().collect(),
            });
        }
        result.unwrap_or_default()
    }

    /// Like `eq`, but projects the ids back to their records.
    pub fn get_eq(&self, key: &str, value: &Value) -> Vec<Record> {
        self.project(self.eq(key, value).iter())
    }

    /// Record projection of `eq_all`.
    pub fn get_eq_all<'a>(
        &self,
        pairs: impl IntoIterator<Item = (&'a str, &'a Value)>,
    ) -> Vec<Record> {
        self.project(self.eq_all(pairs).iter())
    }

    /// Returns the single id registered under `value` in `key`'s unique
    /// index, if any. Builds the unique index for `key` on first use.
    pub fn uniq(&self, key: &str, value: &Value) -> Option<EntityId> {
        self.ensure_uniq(key);
        self.indexes
            .read()
            .uniq
            .get(key)
            .and_then(|ix| ix.id_for(value).cloned())
    }

    /// Like `uniq`, but projects the id back to its record.
    pub fn get_uniq(&self, key: &str, value: &Value) -> Option<Record> {
        self.uniq(key, value)
            .and_then(|id| self.entities.get(&id).cloned())
    }

    /// Returns ids whose `key` value falls within `range`, ordered by
    /// value ascending. Builds the sorted index for `key` on first use.
    pub fn ascending(&self, key: &str, range: &KeyRange<Value>) -> Vec<EntityId> {
        self.ensure_sorted(key);
        self.indexes
            .read()
            .sorted
            .get(key)
            .map(|ix| ix.scan(range, false))
            .unwrap_or_default()
    }

    /// Like `ascending`, ordered by value descending.
    pub fn descending(&self, key: &str, range: &KeyRange<Value>) -> Vec<EntityId> {
        self.ensure_sorted(key);
        self.indexes
            .read()
            .sorted
            .get(key)
            .map(|ix| ix.scan(range, true))
            .unwrap_or_default()
    }

    /// Record projection of `ascending`.
    pub fn get_ascending(&self, key: &str, range: &KeyRange<Value>) -> Vec<Record> {
        self.project(self.ascending(key, range).iter())
    }

    /// Record projection of `descending`.
    pub fn get_descending(&self, key: &str, range: &KeyRange<Value>) -> Vec<Record> {
        self.project(self.descending(key, range).iter())
    }

    /// Maps ids back to records through the primary store, preserving
    /// the ids' iteration order.
    pub fn project<'a>(&self, ids: impl Iterator<Item = &'a EntityId>) -> Vec<Record> {
        ids.filter_map(|id| self.entities.get(id).cloned())
            .collect()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        // Cache state is never observable through equality.
        self.entities == other.entities
    }
}

impl Eq for Store {}

impl Hash for Store {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entities.hash(state);
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}

impl FromIterator<(EntityId, Record)> for Store {
    fn from_iter<I: IntoIterator<Item = (EntityId, Record)>>(iter: I) -> Self {
        Self::wrap(iter.into_iter().collect())
    }
}
