//! Record structure for the facet record store.
//!
//! A `Record` is an immutable flat mapping from attribute key to `Value`.
//! All "mutating" methods return a new record and leave the receiver
//! untouched; unchanged attributes are shared structurally between the
//! old and new record.

use crate::value::Value;
use im::OrdMap;

/// An immutable flat attribute map.
///
/// Attribute keys are strings; values are arbitrary `Value`s. A nested
/// `Value::Record` is legal data inside a record but is never indexed.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record {
    attrs: OrdMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from key/value pairs. Later pairs win on duplicate keys.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            attrs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Returns true if the record has an attribute named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns true if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attrs.iter()
    }

    /// Iterates over attribute keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.attrs.keys()
    }

    /// Returns a new record with `key` set to `value`.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Record {
        Record {
            attrs: self.attrs.update(key.into(), value.into()),
        }
    }

    /// Returns a new record without `key`. Absent keys are a no-op.
    pub fn without(&self, key: &str) -> Record {
        Record {
            attrs: self.attrs.without(key),
        }
    }

    /// Returns a new record with `other`'s attributes merged in.
    /// On conflicting keys, `other`'s value wins.
    pub fn merged(&self, other: &Record) -> Record {
        let mut attrs = self.attrs.clone();
        for (k, v) in other.iter() {
            attrs.insert(k.clone(), v.clone());
        }
        Record { attrs }
    }

    /// Returns a new record with `other`'s attributes added only where
    /// absent. On conflicting keys, the existing value wins.
    pub fn union(&self, other: &Record) -> Record {
        let mut attrs = self.attrs.clone();
        for (k, v) in other.iter() {
            if !attrs.contains_key(k) {
                attrs.insert(k.clone(), v.clone());
            }
        }
        Record { attrs }
    }

    /// Returns true if both records share the same underlying root node.
    /// This is an identity check, not structural equality.
    pub fn ptr_eq(&self, other: &Record) -> bool {
        self.attrs.ptr_eq(&other.attrs)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = im::ordmap::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
