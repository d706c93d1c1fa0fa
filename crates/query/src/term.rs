//! Query term grammar.

use facet_core::Value;
use facet_index::KeyRange;

/// A query term. Every variant evaluates to a set of entity ids.
#[derive(Clone, Debug)]
pub enum Term {
    /// Entities whose `key` attribute equals `value`.
    Eq { key: String, value: Value },
    /// The single entity registered under `value` in `key`'s unique
    /// index, as a singleton or empty set.
    Uniq { key: String, value: Value },
    /// Entities whose `key` attribute falls within `range`.
    Range { key: String, range: KeyRange<Value> },
    /// Union of the sub-terms' results.
    Or(Vec<Term>),
    /// Intersection of the sub-terms' results.
    And(Vec<Term>),
}

impl Term {
    /// Equality term.
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Term::Eq {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Unique-index term.
    pub fn uniq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Term::Uniq {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Range term with one- or two-sided bounds.
    pub fn range(key: impl Into<String>, range: KeyRange<Value>) -> Self {
        Term::Range {
            key: key.into(),
            range,
        }
    }

    /// Disjunction of sub-terms.
    pub fn or(terms: impl IntoIterator<Item = Term>) -> Self {
        Term::Or(terms.into_iter().collect())
    }

    /// Conjunction of sub-terms.
    pub fn and(terms: impl IntoIterator<Item = Term>) -> Self {
        Term::And(terms.into_iter().collect())
    }
}
