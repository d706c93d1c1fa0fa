//! Term evaluation against a store.

use facet_core::Record;
use facet_index::IdSet;
use facet_store::Store;

use crate::term::Term;

/// Evaluates a single term to a set of entity ids.
pub fn eval(store: &Store, term: &Term) -> IdSet {
    match term {
        Term::Eq { key, value } => store.eq(key, value),
        Term::Uniq { key, value } => match store.uniq(key, value) {
            Some(id) => IdSet::unit(id),
            None => IdSet::new(),
        },
        Term::Range { key, range } => store.ascending(key, range).into_iter().collect(),
        Term::Or(terms) => {
            let mut result = IdSet::new();
            for term in terms {
                for id in eval(store, term) {
                    result.insert(id);
                }
            }
            result
        }
        Term::And(terms) => conjunction(store, terms),
    }
}

/// Evaluates top-level terms as an implicit conjunction. The moment an
/// intermediate intersection is empty, remaining terms are skipped, so
/// their indexes are never built.
pub fn query(store: &Store, terms: &[Term]) -> IdSet {
    conjunction(store, terms)
}

/// Like `query`, projecting the resulting ids back to records through
/// the store, in the id set's iteration order.
pub fn query_records(store: &Store, terms: &[Term]) -> Vec<Record> {
    let ids = query(store, terms);
    store.project(ids.iter())
}

fn conjunction(store: &Store, terms: &[Term]) -> IdSet {
    let mut result: Option<IdSet> = None;
    for term in terms {
        if matches!(&result, Some(acc) if acc.is_empty()) {
            break;
        }
        let ids = eval(store, term);
        result = Some(match result {
            None => ids,
            Some(acc) => intersect(&acc, &ids),
        });
    }
    result.unwrap_or_default()
}

fn intersect(a: &IdSet, b: &IdSet) -> IdSet {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter(|id| large.contains(id))
        .cloned()
        .collect()
}
