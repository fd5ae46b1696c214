//! Flat triple-pattern extraction.
//!
//! [`CollectTriples`] walks a constructed tree and gathers every
//! triple-scoped pattern it contains into one deduplicated set. Each
//! implementation visits exactly its own children; the traversal recurses
//! through group graph patterns, pattern wrappers (OPTIONAL, UNION, MINUS,
//! GRAPH, SERVICE), expression-embedded patterns (EXISTS / NOT EXISTS),
//! sub-selects, and update quads. [`TriplesSameSubjectPath`] inserts
//! itself and stops, so nested structure below a collected pattern is
//! preserved intact inside the set element.

use crate::ast::TriplesSameSubjectPath;
use std::collections::HashSet;

/// Gather the triple patterns reachable from a node.
///
/// Deduplication is deep structural equality: two occurrences of the same
/// pattern anywhere under the receiver produce one set element.
pub trait CollectTriples {
    /// Insert every reachable triple pattern into `out`.
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>);

    /// Collect into a fresh set.
    fn collect_triples(&self) -> HashSet<TriplesSameSubjectPath> {
        let mut out = HashSet::new();
        self.collect_into(&mut out);
        out
    }
}

impl<T: CollectTriples> CollectTriples for Box<T> {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        (**self).collect_into(out);
    }
}

impl<T: CollectTriples> CollectTriples for Option<T> {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        if let Some(inner) = self {
            inner.collect_into(out);
        }
    }
}

impl<T: CollectTriples> CollectTriples for Vec<T> {
    fn collect_into(&self, out: &mut HashSet<TriplesSameSubjectPath>) {
        for item in self {
            item.collect_into(out);
        }
    }
}
