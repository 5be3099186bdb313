//! Graph equivalence modulo blank-node naming, order, and duplicates
//!
//! Two graphs are considered equivalent when their normal forms are equal.
//! The normal form is the sorted, deduplicated triple sequence with every
//! blank node (named or generated) renamed to a canonical sequential id in
//! first-occurrence order.
//!
//! This is deliberately a heuristic, not full blank-node graph isomorphism
//! (which is NP-hard): graphs whose blank nodes occur in symmetric
//! positions under different labels can compare unequal. It is exact for
//! graphs whose sorted triple sequences line their blank nodes up, which
//! covers parser output compared against reference graphs.

use crate::{BlankId, Graph, Term, Triple};
use std::collections::HashMap;

/// Decide equivalence of two graphs
///
/// Insensitive to triple order, duplicate triples, and blank node
/// identifiers; sensitive to everything else.
pub fn isomorphic<A: Graph, B: Graph>(a: &A, b: &B) -> bool {
    normal_form(a) == normal_form(b)
}

/// The sorted, deduplicated, blank-renamed triple sequence of a graph
pub fn normal_form<G: Graph>(g: &G) -> Vec<Triple> {
    let mut triples = g.expand_triples();
    triples.sort();
    triples.dedup();

    let mut renamed = rename_blank_nodes(&triples);
    // Renaming can reorder: canonical ids need not sort like the labels did.
    renamed.sort();
    renamed.dedup();
    renamed
}

/// Rewrite every blank node to a canonical generated id, assigned in
/// first-occurrence order over the given sequence.
fn rename_blank_nodes(triples: &[Triple]) -> Vec<Triple> {
    let mut ids: HashMap<BlankId, u32> = HashMap::new();
    let mut next: u32 = 0;

    let mut canonical = |term: &Term, ids: &mut HashMap<BlankId, u32>| -> Term {
        match term {
            Term::Blank(id) => {
                let assigned = *ids.entry(id.clone()).or_insert_with(|| {
                    next += 1;
                    next
                });
                Term::blank_gen(assigned)
            }
            other => other.clone(),
        }
    };

    triples
        .iter()
        .map(|t| {
            let s = canonical(&t.s, &mut ids);
            let p = t.p.clone();
            let o = canonical(&t.o, &mut ids);
            Triple::new(s, p, o)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrefixMappings, TripleGraph};

    fn graph_of(triples: Vec<Triple>) -> TripleGraph {
        TripleGraph::build(triples, None, PrefixMappings::new())
    }

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    #[test]
    fn test_reflexive() {
        let g = graph_of(vec![
            Triple::new(iri("http://s/"), iri("http://p/"), Term::plain("o")),
            Triple::new(Term::blank("x"), iri("http://p/"), iri("http://o/")),
        ]);
        assert!(isomorphic(&g, &g));

        let empty = TripleGraph::empty();
        assert!(isomorphic(&empty, &empty));
    }

    #[test]
    fn test_insensitive_to_order_and_duplicates() {
        let t1 = Triple::new(iri("http://s/"), iri("http://p/"), iri("http://o1/"));
        let t2 = Triple::new(iri("http://s/"), iri("http://p/"), iri("http://o2/"));

        let g1 = graph_of(vec![t1.clone(), t2.clone()]);
        let g2 = graph_of(vec![t2.clone(), t1.clone(), t2.clone(), t1.clone()]);
        assert!(isomorphic(&g1, &g2));
    }

    #[test]
    fn test_insensitive_to_blank_labels() {
        // _:a <p> <o> versus a generated blank node
        let named = graph_of(vec![Triple::new(
            Term::blank("a"),
            iri("http://p/"),
            iri("http://o/"),
        )]);
        let generated = graph_of(vec![Triple::new(
            Term::blank_gen(1),
            iri("http://p/"),
            iri("http://o/"),
        )]);
        assert!(isomorphic(&named, &generated));

        // Different generated ids are also equivalent
        let later = graph_of(vec![Triple::new(
            Term::blank_gen(17),
            iri("http://p/"),
            iri("http://o/"),
        )]);
        assert!(isomorphic(&generated, &later));
    }

    #[test]
    fn test_shared_blank_structure_preserved() {
        // Two triples sharing one blank node are not equivalent to two
        // triples using two distinct blank nodes.
        let shared = graph_of(vec![
            Triple::new(Term::blank("x"), iri("http://p/"), iri("http://o1/")),
            Triple::new(Term::blank("x"), iri("http://p/"), iri("http://o2/")),
        ]);
        let distinct = graph_of(vec![
            Triple::new(Term::blank("x"), iri("http://p/"), iri("http://o1/")),
            Triple::new(Term::blank("y"), iri("http://p/"), iri("http://o2/")),
        ]);
        assert!(!isomorphic(&shared, &distinct));
    }

    #[test]
    fn test_different_graphs_not_equivalent() {
        let g1 = graph_of(vec![Triple::new(
            iri("http://s/"),
            iri("http://p/"),
            Term::plain("o"),
        )]);
        let g2 = graph_of(vec![Triple::new(
            iri("http://s/"),
            iri("http://p/"),
            Term::plain("other"),
        )]);
        assert!(!isomorphic(&g1, &g2));

        let empty = TripleGraph::empty();
        assert!(!isomorphic(&g1, &empty));
    }

    #[test]
    fn test_literal_kind_distinguished() {
        let plain = graph_of(vec![Triple::new(
            iri("http://s/"),
            iri("http://p/"),
            Term::plain("42"),
        )]);
        let typed = graph_of(vec![Triple::new(
            iri("http://s/"),
            iri("http://p/"),
            Term::typed("42", terrapin_vocab::xsd::INTEGER),
        )]);
        assert!(!isomorphic(&plain, &typed));
    }

    #[test]
    fn test_normal_form_renames_in_first_occurrence_order() {
        let g = graph_of(vec![
            Triple::new(Term::blank("zz"), iri("http://p/"), Term::blank("aa")),
        ]);
        let normal = normal_form(&g);
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].s, Term::blank_gen(1));
        assert_eq!(normal[0].o, Term::blank_gen(2));
    }
}
