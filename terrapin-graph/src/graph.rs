//! RDF graph abstraction and the list-backed implementation
//!
//! [`Graph`] is the small contract producers (parsers) and consumers
//! (serializers, the equivalence check) depend on. [`TripleGraph`] is the
//! `Vec<Triple>`-backed implementation: it preserves duplicates and source
//! order (bag semantics); call `dedupe()` explicitly for set semantics.

use crate::{BaseUrl, PrefixMappings, Term, Triple};

/// Abstract RDF graph container
///
/// Implementations store a finite sequence of triples together with the
/// optional base URL and the prefix mappings the source document declared.
pub trait Graph: Sized {
    /// Create an empty graph
    fn empty() -> Self;

    /// Build a graph from parsed output
    fn build(triples: Vec<Triple>, base: Option<BaseUrl>, mappings: PrefixMappings) -> Self;

    /// All triples, in the order the graph holds them
    fn triples(&self) -> &[Triple];

    /// The base URL, if the source declared or was given one
    fn base_url(&self) -> Option<&BaseUrl>;

    /// The prefix mappings collected from the source
    fn prefix_mappings(&self) -> &PrefixMappings;

    /// Merge extra prefix mappings into the graph
    ///
    /// When `overwrite` is true, `extra` wins on key collision; otherwise
    /// existing bindings are kept.
    fn add_prefix_mappings(self, extra: &PrefixMappings, overwrite: bool) -> Self;

    /// Check whether the graph holds no triples
    fn is_empty(&self) -> bool {
        self.triples().is_empty()
    }

    /// Select triples by per-position predicates
    ///
    /// Each selector, when present, must accept the term in that position;
    /// an absent selector matches anything.
    fn select(
        &self,
        s: Option<&dyn Fn(&Term) -> bool>,
        p: Option<&dyn Fn(&Term) -> bool>,
        o: Option<&dyn Fn(&Term) -> bool>,
    ) -> Vec<&Triple> {
        self.triples()
            .iter()
            .filter(|t| {
                s.map_or(true, |accept| accept(&t.s))
                    && p.map_or(true, |accept| accept(&t.p))
                    && o.map_or(true, |accept| accept(&t.o))
            })
            .collect()
    }

    /// Query triples by exact terms
    ///
    /// Each argument, when present, must equal the term in that position.
    fn query(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> Vec<&Triple> {
        self.triples()
            .iter()
            .filter(|t| {
                s.map_or(true, |term| *term == t.s)
                    && p.map_or(true, |term| *term == t.p)
                    && o.map_or(true, |term| *term == t.o)
            })
            .collect()
    }

    /// Check whether `node` occurs in any position of any triple
    fn contains_node(&self, node: &Term) -> bool {
        self.triples()
            .iter()
            .any(|t| t.s == *node || t.p == *node || t.o == *node)
    }

    /// Distinct subjects of triples carrying `predicate`, sorted
    fn subjects_with_predicate(&self, predicate: &Term) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = self
            .triples()
            .iter()
            .filter(|t| t.p == *predicate)
            .map(|t| &t.s)
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Distinct objects of triples carrying `predicate`, sorted
    fn objects_of_predicate(&self, predicate: &Term) -> Vec<&Term> {
        let mut objects: Vec<&Term> = self
            .triples()
            .iter()
            .filter(|t| t.p == *predicate)
            .map(|t| &t.o)
            .collect();
        objects.sort();
        objects.dedup();
        objects
    }

    /// Expansion hook used by the equivalence check
    ///
    /// The parser stores absolute IRIs, so the default is the identity.
    /// Implementations holding compacted or relative IRIs can expand here.
    fn expand_triples(&self) -> Vec<Triple> {
        self.triples().to_vec()
    }
}

/// A `Vec`-backed RDF graph
///
/// # Example
///
/// ```
/// use terrapin_graph::{Graph, Term, TripleGraph};
///
/// let mut graph = TripleGraph::empty();
/// graph.add_triple(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::plain("Alice"),
/// );
///
/// assert_eq!(graph.triples().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TripleGraph {
    triples: Vec<Triple>,
    base: Option<BaseUrl>,
    mappings: PrefixMappings,
}

impl TripleGraph {
    /// Create an empty graph with a base URL
    pub fn with_base(base: BaseUrl) -> Self {
        Self {
            base: Some(base),
            ..Default::default()
        }
    }

    /// Append a triple, keeping insertion order and duplicates
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Append a triple by components
    ///
    /// # Panics
    ///
    /// Panics on a literal subject or non-IRI predicate, as [`Triple::new`].
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Number of triples (duplicates counted)
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Iterate over triples in graph order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Sort and remove duplicate triples (set semantics)
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// Get all triples, consuming the graph
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }
}

impl Graph for TripleGraph {
    fn empty() -> Self {
        Self::default()
    }

    fn build(triples: Vec<Triple>, base: Option<BaseUrl>, mappings: PrefixMappings) -> Self {
        Self {
            triples,
            base,
            mappings,
        }
    }

    fn triples(&self) -> &[Triple] {
        &self.triples
    }

    fn base_url(&self) -> Option<&BaseUrl> {
        self.base.as_ref()
    }

    fn prefix_mappings(&self) -> &PrefixMappings {
        &self.mappings
    }

    fn add_prefix_mappings(mut self, extra: &PrefixMappings, overwrite: bool) -> Self {
        self.mappings.merge(extra, overwrite);
        self
    }
}

impl IntoIterator for TripleGraph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleGraph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for TripleGraph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        TripleGraph {
            triples: iter.into_iter().collect(),
            base: None,
            mappings: PrefixMappings::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn make_test_graph() -> TripleGraph {
        let mut graph = TripleGraph::empty();
        graph.add_triple(
            iri("http://example.org/bob"),
            iri("http://xmlns.com/foaf/0.1/name"),
            Term::plain("Bob"),
        );
        graph.add_triple(
            iri("http://example.org/alice"),
            iri("http://xmlns.com/foaf/0.1/name"),
            Term::plain("Alice"),
        );
        graph.add_triple(
            iri("http://example.org/alice"),
            iri("http://xmlns.com/foaf/0.1/knows"),
            iri("http://example.org/bob"),
        );
        graph
    }

    #[test]
    fn test_empty_graph() {
        let graph = TripleGraph::empty();
        assert!(graph.is_empty());
        assert!(graph.base_url().is_none());
        assert!(graph.prefix_mappings().is_empty());
    }

    #[test]
    fn test_build_round_trips_components() {
        let mut mappings = PrefixMappings::new();
        mappings.insert("ex", "http://example.org/");
        let triples = vec![Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            iri("http://example.org/o"),
        )];

        let graph = TripleGraph::build(
            triples.clone(),
            Some(BaseUrl::new("http://example.org/")),
            mappings,
        );

        assert_eq!(graph.triples(), triples.as_slice());
        assert_eq!(graph.base_url().unwrap().as_str(), "http://example.org/");
        assert_eq!(
            graph.prefix_mappings().get("ex"),
            Some("http://example.org/")
        );
    }

    #[test]
    fn test_insertion_order_and_duplicates_preserved() {
        let mut graph = TripleGraph::empty();
        let t = Triple::new(
            iri("http://example.org/s"),
            iri("http://example.org/p"),
            Term::plain("o"),
        );
        graph.add(t.clone());
        graph.add(t.clone());
        assert_eq!(graph.len(), 2);

        graph.dedupe();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_select_with_predicates() {
        let graph = make_test_graph();

        let literal_objects =
            graph.select(None, None, Some(&|o: &Term| o.is_literal()));
        assert_eq!(literal_objects.len(), 2);

        let alice = iri("http://example.org/alice");
        let alice_triples =
            graph.select(Some(&move |s: &Term| *s == alice), None, None);
        assert_eq!(alice_triples.len(), 2);

        let all = graph.select(None, None, None);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_query_exact_terms() {
        let graph = make_test_graph();

        let name = iri("http://xmlns.com/foaf/0.1/name");
        let named = graph.query(None, Some(&name), None);
        assert_eq!(named.len(), 2);

        let alice = iri("http://example.org/alice");
        let alice_names = graph.query(Some(&alice), Some(&name), None);
        assert_eq!(alice_names.len(), 1);
        assert_eq!(alice_names[0].o, Term::plain("Alice"));

        let nothing = graph.query(Some(&iri("http://example.org/nobody")), None, None);
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_contains_node() {
        let graph = make_test_graph();
        assert!(graph.contains_node(&iri("http://example.org/bob")));
        assert!(graph.contains_node(&Term::plain("Alice")));
        assert!(!graph.contains_node(&iri("http://example.org/nobody")));
    }

    #[test]
    fn test_subjects_and_objects_of_predicate() {
        let graph = make_test_graph();
        let name = iri("http://xmlns.com/foaf/0.1/name");

        let subjects = graph.subjects_with_predicate(&name);
        assert_eq!(
            subjects,
            vec![
                &iri("http://example.org/alice"),
                &iri("http://example.org/bob")
            ]
        );

        let objects = graph.objects_of_predicate(&name);
        assert_eq!(objects, vec![&Term::plain("Alice"), &Term::plain("Bob")]);
    }

    #[test]
    fn test_add_prefix_mappings() {
        let mut existing = PrefixMappings::new();
        existing.insert("ex", "http://old/");
        let graph = TripleGraph::build(Vec::new(), None, existing);

        let mut extra = PrefixMappings::new();
        extra.insert("ex", "http://new/");
        extra.insert("foaf", "http://xmlns.com/foaf/0.1/");

        let kept = graph.clone().add_prefix_mappings(&extra, false);
        assert_eq!(kept.prefix_mappings().get("ex"), Some("http://old/"));
        assert_eq!(
            kept.prefix_mappings().get("foaf"),
            Some("http://xmlns.com/foaf/0.1/")
        );

        let replaced = graph.add_prefix_mappings(&extra, true);
        assert_eq!(replaced.prefix_mappings().get("ex"), Some("http://new/"));
    }

    #[test]
    fn test_sort() {
        let mut graph = make_test_graph();
        graph.sort();
        let first = graph.iter().next().unwrap();
        assert_eq!(first.s.as_iri(), Some("http://example.org/alice"));
    }
}
