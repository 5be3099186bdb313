//! RDF graph value model for Terrapin
//!
//! This crate provides the canonical types for representing RDF graphs:
//! terms, triples, prefix mappings, the graph container contract, and the
//! blank-node-normalising equivalence check.
//!
//! # Key Design Principles
//!
//! 1. **Absolute IRIs only** - Terms store IRIs in absolute form. The
//!    Turtle parser resolves references before building terms.
//!
//! 2. **Canonical typed literals** - `xsd:integer` lexical forms are
//!    canonicalised at construction (`+007` becomes `7`).
//!
//! 3. **Bag semantics by default** - [`TripleGraph`] keeps duplicates and
//!    source order. Call `dedupe()` explicitly for set semantics.
//!
//! 4. **Total term order** - Terms order as Iri < Blank(Named) <
//!    Blank(Gen) < Literal(Plain) < Literal(PlainLang) < Literal(Typed);
//!    triples order lexicographically by (s, p, o). The equivalence check
//!    relies on this.
//!
//! # Example
//!
//! ```
//! use terrapin_graph::{isomorphic, Graph, Term, Triple, TripleGraph};
//!
//! let mut g1 = TripleGraph::empty();
//! g1.add_triple(
//!     Term::blank("a"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::plain("Alice"),
//! );
//!
//! let mut g2 = TripleGraph::empty();
//! g2.add_triple(
//!     Term::blank_gen(1),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::plain("Alice"),
//! );
//!
//! // Equivalent modulo blank node naming
//! assert!(isomorphic(&g1, &g2));
//! ```

mod graph;
mod iso;
mod mappings;
pub mod resolve;
mod term;
mod triple;

pub use graph::{Graph, TripleGraph};
pub use iso::{isomorphic, normal_form};
pub use mappings::{BaseUrl, PrefixMappings};
pub use resolve::{absolutise, resolve_qname, ResolveError};
pub use term::{BlankId, Literal, Term};
pub use triple::{equal_objects, equal_predicates, equal_subjects, Triple};
