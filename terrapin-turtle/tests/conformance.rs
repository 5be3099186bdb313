//! End-to-end tests: parse Turtle documents and check the resulting graphs,
//! their prefix mappings, and graph equivalence.

use std::io::Write;

use pretty_assertions::assert_eq;

use terrapin_graph::{
    isomorphic, BaseUrl, Graph, PrefixMappings, Term, Triple, TripleGraph,
};
use terrapin_turtle::{parse, TurtleError, TurtleParser};
use terrapin_vocab::{rdf, xsd};

fn iri(s: &str) -> Term {
    Term::iri(s)
}

#[test]
fn simple_triple_with_prefix() {
    let graph = parse("@prefix ex: <http://e/> . ex:a ex:b ex:c .").unwrap();

    assert_eq!(
        graph.triples(),
        &[Triple::new(
            iri("http://e/a"),
            iri("http://e/b"),
            iri("http://e/c")
        )]
    );
    assert_eq!(graph.prefix_mappings().get("ex"), Some("http://e/"));
}

#[test]
fn typed_literal_and_language_tag() {
    let graph = parse(
        r#"<http://e/s> <http://e/p> "42"^^<http://www.w3.org/2001/XMLSchema#integer> , "hi"@en ."#,
    )
    .unwrap();

    assert_eq!(graph.triples().len(), 2);
    assert_eq!(graph.triples()[0].o, Term::typed("42", xsd::INTEGER));
    assert_eq!(graph.triples()[1].o, Term::plain_lang("hi", "en"));
}

#[test]
fn collection_desugars_to_list() {
    let graph = parse("<http://e/s> <http://e/p> ( <http://e/a> <http://e/b> ) .").unwrap();

    // The original triple plus the four list triples
    assert_eq!(graph.triples().len(), 5);

    let head = &graph.triples()[0].o;
    assert!(head.is_blank());

    // Walk the chain: head --first--> a, head --rest--> next,
    // next --first--> b, next --rest--> nil
    let first = iri(rdf::FIRST);
    let rest = iri(rdf::REST);

    let firsts = graph.query(None, Some(&first), None);
    assert_eq!(firsts.len(), 2);
    assert_eq!(firsts[0].s, *head);
    assert_eq!(firsts[0].o, iri("http://e/a"));
    assert_eq!(firsts[1].o, iri("http://e/b"));

    let rests = graph.query(None, Some(&rest), None);
    assert_eq!(rests.len(), 2);
    assert_eq!(rests[0].s, *head);
    assert_eq!(rests[0].o, firsts[1].s);
    assert_eq!(rests[1].o, iri(rdf::NIL));
}

#[test]
fn blank_property_list_subject_shares_node() {
    let graph =
        parse("[ <http://e/p> <http://e/o1>; <http://e/q> <http://e/o2> ] <http://e/r> <http://e/o3> .")
            .unwrap();

    assert_eq!(graph.triples().len(), 3);
    let subject = &graph.triples()[0].s;
    assert!(subject.is_blank());
    for t in graph.triples() {
        assert_eq!(&t.s, subject);
    }
    assert_eq!(graph.triples()[2].p, iri("http://e/r"));
}

#[test]
fn base_change_applies_per_statement() {
    let graph = parse(
        "@base <http://a/> . <x> <y> <z> . @base <http://b/> . <x> <y> <z> .",
    )
    .unwrap();

    assert_eq!(graph.triples()[0].s, iri("http://a/x"));
    assert_eq!(graph.triples()[1].s, iri("http://b/x"));
    assert_eq!(graph.base_url().map(|b| b.as_str()), Some("http://b/"));
}

#[test]
fn isomorphic_modulo_blank_names() {
    let g1 = parse("_:a <http://e/p> <http://e/o> .").unwrap();
    let g2 = parse("[] <http://e/p> <http://e/o> .").unwrap();

    assert!(isomorphic(&g1, &g2));
}

#[test]
fn isomorphism_is_reflexive() {
    let docs = [
        "",
        "@prefix ex: <http://e/> . ex:a ex:b ex:c .",
        "<http://e/s> <http://e/p> ( <http://e/a> <http://e/b> ) .",
        "[ <http://e/p> \"x\"@en ] <http://e/q> 3.14 .",
    ];

    for doc in docs {
        let g = parse(doc).unwrap();
        assert!(isomorphic(&g, &g), "not reflexive for: {doc}");
    }
}

#[test]
fn isomorphism_ignores_order_and_duplicates() {
    let g1 = parse(
        "<http://e/s> <http://e/p> <http://e/o1> . <http://e/s> <http://e/p> <http://e/o2> .",
    )
    .unwrap();

    // Reversed order, with duplicates
    let mut triples: Vec<Triple> = g1.triples().to_vec();
    triples.reverse();
    triples.push(triples[0].clone());
    triples.push(triples[1].clone());
    let g2 = TripleGraph::build(triples, None, PrefixMappings::new());

    assert!(isomorphic(&g1, &g2));
}

#[test]
fn isomorphism_distinguishes_different_graphs() {
    let g1 = parse("<http://e/s> <http://e/p> \"a\" .").unwrap();
    let g2 = parse("<http://e/s> <http://e/p> \"b\" .").unwrap();
    assert!(!isomorphic(&g1, &g2));
}

#[test]
fn equivalent_documents_with_different_sugar() {
    // Same graph written three ways
    let g1 = parse(
        "@prefix ex: <http://e/> . ex:s ex:p ex:o1 ; ex:p ex:o2 .",
    )
    .unwrap();
    let g2 = parse(
        "@prefix ex: <http://e/> . ex:s ex:p ex:o1 , ex:o2 .",
    )
    .unwrap();
    let g3 = parse(
        "<http://e/s> <http://e/p> <http://e/o2> . <http://e/s> <http://e/p> <http://e/o1> .",
    )
    .unwrap();

    assert!(isomorphic(&g1, &g2));
    assert!(isomorphic(&g2, &g3));
}

#[test]
fn prefix_map_round_trip() {
    let graph = parse(
        r#"
        @prefix ex: <http://e/> .
        @prefix : <http://default/> .
        @prefix foaf: <http://xmlns.com/foaf/0.1/> .
        ex:a foaf:knows :b .
    "#,
    )
    .unwrap();

    let mappings = graph.prefix_mappings();
    assert_eq!(mappings.len(), 3);
    assert_eq!(mappings.get("ex"), Some("http://e/"));
    assert_eq!(mappings.get(""), Some("http://default/"));
    assert_eq!(mappings.get("foaf"), Some("http://xmlns.com/foaf/0.1/"));
}

#[test]
fn redefined_prefix_latest_wins() {
    let graph = parse(
        r#"
        @prefix ex: <http://one/> .
        ex:a <http://e/p> ex:b .
        @prefix ex: <http://two/> .
        ex:a <http://e/p> ex:b .
    "#,
    )
    .unwrap();

    assert_eq!(graph.triples()[0].s, iri("http://one/a"));
    assert_eq!(graph.triples()[1].s, iri("http://two/a"));
    assert_eq!(graph.prefix_mappings().get("ex"), Some("http://two/"));
}

#[test]
fn typed_literal_canonicalisation() {
    let graph = parse("<http://e/s> <http://e/p> +007 , -0 , -042 .").unwrap();

    assert_eq!(graph.triples()[0].o, Term::typed("7", xsd::INTEGER));
    assert_eq!(graph.triples()[1].o, Term::typed("0", xsd::INTEGER));
    assert_eq!(graph.triples()[2].o, Term::typed("-42", xsd::INTEGER));
}

#[test]
fn long_string_literals() {
    let graph = parse(
        "<http://e/s> <http://e/p> \"\"\"line one\nline \"quoted\" two\"\"\" .",
    )
    .unwrap();

    assert_eq!(
        graph.triples()[0].o,
        Term::plain("line one\nline \"quoted\" two")
    );
}

#[test]
fn comments_and_whitespace_ignored() {
    let graph = parse(
        r#"
        # leading comment
        @prefix ex: <http://e/> . # trailing comment
        ex:a ex:b ex:c . # another
    "#,
    )
    .unwrap();

    assert_eq!(graph.triples().len(), 1);
}

#[test]
fn select_and_query_on_parsed_graph() {
    let graph = parse(
        r#"
        @prefix ex: <http://e/> .
        ex:alice a ex:Person ; ex:age 30 .
        ex:bob a ex:Person .
    "#,
    )
    .unwrap();

    let rdf_type = iri(rdf::TYPE);
    let persons = graph.query(None, Some(&rdf_type), Some(&iri("http://e/Person")));
    assert_eq!(persons.len(), 2);

    let literal_objects = graph.select(None, None, Some(&|o: &Term| o.is_literal()));
    assert_eq!(literal_objects.len(), 1);
    assert_eq!(literal_objects[0].o, Term::typed("30", xsd::INTEGER));

    let subjects = graph.subjects_with_predicate(&rdf_type);
    assert_eq!(subjects.len(), 2);

    assert!(graph.contains_node(&iri("http://e/alice")));
    assert!(!graph.contains_node(&iri("http://e/carol")));
}

#[test]
fn parse_file_driver() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "@prefix ex: <http://e/> .\nex:a ex:b ex:c ."
    )
    .unwrap();

    let parser = TurtleParser::default();
    let graph: TripleGraph = parser.parse_file(file.path()).unwrap();
    assert_eq!(graph.triples().len(), 1);
}

#[test]
fn parse_file_missing_is_io_error() {
    let parser = TurtleParser::default();
    let err = parser
        .parse_file::<TripleGraph>("/nonexistent/terrapin-test.ttl")
        .unwrap_err();
    assert!(matches!(err, TurtleError::Io(_)));
}

#[test]
fn negative_corpus_rejected() {
    let bad_docs = [
        // missing final dot
        "<http://e/s> <http://e/p> <http://e/o>",
        // literal in subject position
        "\"lit\" <http://e/p> <http://e/o> .",
        // literal in predicate position
        "<http://e/s> \"lit\" <http://e/o> .",
        // `a` in subject position
        "a <http://e/p> <http://e/o> .",
        // undefined prefix
        "ex:s <http://e/p> <http://e/o> .",
        // empty QName with no base and no default prefix
        ":s <http://e/p> <http://e/o> .",
        // unterminated string
        "<http://e/s> <http://e/p> \"open .",
        // unterminated URI reference
        "<http://e/s> <http://e/p> <http://e/o .",
        // unterminated blank property list
        "<http://e/s> <http://e/p> [ <http://e/q> <http://e/o> .",
        // unterminated collection
        "<http://e/s> <http://e/p> ( <http://e/a> .",
        // bad string escape
        r#"<http://e/s> <http://e/p> "bad\q" ."#,
        // SPARQL-style directive is not in the grammar
        "PREFIX ex: <http://e/>\nex:a ex:b ex:c .",
        // single-quoted strings are not in the grammar
        "<http://e/s> <http://e/p> 'hi' .",
        // directive missing its dot
        "@prefix ex: <http://e/> ex:a ex:b ex:c .",
        // object list trailing comma
        "<http://e/s> <http://e/p> <http://e/o> , .",
        // stray closing bracket
        "<http://e/s> <http://e/p> <http://e/o> ] .",
    ];

    for doc in bad_docs {
        assert!(parse(doc).is_err(), "should have been rejected: {doc}");
    }
}

#[test]
fn added_prefix_mappings_merge() {
    let graph = parse("@prefix ex: <http://e/> . ex:a ex:b ex:c .").unwrap();

    let mut extra = PrefixMappings::new();
    extra.insert("ex", "http://other/");
    extra.insert("new", "http://new/");

    let kept = graph.clone().add_prefix_mappings(&extra, false);
    assert_eq!(kept.prefix_mappings().get("ex"), Some("http://e/"));
    assert_eq!(kept.prefix_mappings().get("new"), Some("http://new/"));

    let replaced = graph.add_prefix_mappings(&extra, true);
    assert_eq!(replaced.prefix_mappings().get("ex"), Some("http://other/"));
}

#[test]
fn doc_url_used_for_hash_reference() {
    let parser = TurtleParser::new(
        Some(BaseUrl::new("http://base/")),
        Some(BaseUrl::new("http://doc/page")),
    );
    let graph: TripleGraph = parser
        .parse_string("<#> <http://e/p> <http://e/o> .")
        .unwrap();

    assert_eq!(graph.triples()[0].s, iri("http://doc/page#"));
}
