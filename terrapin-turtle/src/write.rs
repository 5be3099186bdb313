//! Serializer helpers for IRI output.
//!
//! Serializer back-ends decide per IRI whether to emit a QName or an
//! angle-bracketed absolute IRI. The decision here is heuristic: an IRI is
//! written as-is when the text before its first `:` is a bound prefix.
//! A qname-shaped absolute IRI whose scheme happens to match no prefix is
//! correctly bracketed, but one whose scheme matches an unrelated prefix
//! would be miswritten; callers controlling the prefix map avoid this.

use std::fmt;

use terrapin_graph::PrefixMappings;

/// Split `iri` as `prefix:local` and resolve the prefix.
///
/// Returns the bound namespace IRI and the local part when the text before
/// the first `:` is a bound prefix, `None` otherwise.
pub fn find_mapping<'a>(
    mappings: &'a PrefixMappings,
    iri: &'a str,
) -> Option<(&'a str, &'a str)> {
    let (prefix, local) = iri.split_once(':')?;
    let namespace = mappings.get(prefix)?;
    Some((namespace, local))
}

/// Write an IRI as a QName when its prefix is bound, else as `<iri>`.
pub fn write_iri<W: fmt::Write>(
    sink: &mut W,
    iri: &str,
    mappings: &PrefixMappings,
) -> fmt::Result {
    if find_mapping(mappings, iri).is_some() {
        sink.write_str(iri)
    } else {
        write!(sink, "<{}>", iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> PrefixMappings {
        let mut m = PrefixMappings::new();
        m.insert("ex", "http://example.org/");
        m
    }

    #[test]
    fn test_find_mapping() {
        let m = mappings();

        assert_eq!(
            find_mapping(&m, "ex:alice"),
            Some(("http://example.org/", "alice"))
        );
        assert_eq!(find_mapping(&m, "missing:alice"), None);
        assert_eq!(find_mapping(&m, "no-colon"), None);
    }

    #[test]
    fn test_find_mapping_splits_on_first_colon() {
        let m = mappings();
        assert_eq!(
            find_mapping(&m, "ex:a:b"),
            Some(("http://example.org/", "a:b"))
        );
    }

    #[test]
    fn test_write_iri_qname() {
        let m = mappings();
        let mut out = String::new();
        write_iri(&mut out, "ex:alice", &m).unwrap();
        assert_eq!(out, "ex:alice");
    }

    #[test]
    fn test_write_iri_brackets_unknown() {
        let m = mappings();

        let mut out = String::new();
        write_iri(&mut out, "mailto:me@example.org", &m).unwrap();
        assert_eq!(out, "<mailto:me@example.org>");

        let mut out = String::new();
        write_iri(&mut out, "http://example.org/alice", &m).unwrap();
        // `http` is not a bound prefix, so the full form is bracketed
        assert_eq!(out, "<http://example.org/alice>");
    }
}
