//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of triples. A term can be:
//! - An IRI (always absolute, never prefixed)
//! - A blank node (source-labelled or parser-generated)
//! - A literal (plain, language-tagged, or typed)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use terrapin_vocab::xsd;

/// Blank node identifier
///
/// Blank node identity is scoped to the document/graph it came from.
/// `Named` carries a source label (without the `_:` prefix); `Gen` carries
/// the counter value assigned by a parser for anonymous nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlankId {
    /// Source-provided label, e.g. `_:b1` in Turtle
    Named(Arc<str>),
    /// Parser-generated identifier, strictly increasing within one parse
    Gen(u32),
}

impl BlankId {
    /// Create a blank node ID from a source label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn named(label: impl AsRef<str>) -> Self {
        BlankId::Named(Arc::from(label.as_ref()))
    }

    /// Create a generated blank node ID
    pub fn gen(id: u32) -> Self {
        BlankId::Gen(id)
    }
}

impl PartialOrd for BlankId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlankId {
    /// Named blank nodes sort before generated ones.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (BlankId::Named(a), BlankId::Named(b)) => a.cmp(b),
            (BlankId::Named(_), BlankId::Gen(_)) => Ordering::Less,
            (BlankId::Gen(_), BlankId::Named(_)) => Ordering::Greater,
            (BlankId::Gen(a), BlankId::Gen(b)) => a.cmp(b),
        }
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlankId::Named(label) => write!(f, "_:{}", label),
            BlankId::Gen(id) => write!(f, "_:genid{}", id),
        }
    }
}

/// RDF literal value
///
/// # Invariants
///
/// - `Typed` literals store the *canonical* lexical form for their datatype.
///   Construct them through [`Literal::typed`], which canonicalises
///   `xsd:integer` forms (`+007` becomes `7`, `-0` becomes `0`).
/// - Language tags are kept as written (no case folding).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Untyped literal with no language tag
    Plain(Arc<str>),
    /// Untyped literal with a language tag: (lexical form, language)
    PlainLang(Arc<str>, Arc<str>),
    /// Typed literal: (canonical lexical form, datatype IRI)
    Typed(Arc<str>, Arc<str>),
}

impl Literal {
    /// Create a plain literal
    pub fn plain(lex: impl AsRef<str>) -> Self {
        Literal::Plain(Arc::from(lex.as_ref()))
    }

    /// Create a language-tagged literal
    pub fn plain_lang(lex: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Literal::PlainLang(Arc::from(lex.as_ref()), Arc::from(lang.as_ref()))
    }

    /// Create a typed literal, canonicalising the lexical form
    ///
    /// For `xsd:integer` the lexical form is rewritten to its canonical
    /// shape: a leading `+` is dropped, leading zeros are stripped down to a
    /// single `0`, and `-0` becomes `0`. All other datatypes keep the
    /// lexical form as given (the Turtle grammar already produces canonical
    /// decimal/double/boolean forms).
    pub fn typed(lex: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        let datatype = datatype.as_ref();
        let lex = lex.as_ref();
        if datatype == xsd::INTEGER {
            Literal::Typed(Arc::from(canonical_integer(lex)), Arc::from(datatype))
        } else {
            Literal::Typed(Arc::from(lex), Arc::from(datatype))
        }
    }

    /// Get the lexical form
    pub fn lexical(&self) -> &str {
        match self {
            Literal::Plain(lex) => lex,
            Literal::PlainLang(lex, _) => lex,
            Literal::Typed(lex, _) => lex,
        }
    }

    /// Get the language tag, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Literal::PlainLang(_, lang) => Some(lang),
            Literal::Plain(_) | Literal::Typed(..) => None,
        }
    }

    /// Get the datatype IRI, if any
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Literal::Typed(_, datatype) => Some(datatype),
            Literal::Plain(_) | Literal::PlainLang(..) => None,
        }
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    /// Plain < PlainLang < Typed; within PlainLang the language is primary
    /// and the lexical form secondary, within Typed the lexical form is
    /// primary and the datatype secondary.
    ///
    /// Every case pair is written out; no wildcard arms.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Literal::Plain(a), Literal::Plain(b)) => a.cmp(b),
            (Literal::Plain(_), Literal::PlainLang(..)) => Ordering::Less,
            (Literal::Plain(_), Literal::Typed(..)) => Ordering::Less,
            (Literal::PlainLang(..), Literal::Plain(_)) => Ordering::Greater,
            (Literal::PlainLang(a_lex, a_lang), Literal::PlainLang(b_lex, b_lang)) => {
                (a_lang, a_lex).cmp(&(b_lang, b_lex))
            }
            (Literal::PlainLang(..), Literal::Typed(..)) => Ordering::Less,
            (Literal::Typed(..), Literal::Plain(_)) => Ordering::Greater,
            (Literal::Typed(..), Literal::PlainLang(..)) => Ordering::Greater,
            (Literal::Typed(a_lex, a_dt), Literal::Typed(b_lex, b_dt)) => {
                (a_lex, a_dt).cmp(&(b_lex, b_dt))
            }
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Plain(lex) => write!(f, "\"{}\"", lex),
            Literal::PlainLang(lex, lang) => write!(f, "\"{}\"@{}", lex, lang),
            Literal::Typed(lex, datatype) => write!(f, "\"{}\"^^<{}>", lex, datatype),
        }
    }
}

/// Canonical `xsd:integer` lexical form.
fn canonical_integer(lex: &str) -> String {
    let (negative, digits) = match lex.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lex.strip_prefix('+').unwrap_or(lex)),
    };
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else if negative {
        format!("-{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an absolute IRI, never a prefixed form.
///   The Turtle parser resolves every IRI before constructing a term.
/// - Terms are immutable after construction and cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Absolute IRI (e.g. "http://xmlns.com/foaf/0.1/name")
    Iri(Arc<str>),
    /// Blank node
    Blank(BlankId),
    /// Literal value
    Literal(Literal),
}

impl Term {
    /// Create an IRI term from an absolute IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a named blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(BlankId::named(label))
    }

    /// Create a generated blank node term
    pub fn blank_gen(id: u32) -> Self {
        Term::Blank(BlankId::Gen(id))
    }

    /// Create a plain literal term
    pub fn plain(lex: impl AsRef<str>) -> Self {
        Term::Literal(Literal::plain(lex))
    }

    /// Create a language-tagged literal term
    pub fn plain_lang(lex: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal(Literal::plain_lang(lex, lang))
    }

    /// Create a typed literal term (canonicalises the lexical form)
    pub fn typed(lex: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Term::Literal(Literal::typed(lex, datatype))
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::Blank(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get as literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    /// Total order: Iri < Blank(Named) < Blank(Gen) < Literal, with
    /// literals ordered Plain < PlainLang < Typed by [`Literal::cmp`].
    fn cmp(&self, other: &Self) -> Ordering {
        let type_ord = |t: &Term| -> u8 {
            match t {
                Term::Iri(_) => 0,
                Term::Blank(_) => 1,
                Term::Literal(_) => 2,
            }
        };

        match type_ord(self).cmp(&type_ord(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::Blank(a), Term::Blank(b)) => a.cmp(b),
            (Term::Literal(a), Term::Literal(b)) => a.cmp(b),
            _ => unreachable!("type rank already compared"),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(id) => write!(f, "{}", id),
            Term::Literal(lit) => write!(f, "{}", lit),
        }
    }
}
