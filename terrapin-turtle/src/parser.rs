//! Turtle parser.
//!
//! Recursive descent over the token stream, carrying explicit subject,
//! predicate, and collection stacks. Nested constructs push on entry and
//! pop on exit; every object emission reads the stack tops, so the emitted
//! triple sequence follows document order exactly.

use rustc_hash::FxHashMap;

use terrapin_graph::resolve::{absolutise, resolve_qname, ResolveError};
use terrapin_graph::{BaseUrl, PrefixMappings, Term, Triple};
use terrapin_vocab::{rdf, xsd};

use crate::error::{Result, TurtleError};
use crate::lex::{tokenize, Token, TokenKind};

/// Output of a successful parse: the triples in source order, the final
/// base URL, and the collected prefix mappings.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    /// Emitted triples, in document order, duplicates preserved
    pub triples: Vec<Triple>,
    /// The base in effect at end of input (last @base, else the one the
    /// parser was constructed with)
    pub base: Option<BaseUrl>,
    /// One binding per @prefix directive, later directives win
    pub mappings: PrefixMappings,
}

/// Turtle parser state.
pub struct Parser {
    /// All tokens (batch-lexed).
    tokens: Vec<Token>,
    /// Current position in the token stream.
    pos: usize,
    /// Base URL for reference resolution (updated by @base)
    base: Option<BaseUrl>,
    /// Document URL, used only for bare `#` references
    doc: Option<BaseUrl>,
    /// Counter for generated blank nodes, strictly increasing
    next_blank: u32,
    /// Prefix mappings collected from @prefix directives
    mappings: PrefixMappings,
    /// Subject stack: pushed on entry to a nested subject scope
    subjects: Vec<Term>,
    /// Predicate stack: pushed per predicate-object group
    predicates: Vec<Term>,
    /// Collection stack: non-empty means inside `( ... )`; the top flag is
    /// true until the innermost collection's first element is processed
    collections: Vec<bool>,
    /// Emitted triples, append-only
    triples: Vec<Triple>,
    /// Interned named blank nodes, so repeated `_:x` share one term
    named_blanks: FxHashMap<String, Term>,
}

impl Parser {
    /// Create a parser for the given input.
    pub fn new(input: &str, base: Option<BaseUrl>, doc: Option<BaseUrl>) -> Result<Self> {
        let tokens = tokenize(input)?;
        Ok(Self {
            tokens,
            pos: 0,
            base,
            doc,
            next_blank: 0,
            mappings: PrefixMappings::new(),
            subjects: Vec::new(),
            predicates: Vec::new(),
            collections: Vec::new(),
            triples: Vec::new(),
            named_blanks: FxHashMap::default(),
        })
    }

    /// Parse the entire document.
    pub fn parse(mut self) -> Result<ParseOutput> {
        let span = tracing::info_span!(
            "turtle_parse",
            statement_count = tracing::field::Empty,
            triple_count = tracing::field::Empty,
            blank_nodes_generated = tracing::field::Empty,
        );
        let _g = span.enter();

        let mut statement_count: u64 = 0;
        while !self.is_at_end() {
            self.parse_statement()?;
            statement_count += 1;
        }

        if !self.subjects.is_empty() || !self.predicates.is_empty() || !self.collections.is_empty()
        {
            return Err(TurtleError::parse(
                self.current().start,
                "unbalanced nesting at end of input",
            ));
        }

        span.record("statement_count", statement_count);
        span.record("triple_count", self.triples.len() as u64);
        span.record("blank_nodes_generated", self.next_blank as u64);

        Ok(ParseOutput {
            triples: self.triples,
            base: self.base,
            mappings: self.mappings,
        })
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    /// Check if we're at the end of input.
    fn is_at_end(&self) -> bool {
        matches!(self.tokens[self.pos].kind, TokenKind::Eof)
    }

    /// Get the current token.
    #[inline]
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Advance to the next token.
    #[inline]
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Check if the current token matches the expected kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.tokens[self.pos].kind) == std::mem::discriminant(kind)
    }

    /// Consume a token of the expected kind, or return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(TurtleError::parse(
                self.current().start,
                format!("expected {}, found {}", kind, self.current().kind),
            ))
        }
    }

    fn err_here(&self, message: impl Into<String>) -> TurtleError {
        TurtleError::parse(self.current().start, message)
    }

    // =========================================================================
    // Stack and emission helpers
    // =========================================================================

    /// Emit a triple from the stack tops and the given object.
    fn emit_object(&mut self, object: Term) {
        let subject = self
            .subjects
            .last()
            .expect("subject stack underflow (parser bug)")
            .clone();
        let predicate = self
            .predicates
            .last()
            .expect("predicate stack underflow (parser bug)")
            .clone();
        self.triples.push(Triple::new(subject, predicate, object));
    }

    fn pop_subject(&mut self) {
        self.subjects
            .pop()
            .expect("subject stack underflow (parser bug)");
    }

    fn pop_predicate(&mut self) {
        self.predicates
            .pop()
            .expect("predicate stack underflow (parser bug)");
    }

    /// Generate a fresh blank node.
    fn fresh_blank(&mut self) -> Term {
        self.next_blank += 1;
        Term::blank_gen(self.next_blank)
    }

    /// Look up or intern a named blank node.
    fn named_blank(&mut self, label: &str) -> Term {
        if let Some(term) = self.named_blanks.get(label) {
            return term.clone();
        }
        let term = Term::blank(label);
        self.named_blanks.insert(label.to_string(), term.clone());
        term
    }

    /// Resolve a URI reference against the current base.
    fn resolve_uriref(&self, content: &str) -> String {
        absolutise(self.base.as_ref(), self.doc.as_ref(), content)
    }

    /// Expand a QName to a full IRI.
    fn expand_qname(&self, prefix: &str, local: &str) -> Result<String> {
        let namespace =
            resolve_qname(self.base.as_ref(), prefix, &self.mappings).map_err(|e| match e {
                ResolveError::UndefinedPrefix(p) => TurtleError::UndefinedPrefix(p),
                other => TurtleError::Resolution(other.to_string()),
            })?;
        Ok(format!("{}{}", namespace, local))
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse a single statement (directive or triples).
    fn parse_statement(&mut self) -> Result<()> {
        match self.current().kind {
            TokenKind::KwPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase => self.parse_base_directive(),
            TokenKind::Eof => Ok(()),
            _ => self.parse_triples(),
        }
    }

    /// Parse an @prefix directive.
    fn parse_prefix_directive(&mut self) -> Result<()> {
        self.advance(); // consume @prefix

        let prefix = match self.current().kind.clone() {
            TokenKind::PrefixedNameNs(prefix) => prefix.to_string(),
            _ => return Err(self.err_here("expected prefix name ending in ':'")),
        };
        self.advance();

        let namespace = match self.current().kind.clone() {
            TokenKind::Iri(iri) => self.resolve_uriref(&iri),
            _ => return Err(self.err_here("expected URI reference for prefix namespace")),
        };
        self.advance();

        self.mappings.insert(prefix, namespace);
        self.expect(&TokenKind::Dot)
    }

    /// Parse an @base directive.
    fn parse_base_directive(&mut self) -> Result<()> {
        self.advance(); // consume @base

        let base = match self.current().kind.clone() {
            TokenKind::Iri(iri) => self.resolve_uriref(&iri),
            _ => return Err(self.err_here("expected URI reference for base")),
        };
        self.advance();

        self.base = Some(BaseUrl::new(base));
        self.expect(&TokenKind::Dot)
    }

    /// Parse a triples statement.
    fn parse_triples(&mut self) -> Result<()> {
        let subject = self.parse_subject()?;
        self.subjects.push(subject);
        self.parse_predicate_object_list()?;
        self.pop_subject();
        self.expect(&TokenKind::Dot)
    }

    /// Parse a subject term.
    ///
    /// A `[ ... ]` subject parses its own predicate-object list first; the
    /// returned blank node then serves as subject for the outer list too.
    fn parse_subject(&mut self) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance();
                Ok(Term::iri(self.resolve_uriref(&iri)))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance();
                Ok(Term::iri(self.expand_qname(&prefix, &local)?))
            }
            TokenKind::PrefixedNameNs(prefix) => {
                self.advance();
                Ok(Term::iri(self.expand_qname(&prefix, "")?))
            }
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.named_blank(&label))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.fresh_blank())
            }
            TokenKind::LBracket => {
                self.advance();
                let node = self.fresh_blank();
                self.subjects.push(node.clone());
                self.parse_predicate_object_list()?;
                self.expect(&TokenKind::RBracket)?;
                self.pop_subject();
                Ok(node)
            }
            other => Err(self.err_here(format!("expected subject, found {}", other))),
        }
    }

    /// Parse a predicate-object list: `verb objects (';' verb objects)* ';'?`
    fn parse_predicate_object_list(&mut self) -> Result<()> {
        loop {
            let predicate = self.parse_verb()?;
            self.predicates.push(predicate);
            self.parse_object_list()?;
            self.pop_predicate();

            if matches!(self.current().kind, TokenKind::Semicolon) {
                self.advance();
                // Trailing semicolon before the closing delimiter
                if matches!(
                    self.current().kind,
                    TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
                ) {
                    break;
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Parse a verb: a predicate IRI or the `a` keyword.
    fn parse_verb(&mut self) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::KwA => {
                self.advance();
                Ok(Term::iri(rdf::TYPE))
            }
            TokenKind::Iri(iri) => {
                self.advance();
                Ok(Term::iri(self.resolve_uriref(&iri)))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance();
                Ok(Term::iri(self.expand_qname(&prefix, &local)?))
            }
            TokenKind::PrefixedNameNs(prefix) => {
                self.advance();
                Ok(Term::iri(self.expand_qname(&prefix, "")?))
            }
            other => Err(self.err_here(format!("expected predicate, found {}", other))),
        }
    }

    /// Parse an object list (comma-separated objects).
    fn parse_object_list(&mut self) -> Result<()> {
        loop {
            self.parse_object()?;

            if matches!(self.current().kind, TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Parse one object and emit its triple(s).
    fn parse_object(&mut self) -> Result<()> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance();
                let term = Term::iri(self.resolve_uriref(&iri));
                self.emit_object(term);
                Ok(())
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance();
                let term = Term::iri(self.expand_qname(&prefix, &local)?);
                self.emit_object(term);
                Ok(())
            }
            TokenKind::PrefixedNameNs(prefix) => {
                self.advance();
                let term = Term::iri(self.expand_qname(&prefix, "")?);
                self.emit_object(term);
                Ok(())
            }
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                let term = self.named_blank(&label);
                self.emit_object(term);
                Ok(())
            }
            TokenKind::Anon => {
                self.advance();
                let term = self.fresh_blank();
                self.emit_object(term);
                Ok(())
            }
            TokenKind::LBracket => {
                self.advance();
                let node = self.fresh_blank();
                self.emit_object(node.clone());
                self.subjects.push(node);
                self.parse_predicate_object_list()?;
                self.expect(&TokenKind::RBracket)?;
                self.pop_subject();
                Ok(())
            }
            TokenKind::LParen => self.parse_collection(),
            TokenKind::String(lex) => {
                self.advance();
                let term = self.parse_literal_suffix(&lex)?;
                self.emit_object(term);
                Ok(())
            }
            TokenKind::Integer(text) => {
                self.advance();
                self.emit_object(Term::typed(&text, xsd::INTEGER));
                Ok(())
            }
            TokenKind::Double(text) => {
                self.advance();
                self.emit_object(Term::typed(&text, xsd::DOUBLE));
                Ok(())
            }
            TokenKind::Decimal(text) => {
                self.advance();
                self.emit_object(Term::typed(&text, xsd::DECIMAL));
                Ok(())
            }
            TokenKind::KwTrue => {
                self.advance();
                self.emit_object(Term::typed("true", xsd::BOOLEAN));
                Ok(())
            }
            TokenKind::KwFalse => {
                self.advance();
                self.emit_object(Term::typed("false", xsd::BOOLEAN));
                Ok(())
            }
            other => Err(self.err_here(format!("expected object, found {}", other))),
        }
    }

    /// Handle the optional `@lang` or `^^datatype` suffix after a string.
    fn parse_literal_suffix(&mut self, lex: &str) -> Result<Term> {
        match self.current().kind.clone() {
            TokenKind::LangTag(lang) => {
                self.advance();
                Ok(Term::plain_lang(lex, &lang))
            }
            TokenKind::DoubleCaret => {
                self.advance();
                let datatype = self.parse_datatype_iri()?;
                Ok(Term::typed(lex, &datatype))
            }
            _ => Ok(Term::plain(lex)),
        }
    }

    /// Parse a datatype IRI after `^^`.
    fn parse_datatype_iri(&mut self) -> Result<String> {
        match self.current().kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance();
                Ok(self.resolve_uriref(&iri))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance();
                self.expand_qname(&prefix, &local)
            }
            TokenKind::PrefixedNameNs(prefix) => {
                self.advance();
                self.expand_qname(&prefix, "")
            }
            other => Err(self.err_here(format!("expected datatype IRI, found {}", other))),
        }
    }

    /// Parse a collection: `( object* )`
    ///
    /// Desugars to an rdf:first/rdf:rest chain of generated blank nodes
    /// terminated by rdf:nil; `( )` is rdf:nil itself. The flag on the
    /// collection stack distinguishes the first element (which links the
    /// chain head to the outer subject and predicate) from the rest (which
    /// link to the previous node via rdf:rest).
    fn parse_collection(&mut self) -> Result<()> {
        self.expect(&TokenKind::LParen)?;
        self.collections.push(true);

        while !self.check(&TokenKind::RParen) {
            if self.is_at_end() {
                return Err(self.err_here("unterminated collection"));
            }

            let node = self.fresh_blank();
            let first = *self
                .collections
                .last()
                .expect("collection stack underflow (parser bug)");

            if first {
                self.emit_object(node.clone());
                self.subjects.push(node);
                self.predicates.push(Term::iri(rdf::FIRST));
                *self
                    .collections
                    .last_mut()
                    .expect("collection stack underflow (parser bug)") = false;
            } else {
                self.predicates.push(Term::iri(rdf::REST));
                self.emit_object(node.clone());
                self.pop_predicate();
                self.pop_subject();
                self.subjects.push(node);
            }

            self.parse_object()?;
        }

        self.expect(&TokenKind::RParen)?;

        let empty = self
            .collections
            .pop()
            .expect("collection stack underflow (parser bug)");
        if empty {
            self.emit_object(Term::iri(rdf::NIL));
        } else {
            self.pop_predicate(); // rdf:first
            self.predicates.push(Term::iri(rdf::REST));
            self.emit_object(Term::iri(rdf::NIL));
            self.pop_predicate();
            self.pop_subject();
        }

        Ok(())
    }
}

/// Parse a Turtle document into triples, base, and prefix mappings.
pub fn parse_document(
    input: &str,
    base: Option<BaseUrl>,
    doc: Option<BaseUrl>,
) -> Result<ParseOutput> {
    Parser::new(input, base, doc)?.parse()
}
