//! Turtle (TTL) parser for Terrapin.
//!
//! This crate parses Turtle documents into any [`Graph`] implementation,
//! resolving relative references against a base URL, expanding prefixed
//! names, and materialising blank nodes.
//!
//! # Example
//!
//! ```
//! use terrapin_graph::{Graph, TripleGraph};
//! use terrapin_turtle::parse;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let graph: TripleGraph = parse(turtle).unwrap();
//! assert_eq!(graph.triples().len(), 2);
//! assert_eq!(graph.prefix_mappings().get("ex"), Some("http://example.org/"));
//! ```

pub mod error;
pub mod lex;
pub mod parser;
pub mod write;

pub use error::{Result, TurtleError};
pub use lex::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse_document, ParseOutput};
pub use write::{find_mapping, write_iri};

use std::path::Path;

use terrapin_graph::{BaseUrl, Graph, TripleGraph};

/// Turtle parser facade.
///
/// Stateless apart from its constructor arguments: the base URL used for
/// relative reference resolution (until the document's first `@base`), and
/// the document URL used for bare `#` references.
#[derive(Clone, Debug, Default)]
pub struct TurtleParser {
    base_url: Option<BaseUrl>,
    doc_url: Option<BaseUrl>,
}

impl TurtleParser {
    /// Create a parser with optional base and document URLs.
    pub fn new(base_url: Option<BaseUrl>, doc_url: Option<BaseUrl>) -> Self {
        Self { base_url, doc_url }
    }

    /// Parse a Turtle document from a string.
    pub fn parse_string<G: Graph>(&self, text: &str) -> Result<G> {
        let output = parse_document(text, self.base_url.clone(), self.doc_url.clone())?;
        Ok(G::build(output.triples, output.base, output.mappings))
    }

    /// Parse a Turtle document from a file.
    pub fn parse_file<G: Graph>(&self, path: impl AsRef<Path>) -> Result<G> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "parsing turtle file");
        let text = std::fs::read_to_string(path)?;
        self.parse_string(&text)
    }

    /// Parse a Turtle document retrieved over HTTP.
    ///
    /// Only `http://` URLs are supported.
    pub fn parse_url<G: Graph>(&self, url: &str) -> Result<G> {
        if !url.starts_with("http://") {
            return Err(TurtleError::Http(format!(
                "only http:// URLs are supported, got: {}",
                url
            )));
        }

        tracing::debug!(url, "retrieving turtle document");
        let text = reqwest::blocking::Client::new()
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| TurtleError::Http(e.to_string()))?;

        self.parse_string(&text)
    }
}

/// Parse a Turtle document into a [`TripleGraph`] with no base or document
/// URL.
pub fn parse(input: &str) -> Result<TripleGraph> {
    TurtleParser::default().parse_string(input)
}
