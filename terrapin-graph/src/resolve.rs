//! Prefix and URI resolution
//!
//! Resolution is purely textual: a reference that contains a `:` is taken
//! to be absolute, anything else is concatenated onto the base. This keeps
//! faith with the Turtle Team Submission era behaviour; it accepts
//! qname-shaped fragments like `a:b` as absolute without further checks.

use crate::{BaseUrl, PrefixMappings};

/// Error produced while resolving a QName
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// `:name` with no default-prefix binding and no base URL in scope
    #[error("cannot resolve empty QName: no default prefix binding and no base URL")]
    EmptyQName,

    /// Prefix used without a matching @prefix directive
    #[error("undefined prefix: {0}")]
    UndefinedPrefix(String),
}

/// Make a URI reference absolute against the base and document URLs
///
/// - A fragment containing `:` is returned unchanged (syntactic
///   absolute-URI test).
/// - A bare `#` prefers `docUrl`, then `baseUrl`, then stays as-is.
/// - Anything else is concatenated onto `baseUrl` when one exists;
///   without a base the relative text is preserved.
pub fn absolutise(base: Option<&BaseUrl>, doc: Option<&BaseUrl>, fragment: &str) -> String {
    if fragment.contains(':') {
        return fragment.to_string();
    }

    if fragment == "#" {
        if let Some(doc) = doc {
            return format!("{}{}", doc.as_str(), fragment);
        }
        if let Some(base) = base {
            return format!("{}{}", base.as_str(), fragment);
        }
        return fragment.to_string();
    }

    if let Some(base) = base {
        return format!("{}{}", base.as_str(), fragment);
    }
    fragment.to_string()
}

/// Resolve a QName prefix to its namespace IRI
///
/// The empty prefix resolves to the default-prefix binding when one exists,
/// else to the base URL; with neither in scope it is an error. A non-empty
/// prefix must have a binding.
pub fn resolve_qname(
    base: Option<&BaseUrl>,
    prefix: &str,
    mappings: &PrefixMappings,
) -> Result<String, ResolveError> {
    if prefix.is_empty() {
        if let Some(namespace) = mappings.get("") {
            return Ok(namespace.to_string());
        }
        if let Some(base) = base {
            return Ok(base.as_str().to_string());
        }
        return Err(ResolveError::EmptyQName);
    }

    mappings
        .get(prefix)
        .map(str::to_string)
        .ok_or_else(|| ResolveError::UndefinedPrefix(prefix.to_string()))
}
