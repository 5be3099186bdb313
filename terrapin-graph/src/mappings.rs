//! Prefix mappings and base URL
//!
//! `PrefixMappings` keeps prefix-to-namespace bindings in a `BTreeMap` so
//! iteration order is deterministic. `BaseUrl` wraps the absolute IRI a
//! document's relative references resolve against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Prefix-to-namespace bindings
///
/// Keys are prefix names without the trailing colon; the default (empty)
/// prefix uses the empty string. Values are absolute namespace IRIs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMappings(BTreeMap<String, String>);

impl PrefixMappings {
    /// Create an empty mapping set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `namespace`, replacing any existing binding
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.0.insert(prefix.into(), namespace.into());
    }

    /// Look up the namespace bound to `prefix`
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    /// Check whether `prefix` is bound
    pub fn contains(&self, prefix: &str) -> bool {
        self.0.contains_key(prefix)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no bindings
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (prefix, namespace) pairs in prefix order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `extra` into this mapping set
    ///
    /// When `overwrite` is true, bindings from `extra` win on key collision;
    /// otherwise existing bindings are kept.
    pub fn merge(&mut self, extra: &PrefixMappings, overwrite: bool) {
        for (prefix, namespace) in extra.iter() {
            if overwrite {
                self.0.insert(prefix.to_string(), namespace.to_string());
            } else {
                self.0
                    .entry(prefix.to_string())
                    .or_insert_with(|| namespace.to_string());
            }
        }
    }
}

impl FromIterator<(String, String)> for PrefixMappings {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PrefixMappings {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Base URL for relative IRI resolution
///
/// Holds absolute IRI text; the Turtle parser only ever constructs one from
/// an already-resolved IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseUrl(Arc<str>);

impl BaseUrl {
    /// Wrap an absolute IRI
    pub fn new(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    /// Get the IRI text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
