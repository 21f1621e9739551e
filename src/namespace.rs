//! Prefix mappings and base-URI resolution.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::collections::hash_map::Iter;
use std::fmt;

/// The `rdf:` namespace vocabulary used by the parser (list desugaring,
/// `a` as `rdf:type`).
pub mod rdf {
    /// `rdf:` namespace IRI.
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// `rdf:type`
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// The `xsd:` namespace vocabulary used by literal canonicalisation.
pub mod xsd {
    /// `xsd:` namespace IRI.
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `xsd:integer`
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:decimal`
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    /// `xsd:double`
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    /// `xsd:boolean`
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
}

/// The base URI against which relative IRIs in a document are resolved.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Wraps an absolute IRI text as a base URI.
    pub fn new(iri: impl Into<String>) -> BaseUrl {
        BaseUrl(iri.into())
    }

    /// The wrapped IRI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mapping from prefix (possibly empty) to absolute IRI text.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PrefixMappings {
    mappings: HashMap<String, String>,
}

impl PrefixMappings {
    /// An empty prefix map.
    pub fn new() -> PrefixMappings {
        PrefixMappings {
            mappings: HashMap::new(),
        }
    }

    /// Binds `prefix` to `iri`, overwriting any existing binding.
    pub fn insert(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.mappings.insert(prefix.into(), iri.into());
    }

    /// Looks up the IRI bound to `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.mappings.get(prefix).map(String::as_str)
    }

    /// `true` if no prefix is bound.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// The number of bound prefixes.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Iterates over `(prefix, iri)` pairs. Order is not significant.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.mappings.iter()
    }

    /// Merges `extra` into `self`. When a prefix exists in both maps,
    /// `overwrite` decides the winner: `true` makes `extra` win, `false`
    /// keeps the existing binding.
    pub fn merge(&mut self, extra: &PrefixMappings, overwrite: bool) {
        for (prefix, iri) in extra.iter() {
            if overwrite || !self.mappings.contains_key(prefix) {
                self.mappings.insert(prefix.clone(), iri.clone());
            }
        }
    }
}

/// A crude syntactic test for "is this text already an absolute URI
/// reference": does it contain a `:` anywhere. This misclassifies e.g.
/// `a:b` as absolute and is a known, intentionally preserved limitation
/// (see the crate's design notes).
fn looks_absolute(text: &str) -> bool {
    text.contains(':')
}

/// Resolves `fragment` against `base_url`/`doc_url` per the spec's
/// `absolutise` rules.
///
/// - If `fragment` already looks absolute (contains `:`), it is returned
///   unchanged.
/// - If `fragment` is exactly `"#"`, prefer `doc_url ++ "#"`, else
///   `base_url ++ "#"`, else `"#"` itself.
/// - Otherwise prefer `base_url ++ fragment`; with no base but a `doc_url`,
///   the relative text is returned as-is; with neither, it is also returned
///   as-is.
pub fn absolutise(base_url: Option<&BaseUrl>, doc_url: Option<&str>, fragment: &str) -> String {
    if looks_absolute(fragment) {
        return fragment.to_owned();
    }
    if fragment == "#" {
        return match (doc_url, base_url) {
            (Some(doc), _) => format!("{}{}", doc, fragment),
            (None, Some(base)) => format!("{}{}", base, fragment),
            (None, None) => fragment.to_owned(),
        };
    }
    match (base_url, doc_url) {
        (Some(base), _) => format!("{}{}", base, fragment),
        (None, Some(_)) => fragment.to_owned(),
        (None, None) => fragment.to_owned(),
    }
}

/// Resolves a QName's prefix against `prefix_mappings`, falling back to
/// `base_url` for the empty prefix per the spec's `resolveQName` rules.
pub fn resolve_qname(
    base_url: Option<&BaseUrl>,
    prefix: &str,
    prefix_mappings: &PrefixMappings,
) -> Result<String> {
    if prefix.is_empty() {
        if let Some(iri) = prefix_mappings.get("") {
            return Ok(iri.to_owned());
        }
        if let Some(base) = base_url {
            return Ok(base.as_str().to_owned());
        }
        return Err(Error::Resolution("cannot resolve empty QName".into()));
    }
    prefix_mappings
        .get(prefix)
        .map(str::to_owned)
        .ok_or_else(|| Error::Resolution(format!("unbound prefix: {}", prefix)))
}

/// Splits `iri` of the form `prefix:local` on its first `:` and resolves
/// `prefix` against `prefixes`, literally, as a bound prefix key. Returns
/// `(prefix, local)` on success.
///
/// This is a syntactic heuristic, not a real QName-vs-absolute-IRI
/// distinction: it is only ever correct when nothing is bound under the
/// scheme name an absolute IRI happens to start with (`http`, `urn`, ...).
/// It will misclassify a qname-shaped absolute IRI (e.g. `mailto:me@x`)
/// whose scheme-looking prefix happens to be bound, and it never checks
/// that `local` is a valid `PN_LOCAL`; both are known, intentionally
/// preserved limitations (see the crate's design notes).
pub fn find_mapping<'a>(prefixes: &PrefixMappings, iri: &'a str) -> Option<(&'a str, &'a str)> {
    let colon = iri.find(':')?;
    let (prefix, rest) = iri.split_at(colon);
    let local = &rest[1..];
    prefixes.get(prefix)?;
    Some((prefix, local))
}

/// Writes `iri` to `sink`: if [`find_mapping`] succeeds, `iri` is already a
/// syntactically valid qname and is written as-is; otherwise it is written
/// as `<iri>`.
pub fn write_iri(
    sink: &mut impl std::io::Write,
    iri: &str,
    prefixes: &PrefixMappings,
) -> std::io::Result<()> {
    match find_mapping(prefixes, iri) {
        Some(_) => write!(sink, "{}", iri),
        None => write!(sink, "<{}>", iri),
    }
}
