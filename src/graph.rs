//! The RDF graph value and its operations.

use crate::namespace::{BaseUrl, PrefixMappings};
use crate::node::{Node, Triple};

/// A pattern selector over a [`Node`]: `None` matches anything, `Some`
/// matches only nodes for which the predicate returns `true`.
pub type Selector<'a> = Option<&'a dyn Fn(&Node) -> bool>;

/// A concrete RDF graph: an immutable sequence of triples plus the prefix
/// mappings and base URI in effect when it was built.
///
/// This is the minimal backend the parser and isomorphism check actually
/// need (spec.md §9 names it as the simplest sufficient implementation);
/// indexed backends are an external concern.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    base_url: Option<BaseUrl>,
    prefix_mappings: PrefixMappings,
}

impl Graph {
    /// An empty graph with no base URI and no prefixes.
    pub fn empty() -> Graph {
        Graph::default()
    }

    /// Builds a graph from a triple sequence, an optional base URI, and a
    /// prefix map. Triples are kept in the order given; duplicates are not
    /// removed.
    pub fn build(
        triples: Vec<Triple>,
        base_url: Option<BaseUrl>,
        prefix_mappings: PrefixMappings,
    ) -> Graph {
        Graph {
            triples,
            base_url,
            prefix_mappings,
        }
    }

    /// All triples, in the order they were added.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// `true` if the graph holds no triples.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// The graph's base URI, if any.
    pub fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// The graph's prefix mappings.
    pub fn prefix_mappings(&self) -> &PrefixMappings {
        &self.prefix_mappings
    }

    /// Merges `extra` into the graph's prefix mappings.
    pub fn add_prefix_mappings(&self, extra: &PrefixMappings, overwrite: bool) -> Graph {
        let mut merged = self.prefix_mappings.clone();
        merged.merge(extra, overwrite);
        Graph {
            triples: self.triples.clone(),
            base_url: self.base_url.clone(),
            prefix_mappings: merged,
        }
    }

    /// Selects triples by predicate over each position; `None` means
    /// "always match" for that position.
    pub fn select<'a>(
        &'a self,
        subject: Selector<'a>,
        predicate: Selector<'a>,
        object: Selector<'a>,
    ) -> Vec<&'a Triple> {
        self.triples
            .iter()
            .filter(|t| {
                subject.map_or(true, |f| f(&t.subject))
                    && predicate.map_or(true, |f| f(&t.predicate))
                    && object.map_or(true, |f| f(&t.object))
            })
            .collect()
    }

    /// Selects triples by exact node match; `None` means "always match"
    /// for that position.
    pub fn query<'a>(
        &'a self,
        subject: Option<&Node>,
        predicate: Option<&Node>,
        object: Option<&Node>,
    ) -> Vec<&'a Triple> {
        self.triples
            .iter()
            .filter(|t| {
                subject.map_or(true, |s| &t.subject == s)
                    && predicate.map_or(true, |p| &t.predicate == p)
                    && object.map_or(true, |o| &t.object == o)
            })
            .collect()
    }

    /// `true` if any triple mentions `node` in any position.
    pub fn contains_node(&self, node: &Node) -> bool {
        self.triples
            .iter()
            .any(|t| &t.subject == node || &t.predicate == node || &t.object == node)
    }

    /// All distinct subjects paired with `predicate`.
    pub fn subjects_with_predicate(&self, predicate: &Node) -> Vec<&Node> {
        self.query(None, Some(predicate), None)
            .into_iter()
            .map(|t| &t.subject)
            .collect()
    }

    /// All distinct objects paired with `predicate`.
    pub fn objects_of_predicate(&self, predicate: &Node) -> Vec<&Node> {
        self.query(None, Some(predicate), None)
            .into_iter()
            .map(|t| &t.object)
            .collect()
    }

    /// Normalises the graph's triples for isomorphism comparison: sorted
    /// and deduplicated. This is the extension point the spec calls
    /// `expand` — today the identity, since the parser's post-condition is
    /// that every IRI it emits is already absolute.
    fn normalised(&self) -> Vec<Triple> {
        let mut triples = self.triples.clone();
        triples.sort();
        triples.dedup();
        triples
    }

    /// `true` if `self` and `other` have the same sorted, deduplicated
    /// triple sequence.
    ///
    /// This is *not* full blank-node graph isomorphism (that problem is
    /// NP-hard in general). It is the simpler heuristic the spec
    /// prescribes: sufficient as long as blank-node identifiers are
    /// compared directly, i.e. a caller wanting to compare graphs that
    /// differ only in blank-node naming must first normalise blank-node
    /// identifiers consistently (see the crate's isomorphism tests for the
    /// `BlankGen(i)` <-> `BlankNamed("_:genid" + i)` convention).
    pub fn is_isomorphic_to(&self, other: &Graph) -> bool {
        self.normalised() == other.normalised()
    }
}
