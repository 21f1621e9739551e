//! The Turtle document parser and its public entry points.

mod grammar;

use crate::error::{syntax_error, Error, Result};
use crate::graph::Graph;
use crate::namespace::BaseUrl;
use grammar::ParserState;
use nom::Err as NomError;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

/// Parses Turtle documents into [`Graph`]s.
///
/// Constructed with an optional base URI and document URL, both consulted
/// when resolving relative IRIs in the parsed document (`@base`/`BASE`
/// directives, when present, override the constructor's base URI from that
/// point on).
#[derive(Debug, Clone, Default)]
pub struct TurtleParser {
    base_url: Option<BaseUrl>,
    doc_url: Option<String>,
}

impl TurtleParser {
    /// Builds a parser with the given starting base URI and document URL.
    /// Either may be `None`; purely relative IRIs with neither in effect
    /// are kept as-is (see [`crate::namespace::absolutise`]).
    pub fn new(base_url: Option<BaseUrl>, doc_url: Option<String>) -> TurtleParser {
        TurtleParser { base_url, doc_url }
    }

    /// A parser that resolves relative IRIs against `base_url` and has no
    /// separate document URL.
    pub fn with_base(base_url: impl Into<String>) -> TurtleParser {
        TurtleParser::new(Some(BaseUrl::new(base_url.into())), None)
    }

    /// Parses a Turtle document held in memory.
    pub fn parse_str(&self, input: &str) -> Result<Graph> {
        let ctx = RefCell::new(ParserState::new(self.base_url.clone(), self.doc_url.clone()));
        let outcome = grammar::turtle_doc(input, &ctx);

        match outcome {
            Ok((rest, _)) => {
                let state = ctx.into_inner();
                if !rest.trim_start().is_empty() {
                    let consumed = input.len() - rest.len();
                    return Err(syntax_error(consumed, rest, "unexpected trailing input"));
                }
                if !state.stacks_are_empty() {
                    return Err(syntax_error(
                        input.len(),
                        "",
                        "document ended with an unclosed subject or predicate scope",
                    ));
                }
                let triples = state
                    .triples
                    .into_iter()
                    .map(|(s, p, o)| crate::node::Triple::new(s, p, o))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Graph::build(triples, state.base_url, state.prefixes))
            }
            Err(NomError::Error((rest, _))) | Err(NomError::Failure((rest, _))) => {
                let state = ctx.into_inner();
                let consumed = input.len() - rest.len();
                Err(state
                    .last_error
                    .unwrap_or_else(|| syntax_error(consumed, rest, "unexpected input")))
            }
            Err(NomError::Incomplete(_)) => {
                Err(syntax_error(input.len(), "", "unexpected end of input"))
            }
        }
    }

    /// Reads and parses a Turtle document from `path`.
    ///
    /// If the parser has no explicit document URL set, `path`'s string
    /// form is used as the doc URL for resolving bare `<#>` fragments.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Graph> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)?;
        let mut parser = self.clone();
        if parser.doc_url.is_none() {
            parser.doc_url = Some(path.display().to_string());
        }
        parser.parse_str(&input)
    }

    /// Fetches and parses a Turtle document from `url`. Requires the `http`
    /// Cargo feature.
    #[cfg(feature = "http")]
    pub fn parse_url(&self, url: &str) -> Result<Graph> {
        let input = reqwest::blocking::get(url)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        let mut parser = self.clone();
        if parser.doc_url.is_none() {
            parser.doc_url = Some(url.to_owned());
        }
        parser.parse_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_document() {
        let graph = TurtleParser::new(None, None)
            .parse_str("<http://e/a> <http://e/p> <http://e/b> .")
            .unwrap();
        assert_eq!(graph.triples().len(), 1);
    }

    #[test]
    fn empty_document_yields_empty_graph() {
        let graph = TurtleParser::new(None, None).parse_str("   \n  # just a comment\n").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn trailing_garbage_is_a_syntax_error() {
        let err = TurtleParser::new(None, None)
            .parse_str("<http://e/a> <http://e/p> <http://e/b> . garbage")
            .unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn prefixes_survive_into_the_built_graph() {
        let graph = TurtleParser::new(None, None)
            .parse_str("@prefix ex: <http://e/> .\nex:a ex:p ex:b .")
            .unwrap();
        assert_eq!(graph.prefix_mappings().get("ex"), Some("http://e/"));
    }

    #[test]
    fn base_constructor_resolves_relative_iris() {
        let graph = TurtleParser::with_base("http://e/")
            .parse_str("<a> <p> <b> .")
            .unwrap();
        let t = &graph.triples()[0];
        assert_eq!(t.subject, crate::node::Node::Iri("http://e/a".into()));
    }

    #[test]
    fn unbound_prefix_is_reported_as_resolution_error() {
        let err = TurtleParser::new(None, None).parse_str("ex:a ex:p ex:b .").unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }
}
