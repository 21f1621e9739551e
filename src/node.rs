//! The `Node`/`LValue`/`Triple` value types and their total order.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// A literal value: untyped, language-tagged, or typed.
///
/// `Typed`'s lexical form is always the *canonical* lexical form for its
/// datatype (see [`typed_literal`]); the other two variants carry the
/// lexical form exactly as it appeared in the source.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum LValue {
    /// Untyped, no language: `"lex"`.
    Plain(String),
    /// Untyped with a language tag: `"lex"@lang`.
    PlainLang(String, String),
    /// Typed: `"lex"^^datatype`. `lex` is canonicalised for the datatype.
    Typed(String, String),
}

impl LValue {
    fn rank(&self) -> u8 {
        match self {
            LValue::Plain(_) => 0,
            LValue::PlainLang(_, _) => 1,
            LValue::Typed(_, _) => 2,
        }
    }
}

impl PartialOrd for LValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LValue::Plain(a), LValue::Plain(b)) => a.cmp(b),
            (LValue::PlainLang(lex_a, lang_a), LValue::PlainLang(lex_b, lang_b)) => {
                lang_a.cmp(lang_b).then_with(|| lex_a.cmp(lex_b))
            }
            (LValue::Typed(lex_a, dt_a), LValue::Typed(lex_b, dt_b)) => {
                lex_a.cmp(lex_b).then_with(|| dt_a.cmp(dt_b))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LValue::Plain(lex) => write!(f, "\"{}\"", lex),
            LValue::PlainLang(lex, lang) => write!(f, "\"{}\"@{}", lex, lang),
            LValue::Typed(lex, dt) => write!(f, "\"{}\"^^<{}>", lex, dt),
        }
    }
}

/// The XSD integer datatype IRI, used by [`typed_literal`]'s canonicalisation.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
/// The XSD decimal datatype IRI.
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
/// The XSD double datatype IRI.
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
/// The XSD boolean datatype IRI.
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// Builds a [`LValue::Typed`], canonicalising `lex` for `datatype` per the
/// rules in the spec: `xsd:integer` strips a leading `+`, strips leading
/// zeros (keeping a single `0`), and normalizes `-0` to `0`. All other
/// datatypes, including `xsd:decimal`/`xsd:double`/`xsd:boolean`, are taken
/// as-is — the grammar only ever hands this function lexemes already in
/// canonical form for those.
pub fn typed_literal(datatype: impl Into<String>, lex: &str) -> LValue {
    let datatype = datatype.into();
    let canonical = if datatype == XSD_INTEGER {
        canonicalise_integer(lex)
    } else {
        lex.to_owned()
    };
    LValue::Typed(canonical, datatype)
}

fn canonicalise_integer(lex: &str) -> String {
    let (neg, digits) = match lex.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lex.strip_prefix('+').unwrap_or(lex)),
    };
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    if neg && trimmed != "0" {
        format!("-{}", trimmed)
    } else {
        trimmed.to_owned()
    }
}

/// A graph node: an IRI, a blank node (named or generated), or a literal.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Node {
    /// An absolute IRI reference.
    Iri(String),
    /// A blank node with a source-provided label.
    BlankNamed(String),
    /// A blank node whose identifier was generated by the parser.
    BlankGen(u64),
    /// A literal value.
    Literal(LValue),
}

impl Node {
    /// Returns `true` if this node is an [`Node::Iri`].
    pub fn is_iri_node(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    /// Returns `true` if this node is a [`Node::BlankNamed`] or [`Node::BlankGen`].
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Node::BlankNamed(_) | Node::BlankGen(_))
    }

    /// Returns `true` if this node is a [`Node::Literal`].
    pub fn is_literal_node(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Node::Iri(_) => 0,
            Node::BlankNamed(_) => 1,
            Node::BlankGen(_) => 2,
            Node::Literal(_) => 3,
        }
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Node::Iri(a), Node::Iri(b)) => a.cmp(b),
            (Node::BlankNamed(a), Node::BlankNamed(b)) => a.cmp(b),
            (Node::BlankGen(a), Node::BlankGen(b)) => a.cmp(b),
            (Node::Literal(a), Node::Literal(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::BlankNamed(label) => write!(f, "_:{}", label),
            Node::BlankGen(id) => write!(f, "_:genid{}", id),
            Node::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// An RDF triple: `(subject, predicate, object)`.
///
/// Constructed only through [`Triple::new`], which enforces the shape
/// constraints: the subject must be an IRI or blank node, the predicate
/// must be an IRI.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// The triple's subject: an IRI or blank node.
    pub subject: Node,
    /// The triple's predicate: always an IRI.
    pub predicate: Node,
    /// The triple's object: any node.
    pub object: Node,
}

impl Triple {
    /// Builds a triple, failing with [`Error::Structural`] if `subject` is a
    /// literal or `predicate` is not an IRI.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Result<Triple> {
        if subject.is_literal_node() {
            return Err(Error::Structural(format!(
                "subject must not be a literal: {}",
                subject
            )));
        }
        if !predicate.is_iri_node() {
            return Err(Error::Structural(format!(
                "predicate must be an IRI: {}",
                predicate
            )));
        }
        Ok(Triple {
            subject,
            predicate,
            object,
        })
    }

    /// `true` if `self` and `other` have the same subject.
    pub fn equal_subjects(&self, other: &Triple) -> bool {
        self.subject == other.subject
    }

    /// `true` if `self` and `other` have the same predicate.
    pub fn equal_predicates(&self, other: &Triple) -> bool {
        self.predicate == other.predicate
    }

    /// `true` if `self` and `other` have the same object.
    pub fn equal_objects(&self, other: &Triple) -> bool {
        self.object == other.object
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("+007", "7"; "strips leading plus and zeros")]
    #[test_case("-0", "0"; "negative zero canonicalises to zero")]
    #[test_case("007", "7"; "strips leading zeros")]
    #[test_case("-42", "-42"; "keeps sign on genuine negatives")]
    #[test_case("0", "0"; "single zero is kept")]
    fn integer_canonicalisation(input: &str, expect: &str) {
        let lit = typed_literal(XSD_INTEGER, input);
        assert_eq!(lit, LValue::Typed(expect.to_owned(), XSD_INTEGER.to_owned()));
    }

    #[test]
    fn triple_rejects_literal_subject() {
        let lit = Node::Literal(LValue::Plain("x".into()));
        let pred = Node::Iri("http://e/p".into());
        let obj = Node::Iri("http://e/o".into());
        assert!(Triple::new(lit, pred, obj).is_err());
    }

    #[test]
    fn triple_rejects_non_iri_predicate() {
        let subj = Node::BlankGen(0);
        let pred = Node::BlankGen(1);
        let obj = Node::Iri("http://e/o".into());
        assert!(Triple::new(subj, pred, obj).is_err());
    }

    #[test]
    fn triple_accepts_blank_subject() {
        let subj = Node::BlankNamed("a".into());
        let pred = Node::Iri("http://e/p".into());
        let obj = Node::Iri("http://e/o".into());
        assert!(Triple::new(subj, pred, obj).is_ok());
    }

    #[test]
    fn equal_subjects_predicates_objects_compare_componentwise() {
        let shared_subject = Node::Iri("http://e/a".into());
        let t1 = Triple::new(
            shared_subject.clone(),
            Node::Iri("http://e/p".into()),
            Node::Iri("http://e/o1".into()),
        )
        .unwrap();
        let t2 = Triple::new(
            shared_subject,
            Node::Iri("http://e/q".into()),
            Node::Iri("http://e/o2".into()),
        )
        .unwrap();
        assert!(t1.equal_subjects(&t2));
        assert!(!t1.equal_predicates(&t2));
        assert!(!t1.equal_objects(&t2));
    }

    #[test]
    fn node_order_respects_variant_ranking() {
        let iri = Node::Iri("http://e/a".into());
        let bn = Node::BlankNamed("a".into());
        let bg = Node::BlankGen(0);
        let lit = Node::Literal(LValue::Plain("a".into()));
        assert!(iri < bn);
        assert!(bn < bg);
        assert!(bg < lit);
    }

    #[test]
    fn lvalue_order_respects_variant_ranking() {
        let plain = LValue::Plain("a".into());
        let lang = LValue::PlainLang("a".into(), "en".into());
        let typed = LValue::Typed("a".into(), "http://e/dt".into());
        assert!(plain < lang);
        assert!(lang < typed);
    }

    #[test]
    fn total_order_is_total_and_transitive() {
        let nodes = vec![
            Node::Iri("http://e/b".into()),
            Node::Iri("http://e/a".into()),
            Node::BlankNamed("z".into()),
            Node::BlankGen(3),
            Node::BlankGen(1),
            Node::Literal(LValue::Plain("x".into())),
            Node::Literal(LValue::PlainLang("x".into(), "en".into())),
            Node::Literal(LValue::Typed("7".into(), XSD_INTEGER.into())),
        ];
        for a in &nodes {
            for b in &nodes {
                for c in &nodes {
                    let ab = a.cmp(b);
                    let bc = b.cmp(c);
                    if ab == Ordering::Less && bc == Ordering::Less {
                        assert_eq!(a.cmp(c), Ordering::Less);
                    }
                }
                // exactly one of <, =, > holds
                let cmp = a.cmp(b);
                let rev = b.cmp(a);
                assert_eq!(cmp.reverse(), rev);
            }
        }
    }
}
