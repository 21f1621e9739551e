//! Grammar rules of Turtle, implemented as `nom` parser functions threaded
//! through a shared [`ParserState`].
//!
//! One function per production, named after the production it parses, in
//! the style of this crate's original production-rule module. Each
//! function takes the remaining input and a `&RefCell<ParserState>` and
//! returns the standard `nom` `IResult`; state mutation (prefixes, base
//! URI, subject/predicate stacks, emitted triples) happens as a side
//! effect through the shared context rather than by building an
//! intermediate tree.

use crate::error::{Error, Result};
use crate::lexicon::*;
use crate::namespace::{self, absolutise, resolve_qname, BaseUrl, PrefixMappings};
use crate::node::{
    typed_literal, LValue, Node, XSD_BOOLEAN, XSD_DECIMAL, XSD_DOUBLE, XSD_INTEGER,
};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{map, opt};
use nom::multi::many0;
use nom::sequence::tuple;
use nom::{error::ErrorKind, error_position, Err as NomError, IResult};
use std::cell::RefCell;

/// State threaded through every grammar rule: prefixes, base URI, the
/// subject/predicate scope stacks, and the triples emitted so far.
#[derive(Debug, Default)]
pub(crate) struct ParserState {
    pub(crate) base_url: Option<BaseUrl>,
    pub(crate) doc_url: Option<String>,
    next_bnode_id: u64,
    pub(crate) prefixes: PrefixMappings,
    subject_stack: Vec<Node>,
    predicate_stack: Vec<Node>,
    pub(crate) triples: Vec<(Node, Node, Node)>,
    /// Carries a crate-level error out of a `nom::Err::Failure` whose own
    /// payload (the default `(&str, ErrorKind)`) can't hold one.
    pub(crate) last_error: Option<Error>,
}

/// The parser state wrapped for sharing across `nom`'s `Fn`-only combinators.
pub(crate) type Ctx<'a> = RefCell<ParserState>;

impl ParserState {
    pub(crate) fn new(base_url: Option<BaseUrl>, doc_url: Option<String>) -> Self {
        ParserState {
            base_url,
            doc_url,
            ..Default::default()
        }
    }

    fn fresh_bnode(&mut self) -> Node {
        let id = self.next_bnode_id;
        self.next_bnode_id += 1;
        Node::BlankGen(id)
    }

    fn push_subject(&mut self, node: Node) {
        self.subject_stack.push(node);
    }

    fn pop_subject(&mut self) -> Result<Node> {
        self.subject_stack
            .pop()
            .ok_or_else(|| Error::StackUnderflow("subject stack".into()))
    }

    fn top_subject(&self) -> Result<Node> {
        self.subject_stack
            .last()
            .cloned()
            .ok_or_else(|| Error::StackUnderflow("subject stack".into()))
    }

    fn push_predicate(&mut self, node: Node) {
        self.predicate_stack.push(node);
    }

    fn pop_predicate(&mut self) -> Result<Node> {
        self.predicate_stack
            .pop()
            .ok_or_else(|| Error::StackUnderflow("predicate stack".into()))
    }

    fn top_predicate(&self) -> Result<Node> {
        self.predicate_stack
            .last()
            .cloned()
            .ok_or_else(|| Error::StackUnderflow("predicate stack".into()))
    }

    fn emit(&mut self, subject: Node, predicate: Node, object: Node) -> Result<()> {
        crate::node::Triple::new(subject.clone(), predicate.clone(), object.clone())?;
        self.triples.push((subject, predicate, object));
        Ok(())
    }

    fn emit_top(&mut self, object: Node) -> Result<()> {
        let subject = self.top_subject()?;
        let predicate = self.top_predicate()?;
        self.emit(subject, predicate, object)
    }

    /// `true` once every opened scope has been closed again.
    pub(crate) fn stacks_are_empty(&self) -> bool {
        self.subject_stack.is_empty() && self.predicate_stack.is_empty()
    }
}

/// Fails the current `nom` combinator chain, stashing `err` on `ctx` so the
/// facade can report it instead of a bare `ErrorKind::Verify`.
fn nom_fail<'a, O>(ctx: &Ctx<'a>, rest: &'a str, err: Error) -> IResult<&'a str, O> {
    ctx.borrow_mut().last_error = Some(err);
    Err(NomError::Failure(error_position!(rest, ErrorKind::Verify)))
}

fn fresh_bnode<'a>(ctx: &Ctx<'a>) -> Node {
    ctx.borrow_mut().fresh_bnode()
}

fn push_subject<'a>(ctx: &Ctx<'a>, node: Node) {
    ctx.borrow_mut().push_subject(node);
}

fn pop_subject_ok<'a>(ctx: &Ctx<'a>, rest: &'a str) -> IResult<&'a str, ()> {
    match ctx.borrow_mut().pop_subject() {
        Ok(_) => Ok((rest, ())),
        Err(e) => nom_fail(ctx, rest, e),
    }
}

fn push_predicate<'a>(ctx: &Ctx<'a>, node: Node) {
    ctx.borrow_mut().push_predicate(node);
}

fn pop_predicate_ok<'a>(ctx: &Ctx<'a>, rest: &'a str) -> IResult<&'a str, ()> {
    match ctx.borrow_mut().pop_predicate() {
        Ok(_) => Ok((rest, ())),
        Err(e) => nom_fail(ctx, rest, e),
    }
}

fn emit_top_ok<'a>(ctx: &Ctx<'a>, rest: &'a str, object: Node) -> IResult<&'a str, ()> {
    match ctx.borrow_mut().emit_top(object) {
        Ok(_) => Ok((rest, ())),
        Err(e) => nom_fail(ctx, rest, e),
    }
}

fn unwrap_margin(s: &str, margin: usize) -> String {
    s[margin..s.len() - margin].to_owned()
}

/// `[1] turtleDoc ::= statement*`
pub(crate) fn turtle_doc<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, _) = ws0(i)?;
    let (rest, _) = many0(map(tuple((|i| statement(i, ctx), ws0)), |_| ()))(rest)?;
    Ok((rest, ()))
}

/// `[2] statement ::= directive | triples '.'`
fn statement<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    alt((
        |i| directive(i, ctx),
        map(tuple((|i| triples(i, ctx), ws0, tag("."))), |_| ()),
    ))(i)
}

/// `[3] directive ::= prefixID | base`
fn directive<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    alt((|i| prefix_id(i, ctx), |i| base(i, ctx)))(i)
}

/// `[4] prefixID ::= '@prefix' PNAME_NS IRIREF '.'`
///
/// Only the Team Submission's `@prefix` form is recognised; the SPARQL-style
/// case-insensitive `PREFIX` directive is a later RDF-1.1 grammar feature
/// and is out of scope here.
fn prefix_id<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, (_, _, prefix_raw, _, ns_raw, _, _)) = tuple((
        tag("@prefix"),
        ws1,
        parse_regex(&PNAME_NS),
        ws0,
        parse_regex(&IRIREF),
        ws0,
        tag("."),
    ))(i)?;
    let prefix = &prefix_raw[..prefix_raw.len() - 1];
    let fragment = &ns_raw[1..ns_raw.len() - 1];
    let resolved = {
        let state = ctx.borrow();
        absolutise(state.base_url.as_ref(), state.doc_url.as_deref(), fragment)
    };
    ctx.borrow_mut().prefixes.insert(prefix.to_owned(), resolved);
    Ok((rest, ()))
}

/// `[5] base ::= '@base' IRIREF '.'`
///
/// Only the Team Submission's `@base` form is recognised; the SPARQL-style
/// case-insensitive `BASE` directive is a later RDF-1.1 grammar feature and
/// is out of scope here.
fn base<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, (_, _, raw, _, _)) =
        tuple((tag("@base"), ws1, parse_regex(&IRIREF), ws0, tag(".")))(i)?;
    let fragment = &raw[1..raw.len() - 1];
    let resolved = {
        let state = ctx.borrow();
        absolutise(state.base_url.as_ref(), state.doc_url.as_deref(), fragment)
    };
    ctx.borrow_mut().base_url = Some(BaseUrl::new(resolved));
    Ok((rest, ()))
}

/// `[6] triples ::= subject predicateObjectList | blankNodePropertyList predicateObjectList?`
fn triples<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    alt((
        |i| triples_with_plain_subject(i, ctx),
        |i| triples_with_bnode_subject(i, ctx),
    ))(i)
}

fn triples_with_plain_subject<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, node) = subject(i, ctx)?;
    push_subject(ctx, node);
    let (rest, _) = ws1(rest)?;
    let (rest, _) = predicate_object_list(rest, ctx)?;
    pop_subject_ok(ctx, rest)
}

/// The bracketed-subject form: the fresh blank node is pushed once and
/// *not* popped until this whole production returns, so a trailing
/// `predicateObjectList` after the closing `]` shares the same subject.
fn triples_with_bnode_subject<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, _) = tag("[")(i)?;
    let (rest, _) = ws0(rest)?;
    push_subject(ctx, fresh_bnode(ctx));
    let (rest, _) = predicate_object_list(rest, ctx)?;
    let (rest, _) = ws0(rest)?;
    let (rest, _) = tag("]")(rest)?;
    let (rest, _) = ws0(rest)?;
    let (rest, _) = match predicate_object_list(rest, ctx) {
        Ok((r, _)) => (r, ()),
        Err(NomError::Failure(e)) => return Err(NomError::Failure(e)),
        Err(_) => (rest, ()),
    };
    pop_subject_ok(ctx, rest)
}

/// `[7] predicateObjectList ::= verb objectList (';' (verb objectList)?)*`
fn predicate_object_list<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (mut rest, _) = predicate_objects(i, ctx)?;
    loop {
        match tuple((ws0, tag(";")))(rest) {
            Ok((after_semi, _)) => {
                let (after_ws, _) = ws0(after_semi)?;
                match predicate_objects(after_ws, ctx) {
                    Ok((r, _)) => rest = r,
                    Err(NomError::Failure(e)) => return Err(NomError::Failure(e)),
                    Err(_) => {
                        rest = after_ws;
                        break;
                    }
                }
            }
            Err(_) => break,
        }
    }
    Ok((rest, ()))
}

fn predicate_objects<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, pred) = verb(i, ctx)?;
    let (rest, _) = ws1(rest)?;
    push_predicate(ctx, pred);
    let (rest, _) = object_list(rest, ctx)?;
    pop_predicate_ok(ctx, rest)
}

/// `[8] objectList ::= object (',' object)*`
fn object_list<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (mut rest, _) = object(i, ctx)?;
    loop {
        match tuple((ws0, tag(","), ws0))(rest) {
            Ok((after, _)) => {
                let (r, _) = object(after, ctx)?;
                rest = r;
            }
            Err(_) => break,
        }
    }
    Ok((rest, ()))
}

/// `[9] verb ::= predicate | 'a'`
fn verb<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((
        |i| predicate(i, ctx),
        map(tag("a"), |_| Node::Iri(namespace::rdf::TYPE.to_owned())),
    ))(i)
}

/// `[10] subject ::= iri | BlankNode | collection`
///
/// The bracketed-blank-node-property-list form of subject is handled
/// separately by [`triples_with_bnode_subject`], since its scope discipline
/// differs from the other three alternatives.
fn subject<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((|i| iri(i, ctx), |i| blank_node(i, ctx), |i| collection(i, ctx)))(i)
}

/// `[11] predicate ::= iri`
fn predicate<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    iri(i, ctx)
}

/// `[12] object ::= iri | BlankNode | collection | blankNodePropertyList | literal`
fn object<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, ()> {
    let (rest, node) = object_node(i, ctx)?;
    emit_top_ok(ctx, rest, node)
}

fn object_node<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((
        |i| iri(i, ctx),
        |i| blank_node(i, ctx),
        |i| collection(i, ctx),
        |i| blank_node_property_list(i, ctx),
        |i| literal(i, ctx),
    ))(i)
}

/// `[13] literal ::= RDFLiteral | NumericLiteral | BooleanLiteral`
fn literal<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((
        |i| rdf_literal(i, ctx),
        |i| numeric_literal(i, ctx),
        |i| boolean_literal(i, ctx),
    ))(i)
}

/// `[14] blankNodePropertyList ::= '[' predicateObjectList ']'`
///
/// Used only in object position: the fresh subject is pushed, the bracket's
/// own predicateObjectList is parsed against it, and it is popped again
/// before returning — the brackets are a fully self-contained scope here,
/// unlike their use as a statement's subject.
fn blank_node_property_list<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, _) = tag("[")(i)?;
    let (rest, _) = ws0(rest)?;
    let bnode = fresh_bnode(ctx);
    push_subject(ctx, bnode.clone());
    let (rest, _) = predicate_object_list(rest, ctx)?;
    let (rest, _) = pop_subject_ok(ctx, rest)?;
    let (rest, _) = ws0(rest)?;
    let (rest, _) = tag("]")(rest)?;
    Ok((rest, bnode))
}

/// `[15] collection ::= '(' object* ')'`
///
/// Desugars into a `rdf:first`/`rdf:rest` chain terminated by `rdf:nil`,
/// returning the head cell (or `rdf:nil` itself when empty). Collection
/// elements are parsed with [`object_node`], not [`object`]: they are not
/// triples of the enclosing subject/predicate, only of the generated list
/// cells.
fn collection<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, _) = tag("(")(i)?;
    let (mut rest, _) = ws0(rest)?;
    let mut items = Vec::new();
    loop {
        match object_node(rest, ctx) {
            Ok((r, node)) => {
                items.push(node);
                let (r2, _) = ws0(r)?;
                rest = r2;
            }
            Err(NomError::Failure(e)) => return Err(NomError::Failure(e)),
            Err(_) => break,
        }
    }
    let (rest, _) = tag(")")(rest)?;

    if items.is_empty() {
        return Ok((rest, Node::Iri(namespace::rdf::NIL.to_owned())));
    }

    let cells: Vec<Node> = {
        let mut state = ctx.borrow_mut();
        (0..items.len()).map(|_| state.fresh_bnode()).collect()
    };
    let head = cells[0].clone();
    for (idx, item) in items.into_iter().enumerate() {
        let cell = cells[idx].clone();
        let rest_node = cells
            .get(idx + 1)
            .cloned()
            .unwrap_or_else(|| Node::Iri(namespace::rdf::NIL.to_owned()));
        let result = {
            let mut state = ctx.borrow_mut();
            state
                .emit(cell.clone(), Node::Iri(namespace::rdf::FIRST.to_owned()), item)
                .and_then(|_| state.emit(cell, Node::Iri(namespace::rdf::REST.to_owned()), rest_node))
        };
        if let Err(e) = result {
            return nom_fail(ctx, rest, e);
        }
    }
    Ok((rest, head))
}

/// `[16] NumericLiteral ::= INTEGER | DECIMAL | DOUBLE`
///
/// Tried in `DOUBLE`, `DECIMAL`, `INTEGER` order: each pattern is anchored
/// and only matches when its own defining character is present (an
/// exponent marker, a decimal point, or neither), so an integer is never
/// misparsed as having consumed a trailing statement-terminating `.`.
fn numeric_literal<'a>(i: &'a str, _ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((
        map(parse_regex(&DOUBLE), |s| Node::Literal(typed_literal(XSD_DOUBLE, s))),
        map(parse_regex(&DECIMAL), |s| Node::Literal(typed_literal(XSD_DECIMAL, s))),
        map(parse_regex(&INTEGER), |s| Node::Literal(typed_literal(XSD_INTEGER, s))),
    ))(i)
}

/// `[133s] BooleanLiteral ::= 'true' | 'false'`
fn boolean_literal<'a>(i: &'a str, _ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    map(parse_regex(&BOOLEAN), |s| Node::Literal(typed_literal(XSD_BOOLEAN, s)))(i)
}

/// `[128s] RDFLiteral ::= String (LANGTAG | '^^' iri)?`
fn rdf_literal<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, text) = string(i, ctx)?;
    if let Ok((rest, dt)) = tuple((tag("^^"), |i| iri(i, ctx)))(rest) {
        let (_, dt) = dt;
        let dt_iri = match dt {
            Node::Iri(s) => s,
            _ => unreachable!("iri() always returns Node::Iri"),
        };
        return Ok((rest, Node::Literal(typed_literal(dt_iri, &text))));
    }
    if let Ok((rest, (_, lang))) = tuple((tag("@"), parse_regex(&LANGTAG)))(rest) {
        return Ok((rest, Node::Literal(LValue::PlainLang(text, lang.to_owned()))));
    }
    Ok((rest, Node::Literal(LValue::Plain(text))))
}

/// `[17] String ::= STRING_LITERAL_QUOTE | STRING_LITERAL_SINGLE_QUOTE
///                 | STRING_LITERAL_LONG_SINGLE_QUOTE | STRING_LITERAL_LONG_QUOTE`
///
/// The long-quote forms must be tried first: a short-quote regex run
/// against e.g. `"""abc"""` would otherwise match the empty string `""`
/// that opens it, since its character class merely excludes `"`.
fn string<'a>(i: &'a str, _ctx: &Ctx<'a>) -> IResult<&'a str, String> {
    alt((
        map(parse_regex(&STRING_LITERAL_LONG_QUOTE), |s| unwrap_margin(s, 3)),
        map(parse_regex(&STRING_LITERAL_LONG_SINGLE_QUOTE), |s| unwrap_margin(s, 3)),
        map(parse_regex(&STRING_LITERAL_QUOTE), |s| unwrap_margin(s, 1)),
        map(parse_regex(&STRING_LITERAL_SINGLE_QUOTE), |s| unwrap_margin(s, 1)),
    ))(i)
}

/// `[135s] iri ::= IRIREF | PrefixedName`
fn iri<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((|i| iri_full(i, ctx), |i| prefixed_name(i, ctx)))(i)
}

fn iri_full<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, raw) = parse_regex(&IRIREF)(i)?;
    let fragment = &raw[1..raw.len() - 1];
    let resolved = {
        let state = ctx.borrow();
        absolutise(state.base_url.as_ref(), state.doc_url.as_deref(), fragment)
    };
    Ok((rest, Node::Iri(resolved)))
}

/// `[136s] PrefixedName ::= PNAME_LN | PNAME_NS`
///
/// Parsed as `PNAME_NS PN_LOCAL?` rather than through the combined
/// `pname_ln` terminal, since resolving a qname needs the prefix and local
/// part split apart, and `pname_ln`'s `recognize` throws that boundary
/// away.
fn prefixed_name<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, (ns_raw, local)) = tuple((parse_regex(&PNAME_NS), opt(pn_local)))(i)?;
    let prefix = &ns_raw[..ns_raw.len() - 1];
    let local = local.unwrap_or("");
    let resolution = {
        let state = ctx.borrow();
        resolve_qname(state.base_url.as_ref(), prefix, &state.prefixes)
    };
    match resolution {
        Ok(ns) => Ok((rest, Node::Iri(format!("{}{}", ns, local)))),
        Err(e) => nom_fail(ctx, rest, e),
    }
}

/// `[137s] BlankNode ::= BLANK_NODE_LABEL | ANON`
fn blank_node<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    alt((
        map(blank_node_label, |s| Node::BlankNamed(s[2..].to_owned())),
        |i| anon(i, ctx),
    ))(i)
}

fn anon<'a>(i: &'a str, ctx: &Ctx<'a>) -> IResult<&'a str, Node> {
    let (rest, _) = tag("[")(i)?;
    let (rest, _) = ws0(rest)?;
    let (rest, _) = tag("]")(rest)?;
    Ok((rest, fresh_bnode(ctx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Triple;

    fn run(doc: &str) -> Result<Vec<(Node, Node, Node)>> {
        let ctx = RefCell::new(ParserState::new(None, None));
        let result = turtle_doc(doc, &ctx);
        match result {
            Ok((rest, _)) if rest.is_empty() => {
                let state = ctx.into_inner();
                state
                    .triples
                    .into_iter()
                    .map(|(s, p, o)| Triple::new(s, p, o).map(|t| (t.subject, t.predicate, t.object)))
                    .collect()
            }
            Ok((rest, _)) => Err(Error::Syntax {
                pos: doc.len() - rest.len(),
                message: "trailing input".into(),
                context: rest.chars().take(48).collect(),
            }),
            Err(_) => {
                let state = ctx.into_inner();
                Err(state
                    .last_error
                    .unwrap_or_else(|| Error::Syntax {
                        pos: 0,
                        message: "parse failed".into(),
                        context: String::new(),
                    }))
            }
        }
    }

    fn iri(s: &str) -> Node {
        Node::Iri(s.to_owned())
    }

    #[test]
    fn simple_triple() {
        let triples = run("<http://e/a> <http://e/p> <http://e/b> .").unwrap();
        assert_eq!(
            triples,
            vec![(iri("http://e/a"), iri("http://e/p"), iri("http://e/b"))]
        );
    }

    #[test]
    fn prefixed_names_resolve_against_prefix() {
        let doc = "@prefix ex: <http://e/> .\nex:a ex:p ex:b .";
        let triples = run(doc).unwrap();
        assert_eq!(
            triples,
            vec![(iri("http://e/a"), iri("http://e/p"), iri("http://e/b"))]
        );
    }

    #[test]
    fn prefix_namespace_is_absolutised_against_base() {
        let doc = "@base <http://e/> .\n@prefix ex: <foo#> .\nex:bar ex:p ex:b .";
        let triples = run(doc).unwrap();
        assert_eq!(
            triples,
            vec![(iri("http://e/foo#bar"), iri("http://e/foo#p"), iri("http://e/foo#b"))]
        );
    }

    #[test]
    fn sparql_style_prefix_directive_is_rejected() {
        let doc = "PREFIX ex: <http://e/> .\nex:a ex:p ex:b .";
        assert!(run(doc).is_err());
    }

    #[test]
    fn sparql_style_base_directive_is_rejected() {
        let doc = "BASE <http://e/> .\n<a> <p> <b> .";
        assert!(run(doc).is_err());
    }

    #[test]
    fn a_keyword_means_rdf_type() {
        let doc = "<http://e/a> a <http://e/Thing> .";
        let triples = run(doc).unwrap();
        assert_eq!(
            triples,
            vec![(iri("http://e/a"), iri(namespace::rdf::TYPE), iri("http://e/Thing"))]
        );
    }

    #[test]
    fn typed_literal_and_langtag() {
        let doc = r#"<http://e/a> <http://e/p> "7"^^<http://www.w3.org/2001/XMLSchema#integer> .
<http://e/a> <http://e/q> "hi"@en ."#;
        let triples = run(doc).unwrap();
        assert_eq!(triples.len(), 2);
        match &triples[0].2 {
            Node::Literal(LValue::Typed(lex, dt)) => {
                assert_eq!(lex, "7");
                assert_eq!(dt, XSD_INTEGER);
            }
            other => panic!("unexpected object: {:?}", other),
        }
        match &triples[1].2 {
            Node::Literal(LValue::PlainLang(lex, lang)) => {
                assert_eq!(lex, "hi");
                assert_eq!(lang, "en");
            }
            other => panic!("unexpected object: {:?}", other),
        }
    }

    #[test]
    fn collection_desugars_to_first_rest_nil() {
        let doc = "<http://e/a> <http://e/p> ( <http://e/x> <http://e/y> ) .";
        let triples = run(doc).unwrap();
        // one triple for the statement itself, plus 2 cells * 2 (first+rest)
        assert_eq!(triples.len(), 1 + 4);
        assert_eq!(triples[0].0, iri("http://e/a"));
        assert_eq!(triples[1].1, iri(namespace::rdf::FIRST));
        assert_eq!(triples[1].2, iri("http://e/x"));
        assert_eq!(triples[2].1, iri(namespace::rdf::REST));
        assert_eq!(triples[3].2, iri("http://e/y"));
        assert_eq!(triples[4].2, iri(namespace::rdf::NIL));
    }

    #[test]
    fn empty_collection_is_nil() {
        let doc = "<http://e/a> <http://e/p> () .";
        let triples = run(doc).unwrap();
        assert_eq!(triples, vec![(iri("http://e/a"), iri("http://e/p"), iri(namespace::rdf::NIL))]);
    }

    #[test]
    fn nested_predicate_object_list_shares_bnode_subject() {
        let doc = "[ <http://e/p> <http://e/o1> ; <http://e/q> <http://e/o2> ] <http://e/r> <http://e/o3> .";
        let triples = run(doc).unwrap();
        assert_eq!(triples.len(), 3);
        let subject = triples[0].0.clone();
        assert!(triples.iter().all(|t| t.0 == subject));
    }

    #[test]
    fn blank_node_property_list_as_object_is_self_contained() {
        let doc = "<http://e/a> <http://e/p> [ <http://e/q> <http://e/o> ] .";
        let triples = run(doc).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].0, iri("http://e/a"));
        assert_eq!(triples[1].0, triples[0].2);
    }

    #[test]
    fn base_directive_changes_relative_resolution() {
        let doc = "@base <http://e/> .\n<a> <p> <b> .";
        let triples = run(doc).unwrap();
        assert_eq!(
            triples,
            vec![(iri("http://e/a"), iri("http://e/p"), iri("http://e/b"))]
        );
    }

    #[test]
    fn unbound_prefix_is_a_resolution_error() {
        let err = run("ex:a ex:p ex:b .").unwrap_err();
        assert!(matches!(err, Error::Resolution(_)));
    }

    #[test]
    fn malformed_statement_is_a_syntax_error() {
        let err = run("<http://e/a> <http://e/p> .").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn integer_not_confused_with_trailing_dot() {
        let doc = "<http://e/a> <http://e/p> 7 .";
        let triples = run(doc).unwrap();
        match &triples[0].2 {
            Node::Literal(LValue::Typed(lex, dt)) => {
                assert_eq!(lex, "7");
                assert_eq!(dt, XSD_INTEGER);
            }
            other => panic!("unexpected object: {:?}", other),
        }
    }

    #[test]
    fn triple_quoted_string_is_not_misparsed_as_empty() {
        let doc = r#"<http://e/a> <http://e/p> """said "hi"""" ."#;
        let triples = run(doc).unwrap();
        match &triples[0].2 {
            Node::Literal(LValue::Plain(lex)) => assert_eq!(lex, "said \"hi\""),
            other => panic!("unexpected object: {:?}", other),
        }
    }

    #[test]
    fn anon_blank_node_object_is_fresh_each_time() {
        let doc = "<http://e/a> <http://e/p> [] , [] .";
        let triples = run(doc).unwrap();
        assert_eq!(triples.len(), 2);
        assert_ne!(triples[0].2, triples[1].2);
    }
}
