//! Lexical primitives shared by the Turtle grammar.
//!
//! All terminals are provided as anchored regular expressions, consumed
//! through [`parse_regex`]. Escapes (`UCHAR`/`ECHAR`) are recognized but not
//! decoded here: string and IRI lexemes keep the escape sequence literally,
//! as the spec requires downstream consumers to do the decoding.

use lazy_static::lazy_static;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::recognize;
use nom::multi::many0;
use nom::sequence::tuple;
use nom::{error::ErrorKind, error_position, Err as NomError, IResult};
use regex::Regex;

lazy_static! {
    /// `[157s] PN_CHARS_BASE`
    pub static ref PN_CHARS_BASE: Regex = Regex::new(
        r#"^[A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#
    ).unwrap();
    /// `[158s] PN_CHARS_U` — PN_CHARS_BASE plus `_`.
    pub static ref PN_CHARS_U: Regex = Regex::new(
        r#"^[_A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#
    ).unwrap();
    /// `[160s] PN_CHARS` — PN_CHARS_U plus `-`, digits, U+00B7, U+0300-U+036F, U+203F-U+2040.
    pub static ref PN_CHARS: Regex = Regex::new(
        r#"^[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#
    ).unwrap();
    /// `[159s] PN_PREFIX`
    pub static ref PN_PREFIX: Regex = Regex::new(
        r#"^[A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]([-\.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]*[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}])?)?$"#
    ).unwrap();
    /// `[18] IRIREF`, including the angle brackets.
    pub static ref IRIREF: Regex = Regex::new(
        r#"^<([^\u{00}-\u{20}<>"\{\}\|\^`\\]|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*>"#
    ).unwrap();
    /// `[18] IRIREF` without the angle brackets, anchored on both ends.
    ///
    /// Used to validate a bare IRI string (e.g. a namespace to be bound by
    /// `@prefix`) rather than to consume a `<...>` lexeme.
    pub static ref IRIREF_ONLY: Regex = Regex::new(
        r#"(?x)^(
            [^\u{00}-\u{20}<>"\{\}\|\^`\\]
            | (\\u [[:xdigit:]]{4})
            | (\\U [[:xdigit:]]{8})
        )*$"#
    ).unwrap();
    /// `[140s] PNAME_NS`, including the trailing `:`.
    pub static ref PNAME_NS: Regex = Regex::new(
        r#"^([A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]([-\.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]*[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}])?)?:"#
    ).unwrap();
    /// `[144s] LANGTAG`, without the leading `@`.
    pub static ref LANGTAG: Regex = Regex::new(r#"^[[:alpha:]]+(-[[:alnum:]]+)*"#).unwrap();
    /// `[19] INTEGER`
    pub static ref INTEGER: Regex = Regex::new(r#"^[+-]?[[:digit:]]+"#).unwrap();
    /// `[20] DECIMAL`
    pub static ref DECIMAL: Regex = Regex::new(r#"^[+-]?[[:digit:]]*\.[[:digit:]]+"#).unwrap();
    /// `[21] DOUBLE`
    pub static ref DOUBLE: Regex = Regex::new(
        r#"^[+-]?(([[:digit:]]+\.[[:digit:]]*[eE][+-]?[[:digit:]]+)|(\.[[:digit:]]+[eE][+-]?[[:digit:]]+)|([[:digit:]]+[eE][+-]?[[:digit:]]+))"#
    ).unwrap();
    /// `[22] EXPONENT`
    pub static ref EXPONENT: Regex = Regex::new(r#"^[eE][+-]?[[:digit:]]+"#).unwrap();
    /// `[23] STRING_LITERAL_QUOTE`, including the surrounding `"`.
    pub static ref STRING_LITERAL_QUOTE: Regex = Regex::new(
        r#"^"([^\u{22}\u{5C}\u{A}\u{D}]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*""#
    ).unwrap();
    /// `[24] STRING_LITERAL_SINGLE_QUOTE`, including the surrounding `'`.
    pub static ref STRING_LITERAL_SINGLE_QUOTE: Regex = Regex::new(
        r#"^'([^\u{27}\u{5C}\u{A}\u{D}]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*'"#
    ).unwrap();
    /// `[25] STRING_LITERAL_LONG_QUOTE`, including the surrounding `"""`.
    pub static ref STRING_LITERAL_LONG_QUOTE: Regex = Regex::new(
        r#"^"""(("|"")?([^"\\]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8})))*""""#
    ).unwrap();
    /// `[26] STRING_LITERAL_LONG_SINGLE_QUOTE`, including the surrounding `'''`.
    pub static ref STRING_LITERAL_LONG_SINGLE_QUOTE: Regex = Regex::new(
        r#"^'''((('|'')?([^'\\]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))))*'''"#
    ).unwrap();
    /// `[26s] UCHAR`
    pub static ref UCHAR: Regex = Regex::new(r#"^(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8})"#).unwrap();
    /// `[159s] ECHAR`
    pub static ref ECHAR: Regex = Regex::new(r#"^\\[tbnrf"'\\]"#).unwrap();
    /// Whitespace or a `#`-comment, one unit.
    pub static ref WS: Regex = Regex::new(r#"^([ \t\n\r]|(#[^\n\r]*))"#).unwrap();
    /// One-or-more whitespace/comment units.
    pub static ref WS_MANY1: Regex = Regex::new(r#"^([ \t\n\r]|(#[^\n\r]*))+"#).unwrap();
    /// Zero-or-more whitespace/comment units.
    pub static ref WS_MANY0: Regex = Regex::new(r#"^([ \t\n\r]|(#[^\n\r]*))*"#).unwrap();
    /// `[162s] PLX`
    pub static ref PLX: Regex = Regex::new(r#"^(%[[:xdigit:]]{2})|(\\[-_~\.!\$&'\(\)\*\+,;=/\?#@%])"#).unwrap();
    /// `[170s] PERCENT`
    pub static ref PERCENT: Regex = Regex::new(r#"^%[[:xdigit:]]{2}"#).unwrap();
    /// `[171s] HEX` — uppercase and lowercase both accepted on read.
    pub static ref HEX: Regex = Regex::new(r#"^[[:xdigit:]]"#).unwrap();
    /// `[172s] PN_LOCAL_ESC`
    pub static ref PN_LOCAL_ESC: Regex = Regex::new(r#"^\\[-_~\.!\$&'\(\)\*\+,;=/\?#@%]"#).unwrap();
    /// A `true`/`false` boolean lexeme.
    pub static ref BOOLEAN: Regex = Regex::new(r#"^(true|false)"#).unwrap();
    static ref DIGIT: Regex = Regex::new(r#"^[[:digit:]]"#).unwrap();
}

/// Tries to capture the given regex at the start of the input.
///
/// The match is consumed from the front; the regex is expected to begin
/// with `^` so that no content is skipped.
pub fn parse_regex(re: &'static Regex) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i: &str| match re.find(i) {
        Some(found) => Ok((&i[found.end()..], found.as_str())),
        None => Err(NomError::Error(error_position!(i, ErrorKind::RegexpCapture))),
    }
}

/// Consumes zero or more whitespace/comment units.
pub fn ws0(i: &str) -> IResult<&str, &str> {
    parse_regex(&WS_MANY0)(i)
}

/// Consumes one or more whitespace/comment units.
pub fn ws1(i: &str) -> IResult<&str, &str> {
    parse_regex(&WS_MANY1)(i)
}

/// Matches an exact string, failing with a descriptive error position.
pub fn lit<'a>(t: &'static str) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    move |i: &'a str| tag(t)(i)
}

/// `[140s] PNAME_LN ::= PNAME_NS PN_LOCAL`
pub fn pname_ln(i: &str) -> IResult<&str, &str> {
    recognize(tuple((parse_regex(&PNAME_NS), pn_local)))(i)
}

/// `[141s] BLANK_NODE_LABEL ::= '_:' (PN_CHARS_U | DIGIT) ((PN_CHARS | '.')* PN_CHARS)?`
///
/// The trailing `PN_CHARS` (not `.`) in the grammar means a run of interior
/// dots is only valid when followed by more label characters. `many0` can't
/// backtrack off a greedily-consumed trailing dot, so instead of
/// `many0` + `opt` we consume the whole middle run greedily and then give
/// back any trailing dots.
pub fn blank_node_label(i: &str) -> IResult<&str, &str> {
    let (rest, head) = tuple((
        tag("_:"),
        alt((parse_regex(&PN_CHARS_U), parse_regex(&DIGIT))),
    ))(i)?;
    let (_rest, body) = recognize(many0(alt((parse_regex(&PN_CHARS), tag(".")))))(rest)?;
    let head_len = head.0.len() + head.1.len();
    Ok(trim_trailing_dots(i, head_len, body.len()))
}

/// `[168s] PN_LOCAL ::= (PN_CHARS_U | ':' | DIGIT | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?`
///
/// Same trailing-dot caveat as [`blank_node_label`]: the grammar's final
/// element excludes `.`, so a greedily-consumed trailing run of dots is
/// given back to the remaining input rather than included in the match.
pub fn pn_local(i: &str) -> IResult<&str, &str> {
    let (rest, first) = alt((
        parse_regex(&PN_CHARS_U),
        tag(":"),
        parse_regex(&DIGIT),
        parse_regex(&PLX),
    ))(i)?;
    let (_rest, body) = recognize(many0(alt((
        parse_regex(&PN_CHARS),
        tag("."),
        tag(":"),
        parse_regex(&PLX),
    ))))(rest)?;
    Ok(trim_trailing_dots(i, first.len(), body.len()))
}

/// Given the original input `i`, the length of its non-droppable head, and
/// the length of a greedily-matched body that may end in one or more `.`,
/// returns `(remaining, matched)` with any trailing dots moved back into
/// `remaining`.
fn trim_trailing_dots(i: &str, head_len: usize, body_len: usize) -> (&str, &str) {
    let mut end = head_len + body_len;
    while end > head_len && i.as_bytes()[end - 1] == b'.' {
        end -= 1;
    }
    (&i[end..], &i[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("<http://example.org/>", true; "plain iri")]
    #[test_case("<http://example.org/%20>", true; "percent escape untouched")]
    #[test_case("http://example.org/", false; "missing brackets")]
    fn iriref_matches(input: &str, expect: bool) {
        assert_eq!(IRIREF.is_match(input), expect);
    }

    #[test_case("+007", true)]
    #[test_case("-0", true)]
    #[test_case("abc", false)]
    fn integer_matches(input: &str, expect: bool) {
        assert_eq!(INTEGER.is_match(input), expect);
    }

    #[test_case("ex", true)]
    #[test_case("", false)]
    #[test_case("1ex", false; "cannot start with digit")]
    fn pn_prefix_matches(input: &str, expect: bool) {
        assert_eq!(PN_PREFIX.is_match(input), expect);
    }

    #[test]
    fn parse_regex_consumes_prefix() {
        let (rest, found) = parse_regex(&INTEGER)("123abc").unwrap();
        assert_eq!(found, "123");
        assert_eq!(rest, "abc");
    }

    #[test]
    fn pn_local_stops_before_trailing_dot() {
        let (rest, found) = pn_local("abc.def. <x>").unwrap();
        assert_eq!(found, "abc.def");
        assert_eq!(rest, ". <x>");
    }

    #[test]
    fn pn_local_gives_back_a_run_of_trailing_dots() {
        let (rest, found) = pn_local("abc...").unwrap();
        assert_eq!(found, "abc");
        assert_eq!(rest, "...");
    }

    #[test]
    fn blank_node_label_gives_back_trailing_dot() {
        let (rest, found) = blank_node_label("_:a.b. x").unwrap();
        assert_eq!(found, "_:a.b");
        assert_eq!(rest, ". x");
    }

    #[test]
    fn pname_ln_splits_prefix_and_local() {
        let (rest, found) = pname_ln("ex:foo bar").unwrap();
        assert_eq!(found, "ex:foo");
        assert_eq!(rest, " bar");
    }

    #[test]
    fn blank_node_label_parses_underscore_colon_form() {
        let (rest, found) = blank_node_label("_:a.b ").unwrap();
        assert_eq!(found, "_:a.b");
        assert_eq!(rest, " ");
    }
}
