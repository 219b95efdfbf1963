//! Parsers extracting codepoints from the input


use crate::charset::{Charset, IntoCharset, Table};
use crate::error::{Error, PResult, EOF_DESCRIPTION};
use crate::intervals::IntervalSet;
use crate::stream::Input;
use crate::Parser;

/// Consume one codepoint, whatever it is
///
/// Fails on empty input and on a malformed byte sequence at the cursor.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::any;
///
/// let (rest, first) = any.parse_peek(Input::from("über")).unwrap();
/// assert_eq!(first, 'ü');
/// assert_eq!(rest.as_bytes(), b"ber");
/// assert_eq!(
///     any.parse(Input::from("")).unwrap_err().to_string(),
///     "unexpected end of input at 1:1"
/// );
/// ```
pub fn any<'i>(input: &mut Input<'i>) -> PResult<char> {
    match input.next_token() {
        Some(token) => Ok(token),
        None => Err(Error::unexpected(EOF_DESCRIPTION, input.position())),
    }
}

/// Succeed with `()` only at the end of input
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::eof;
///
/// assert!(eof.parse(Input::from("")).is_ok());
/// assert_eq!(
///     eof.parse(Input::from("x")).unwrap_err().to_string(),
///     "end of input expected at 1:1"
/// );
/// ```
pub fn eof<'i>(input: &mut Input<'i>) -> PResult<()> {
    if input.is_empty() {
        Ok(())
    } else {
        Err(Error::expected(EOF_DESCRIPTION, input.position()))
    }
}

/// Consume a fixed string, codepoint by codepoint
///
/// The output is the pattern itself, so it works under every encoding.
/// Bare `&str` values are parsers too; the function form reads better
/// where an explicit combinator is wanted.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::literal;
///
/// let mut p = (literal("foo"), literal("bar"));
/// assert_eq!(p.parse(Input::from("foobar")).unwrap(), ("foo", "bar"));
/// ```
pub fn literal<'i, 's>(pattern: &'s str) -> impl Parser<'i, &'s str> {
    move |input: &mut Input<'i>| literal_next(pattern, input)
}

pub(crate) fn literal_next<'s>(pattern: &'s str, input: &mut Input<'_>) -> PResult<&'s str> {
    let start = input.checkpoint();
    let position = input.position();
    for expected in pattern.chars() {
        match input.next_token() {
            Some(token) if token == expected => {}
            _ => {
                input.reset(&start);
                return Err(Error::expected(format!("`{pattern}'"), position));
            }
        }
    }
    Ok(pattern)
}

/// Consume one codepoint satisfying a predicate
///
/// The rejected codepoint shows up in the failure; use
/// [`label`][Parser::label] to name the construct instead.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::satisfy;
///
/// let mut even_digit = satisfy(|c| matches!(c, '0' | '2' | '4' | '6' | '8'));
/// assert_eq!(even_digit.parse(Input::from("4")).unwrap(), '4');
/// assert_eq!(
///     even_digit.parse(Input::from("7")).unwrap_err().to_string(),
///     "unexpected `7' at 1:1"
/// );
/// ```
pub fn satisfy<'i, F>(mut predicate: F) -> impl Parser<'i, char>
where
    F: FnMut(char) -> bool,
{
    move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let position = input.position();
        match input.next_token() {
            Some(token) if predicate(token) => Ok(token),
            Some(token) => {
                input.reset(&start);
                Err(Error::unexpected(format!("`{token}'"), position))
            }
            None => Err(Error::unexpected(EOF_DESCRIPTION, position)),
        }
    }
}

/// Consume one codepoint from a [charset][crate::charset]
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::one_of;
///
/// let mut lower = one_of("lower");
/// assert_eq!(lower.parse(Input::from("x")).unwrap(), 'x');
/// assert_eq!(
///     lower.parse(Input::from("X")).unwrap_err().to_string(),
///     "lower expected at 1:1"
/// );
///
/// let mut sign = one_of(('+', '-'));
/// assert_eq!(sign.parse(Input::from("-")).unwrap(), '-');
/// ```
pub fn one_of(set: impl IntoCharset) -> OneOf {
    OneOf {
        matcher: CharsetMatcher::new(set.into_charset()),
    }
}

/// Consume one codepoint *not* in a [charset][crate::charset]
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::none_of;
///
/// let mut unquoted = none_of('"');
/// assert_eq!(unquoted.parse(Input::from("a")).unwrap(), 'a');
/// assert_eq!(
///     unquoted.parse(Input::from("\"")).unwrap_err().to_string(),
///     "not `\"' expected at 1:1"
/// );
/// ```
pub fn none_of(set: impl IntoCharset) -> NoneOf {
    NoneOf {
        matcher: CharsetMatcher::new(set.into_charset()),
    }
}

/// Repeat a charset match into a `String`
///
/// The bound takes every [`Range`][crate::stream::Range] form. To collect
/// from an arbitrary `char` parser instead of a charset, use
/// [`repeat`][crate::combinator::repeat] with a `String` accumulator.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::take_while;
///
/// let mut word = take_while(1.., "alpha");
/// assert_eq!(word.parse(Input::from("hello world")).unwrap(), "hello");
/// assert_eq!(
///     word.parse(Input::from("42")).unwrap_err().to_string(),
///     "alpha expected at 1:1"
/// );
/// ```
pub fn take_while<'i>(
    occurrences: impl Into<crate::stream::Range>,
    set: impl IntoCharset,
) -> impl Parser<'i, String> {
    crate::combinator::repeat(occurrences, one_of(set))
}

/// Implementation of [`one_of`]
pub struct OneOf {
    matcher: CharsetMatcher,
}

impl<'i> Parser<'i, char> for OneOf {
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<char> {
        let start = input.checkpoint();
        let position = input.position();
        let table = Table::for_encoding(input.encoding());
        match input.next_token() {
            Some(token) if self.matcher.resolved(table).contains(token as u32) => Ok(token),
            _ => {
                input.reset(&start);
                Err(Error::expected(
                    self.matcher.charset.expected_label(),
                    position,
                ))
            }
        }
    }
}

/// Implementation of [`none_of`]
pub struct NoneOf {
    matcher: CharsetMatcher,
}

impl<'i> Parser<'i, char> for NoneOf {
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<char> {
        let start = input.checkpoint();
        let position = input.position();
        let table = Table::for_encoding(input.encoding());
        match input.next_token() {
            Some(token) if !self.matcher.resolved(table).contains(token as u32) => Ok(token),
            _ => {
                input.reset(&start);
                Err(Error::expected(
                    self.matcher.charset.negated_label(),
                    position,
                ))
            }
        }
    }
}

/// A charset plus its resolution against the table last seen
///
/// Registry names resolve differently under Latin-1 and Unicode tables, and
/// the table is only known once the parser meets its input. Parsers run by
/// `&mut self`, so the resolved set is memoized right here.
struct CharsetMatcher {
    charset: Charset,
    resolved: Option<(Table, IntervalSet)>,
}

impl CharsetMatcher {
    fn new(charset: Charset) -> Self {
        Self {
            charset,
            resolved: None,
        }
    }

    fn resolved(&mut self, table: Table) -> &IntervalSet {
        if !matches!(&self.resolved, Some((cached, _)) if *cached == table) {
            self.resolved = None;
        }
        let charset = &self.charset;
        let (_, set) = self
            .resolved
            .get_or_insert_with(|| (table, charset.resolve(table)));
        set
    }
}
