use crate::error::{Error, PResult};
use crate::stream::Input;
use crate::trace::trace;
use crate::Parser;

/// Apply a [`Parser`], producing `None` on failure
///
/// The cursor is restored before `None` is produced, so `opt` never
/// consumes on the failing path.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::opt;
///
/// let mut sign = opt('-');
/// assert_eq!(sign.parse_peek(Input::from("-3")).unwrap().1, Some('-'));
/// assert_eq!(sign.parse_peek(Input::from("3")).unwrap().1, None);
/// ```
pub fn opt<'i, O, F>(mut parser: F) -> impl Parser<'i, Option<O>>
where
    F: Parser<'i, O>,
{
    trace("opt", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        match parser.parse_next(input) {
            Ok(output) => Ok(Some(output)),
            Err(_) => {
                input.reset(&start);
                Ok(None)
            }
        }
    })
}

/// Match with the inner parser, then restore the cursor
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::peek;
/// use sift::token::any;
///
/// let (rest, c) = peek(any).parse_peek(Input::from("abc")).unwrap();
/// assert_eq!(c, 'a');
/// assert_eq!(rest.position(), 0);
/// ```
#[doc(alias = "lookahead")]
pub fn peek<'i, O, F>(mut parser: F) -> impl Parser<'i, O>
where
    F: Parser<'i, O>,
{
    trace("peek", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let output = parser.parse_next(input)?;
        input.reset(&start);
        Ok(output)
    })
}

/// Succeed, without consuming, only when the inner parser fails
///
/// A match is reported as `unexpected` with the matched value; a failure
/// succeeds with `()`. Either way the cursor does not move.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::not;
/// use sift::token::literal;
///
/// let mut no_else = not(literal("else"));
/// assert!(no_else.parse_peek(Input::from("elf")).is_ok());
/// assert_eq!(
///     no_else.parse(Input::from("else")).unwrap_err().to_string(),
///     "unexpected \"else\" at 1:1"
/// );
/// ```
#[doc(alias = "exclude")]
pub fn not<'i, O, F>(mut parser: F) -> impl Parser<'i, ()>
where
    F: Parser<'i, O>,
    O: core::fmt::Debug,
{
    trace("not", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let position = input.position();
        match parser.parse_next(input) {
            Ok(output) => {
                input.reset(&start);
                Err(Error::unexpected(format!("{output:?}"), position))
            }
            Err(_) => {
                input.reset(&start);
                Ok(())
            }
        }
    })
}

/// Succeed with `()` without consuming anything
pub fn empty<'i>(_input: &mut Input<'i>) -> PResult<()> {
    Ok(())
}

/// Succeed with an empty `Vec` without consuming anything
///
/// The seed for [`cons`][crate::combinator::cons] chains.
pub fn empty_list<'i, O>(_input: &mut Input<'i>) -> PResult<Vec<O>> {
    Ok(Vec::new())
}

/// Succeed with a clone of `value` without consuming anything
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{alt, success};
///
/// let mut sign = alt(('-'.value(-1), '+'.value(1), success(1)));
/// assert_eq!(sign.parse_peek(Input::from("x")).unwrap().1, 1);
/// ```
pub fn success<'i, O>(value: O) -> impl Parser<'i, O>
where
    O: Clone,
{
    trace("success", move |_input: &mut Input<'i>| Ok(value.clone()))
}

/// Always fail with a free-form message at the current position
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{alt, fail};
///
/// let mut parser = alt(('a'.value(1), fail("only `a' is supported")));
/// assert_eq!(
///     parser.parse(Input::from("b")).unwrap_err().to_string(),
///     "only `a' is supported at 1:1"
/// );
/// ```
pub fn fail<'i, O, M: Into<String>>(message: M) -> impl Parser<'i, O> {
    let message = message.into();
    trace("fail", move |input: &mut Input<'i>| {
        Err(Error::message(message.clone(), input.position()))
    })
}

/// Adapt an external `&str -> (value, remainder)` function into a parser
///
/// The function receives the remaining input as text and hands back the
/// unconsumed suffix; the cursor advances by the codepoints it consumed.
/// Failures render as `"<name>: <error>"` at the adapter's start. Only
/// inputs whose remainder is in-memory UTF-8 qualify (UTF-8, or
/// all-ASCII Latin-1); anything else fails cleanly.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::external;
///
/// fn take_two(input: &str) -> Result<(String, &str), String> {
///     if input.len() < 2 {
///         return Err("too short".to_owned());
///     }
///     Ok((input[..2].to_owned(), &input[2..]))
/// }
///
/// let (rest, pair) = external("pair", take_two).parse_peek(Input::from("abcd")).unwrap();
/// assert_eq!(pair, "ab");
/// assert_eq!(rest.position(), 2);
/// ```
pub fn external<'i, O, E, F>(name: &'static str, mut run: F) -> impl Parser<'i, O>
where
    F: FnMut(&'i str) -> Result<(O, &'i str), E>,
    E: core::fmt::Display,
{
    trace(name, move |input: &mut Input<'i>| {
        let position = input.position();
        let rest = input
            .as_str()
            .ok_or_else(|| Error::message(format!("{name}: input is not text"), position))?;
        match run(rest) {
            Ok((value, remainder)) => {
                let consumed = rest.len().saturating_sub(remainder.len());
                let codepoints = rest[..consumed].chars().count();
                input.bump(consumed, codepoints);
                Ok(value)
            }
            Err(error) => Err(Error::message(format!("{name}: {error}"), position)),
        }
    })
}

/// A type that knows how to parse itself off the front of a string
///
/// The module-adapter counterpart of [`external`]: implement this for a
/// type and drop it into a grammar with [`fragment`].
pub trait ParseFragment: Sized {
    /// Parse a value off the front of `input`, returning the rest
    fn parse_fragment(input: &str) -> Result<(Self, &str), String>;
}

/// Parse a [`ParseFragment`] type at the cursor
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{fragment, ParseFragment};
///
/// struct Version(u32, u32);
///
/// impl ParseFragment for Version {
///     fn parse_fragment(input: &str) -> Result<(Self, &str), String> {
///         let end = input.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(input.len());
///         let (major, minor) = input[..end].split_once('.').ok_or("missing dot")?;
///         let version = Version(
///             major.parse().map_err(|e| format!("{e}"))?,
///             minor.parse().map_err(|e| format!("{e}"))?,
///         );
///         Ok((version, &input[end..]))
///     }
/// }
///
/// let version: Version = fragment().parse(Input::from("1.82")).unwrap();
/// assert_eq!(version.0, 1);
/// assert_eq!(version.1, 82);
/// ```
pub fn fragment<'i, T>() -> impl Parser<'i, T>
where
    T: ParseFragment,
{
    external(core::any::type_name::<T>(), T::parse_fragment)
}
