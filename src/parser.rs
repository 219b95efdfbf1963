//! Basic types to build the parsers

use crate::combinator::{ByRef, FlatMap, Label, Map, Tag, Value, Verify};
use crate::error::{Error, PResult, ParseError};
use crate::stream::Input;

/// All parsers implement this trait
///
/// A parser consumes a prefix of the [`Input`] and produces a value of type
/// `O`, or fails with a positioned [`Error`] describing what it wanted.
///
/// Parsers compose: the trait's provided methods and the free functions in
/// [`combinator`][crate::combinator] build larger parsers out of smaller
/// ones, and closures of the right shape are parsers too.
pub trait Parser<'i, O> {
    /// Run the parser at the input's cursor, advancing it past whatever
    /// matched
    ///
    /// On failure the cursor is wherever matching stopped; callers that
    /// backtrack save a [checkpoint][Input::checkpoint] first.
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O>;

    /// Run the parser against a whole input, rendering failures for users
    ///
    /// Consumes from the start of `input`; the remainder is dropped. Append
    /// [`eof`][crate::token::eof] to require the input to be exhausted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::combinator::repeat;
    /// use sift::token::one_of;
    ///
    /// let digits: Vec<char> = repeat(1.., one_of("digit")).parse(Input::from("42")).unwrap();
    /// assert_eq!(digits, vec!['4', '2']);
    /// ```
    fn parse(&mut self, input: impl Into<Input<'i>>) -> Result<O, ParseError<'i>>
    where
        Self: Sized,
    {
        let start: Input<'i> = input.into();
        let mut input = start;
        self.parse_next(&mut input)
            .map_err(|error| ParseError::new(start, error))
    }

    /// Run the parser, returning the remaining input alongside the value
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::token::any;
    ///
    /// let (rest, c) = any.parse_peek(Input::from("ab")).unwrap();
    /// assert_eq!(c, 'a');
    /// assert_eq!(rest.position(), 1);
    /// ```
    fn parse_peek(&mut self, mut input: Input<'i>) -> Result<(Input<'i>, O), Error> {
        let output = self.parse_next(&mut input)?;
        Ok((input, output))
    }

    /// Treat `&mut Self` as a parser
    ///
    /// Lets a parser be composed without moving it.
    fn by_ref(&mut self) -> ByRef<'_, Self>
    where
        Self: Sized,
    {
        ByRef::new(self)
    }

    /// Apply a function over the output
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::token::one_of;
    ///
    /// let mut digit = one_of("digit").map(|c| c.to_digit(10).unwrap());
    /// assert_eq!(digit.parse(Input::from("7")).unwrap(), 7);
    /// ```
    fn map<G, O2>(self, map: G) -> Map<Self, G, O>
    where
        Self: Sized,
        G: FnMut(O) -> O2,
    {
        Map::new(self, map)
    }

    /// Discard the output, producing the given value instead
    fn value<O2>(self, value: O2) -> Value<Self, O, O2>
    where
        Self: Sized,
        O2: Clone,
    {
        Value::new(self, value)
    }

    /// Pair the output with a tag value
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::token::literal;
    ///
    /// let mut keyword = literal("let").tag("keyword");
    /// assert_eq!(keyword.parse(Input::from("let")).unwrap(), ("keyword", "let"));
    /// ```
    fn tag<T>(self, tag: T) -> Tag<Self, T>
    where
        Self: Sized,
        T: Clone,
    {
        Tag::new(self, tag)
    }

    /// Succeed only when the output satisfies a predicate
    ///
    /// A rejection fails with a free-form message at the parser's start
    /// position and restores the cursor there.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::token::any;
    ///
    /// let mut even = any.map(|c| c.to_digit(10).unwrap_or(1)).verify(|n| n % 2 == 0);
    /// assert_eq!(even.parse(Input::from("4")).unwrap(), 4);
    /// assert_eq!(
    ///     even.parse(Input::from("3")).unwrap_err().to_string(),
    ///     "`3' failed predicate at 1:1"
    /// );
    /// ```
    fn verify<G>(self, predicate: G) -> Verify<Self, G>
    where
        Self: Sized,
        G: FnMut(&O) -> bool,
        O: core::fmt::Debug,
    {
        Verify::new(self, predicate)
    }

    /// Build a second parser from the output and run it from here
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::token::{any, literal};
    ///
    /// // the first character picks the closing delimiter
    /// let mut quoted = any.flat_map(|open| match open {
    ///     '<' => literal(">"),
    ///     _ => literal("'"),
    /// });
    /// assert_eq!(quoted.parse(Input::from("<>")).unwrap(), ">");
    /// ```
    fn flat_map<G, H, O2>(self, build: G) -> FlatMap<Self, G, O>
    where
        Self: Sized,
        G: FnMut(O) -> H,
        H: Parser<'i, O2>,
    {
        FlatMap::new(self, build)
    }

    /// Name the construct in failures that did not get past its start
    ///
    /// A failure at a position no greater than the start is rewritten to
    /// `Expected(name)` at the start; a failure further in is more
    /// informative than the generic name and passes through unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift::prelude::*;
    /// use sift::combinator::alt;
    /// use sift::token::literal;
    ///
    /// let mut boolean = alt((literal("true"), literal("false"))).label("boolean");
    /// assert_eq!(
    ///     boolean.parse(Input::from("yes")).unwrap_err().to_string(),
    ///     "boolean expected at 1:1"
    /// );
    /// ```
    fn label(self, name: impl Into<String>) -> Label<Self>
    where
        Self: Sized,
    {
        Label::new(self, name.into())
    }
}

impl<'i, O, F> Parser<'i, O> for F
where
    F: FnMut(&mut Input<'i>) -> PResult<O>,
{
    #[inline(always)]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O> {
        self(input)
    }
}

/// A `char` matches itself
///
/// ```rust
/// use sift::prelude::*;
///
/// assert_eq!('['.parse(Input::from("[1]")).unwrap(), '[');
/// ```
impl<'i> Parser<'i, char> for char {
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<char> {
        let start = input.checkpoint();
        let position = input.position();
        match input.next_token() {
            Some(token) if token == *self => Ok(token),
            _ => {
                input.reset(&start);
                Err(Error::expected(format!("`{self}'"), position))
            }
        }
    }
}

/// A `&str` matches itself, advancing one position per codepoint
///
/// ```rust
/// use sift::prelude::*;
///
/// assert_eq!(Parser::parse(&mut "foo", Input::from("foobar")).unwrap(), "foo");
/// ```
impl<'i, 's> Parser<'i, &'s str> for &'s str {
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<&'s str> {
        crate::token::literal_next(*self, input)
    }
}

impl<'i, 'p, O> Parser<'i, O> for Box<dyn Parser<'i, O> + 'p> {
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O> {
        (**self).parse_next(input)
    }
}
