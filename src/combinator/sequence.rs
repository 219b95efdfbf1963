use crate::error::PResult;
use crate::stream::Input;
use crate::trace::trace;
use crate::Parser;

/// Sequence two parsers, only returning the output from the second
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::preceded;
/// use sift::token::one_of;
///
/// let mut field = preceded(':', one_of("alpha"));
/// assert_eq!(field.parse(Input::from(":a")).unwrap(), 'a');
/// ```
#[doc(alias = "skip_left")]
pub fn preceded<'i, O1, O2, F, G>(mut first: F, mut second: G) -> impl Parser<'i, O2>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
{
    trace("preceded", move |input: &mut Input<'i>| {
        let _ = first.parse_next(input)?;
        second.parse_next(input)
    })
}

/// Sequence two parsers, only returning the output from the first
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::terminated;
/// use sift::token::one_of;
///
/// let mut field = terminated(one_of("alpha"), ';');
/// assert_eq!(field.parse(Input::from("a;")).unwrap(), 'a');
/// ```
#[doc(alias = "skip_right")]
pub fn terminated<'i, O1, O2, F, G>(mut first: F, mut second: G) -> impl Parser<'i, O1>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
{
    trace("terminated", move |input: &mut Input<'i>| {
        let output = first.parse_next(input)?;
        let _ = second.parse_next(input)?;
        Ok(output)
    })
}

/// Sequence three parsers, only returning the outputs of the first and third
pub fn separated_pair<'i, O1, O2, O3, F, G, H>(
    mut first: F,
    mut separator: G,
    mut second: H,
) -> impl Parser<'i, (O1, O3)>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
    H: Parser<'i, O3>,
{
    trace("separated_pair", move |input: &mut Input<'i>| {
        let left = first.parse_next(input)?;
        let _ = separator.parse_next(input)?;
        let right = second.parse_next(input)?;
        Ok((left, right))
    })
}

/// Sequence three parsers, only returning the output of the second
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{delimited, separated1};
/// use sift::token::one_of;
///
/// let mut list = delimited('[', separated1(one_of("digit"), ','), ']');
/// let result: Vec<char> = list.parse(Input::from("[1,2,3]")).unwrap();
/// assert_eq!(result, vec!['1', '2', '3']);
/// ```
#[doc(alias = "between")]
#[doc(alias = "skip_around")]
pub fn delimited<'i, O1, O2, O3, F, G, H>(
    mut first: F,
    mut second: G,
    mut third: H,
) -> impl Parser<'i, O2>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
    H: Parser<'i, O3>,
{
    trace("delimited", move |input: &mut Input<'i>| {
        let _ = first.parse_next(input)?;
        let output = second.parse_next(input)?;
        let _ = third.parse_next(input)?;
        Ok(output)
    })
}

/// Sequence two parsers, combining their outputs with a function
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::map2;
/// use sift::token::one_of;
///
/// let digit = || one_of("digit").map(|c| c.to_digit(10).unwrap_or(0));
/// let mut tens = map2(digit(), digit(), |high, low| high * 10 + low);
/// assert_eq!(tens.parse(Input::from("42")).unwrap(), 42);
/// ```
#[doc(alias = "ap")]
pub fn map2<'i, O1, O2, O3, F, G, C>(mut first: F, mut second: G, mut combine: C) -> impl Parser<'i, O3>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
    C: FnMut(O1, O2) -> O3,
{
    trace("map2", move |input: &mut Input<'i>| {
        let left = first.parse_next(input)?;
        let right = second.parse_next(input)?;
        Ok(combine(left, right))
    })
}

/// Prepend one parsed value onto a parsed `Vec`
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{cons, repeat};
/// use sift::token::one_of;
///
/// // an identifier: a letter followed by letters or digits
/// let mut identifier = cons(one_of("alpha"), repeat(0.., one_of("alnum")));
/// assert_eq!(
///     identifier.parse(Input::from("x2y")).unwrap(),
///     vec!['x', '2', 'y']
/// );
/// ```
pub fn cons<'i, O, F, G>(mut head: F, mut tail: G) -> impl Parser<'i, Vec<O>>
where
    F: Parser<'i, O>,
    G: Parser<'i, Vec<O>>,
{
    trace("cons", move |input: &mut Input<'i>| {
        let head = head.parse_next(input)?;
        let mut values = tail.parse_next(input)?;
        values.insert(0, head);
        Ok(values)
    })
}

/// Concatenate two parsed `Vec`s
pub fn concat<'i, O, F, G>(mut first: F, mut second: G) -> impl Parser<'i, Vec<O>>
where
    F: Parser<'i, Vec<O>>,
    G: Parser<'i, Vec<O>>,
{
    trace("concat", move |input: &mut Input<'i>| {
        let mut values = first.parse_next(input)?;
        values.extend(second.parse_next(input)?);
        Ok(values)
    })
}

/// Concatenate two parsed `String`s
pub fn concat_str<'i, F, G>(mut first: F, mut second: G) -> impl Parser<'i, String>
where
    F: Parser<'i, String>,
    G: Parser<'i, String>,
{
    trace("concat_str", move |input: &mut Input<'i>| {
        let mut text = first.parse_next(input)?;
        text.push_str(&second.parse_next(input)?);
        Ok(text)
    })
}

/// Prepend a parsed codepoint onto a parsed `String`
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::cons_char;
/// use sift::token::{one_of, take_while};
///
/// let mut word = cons_char(one_of("upper"), take_while(0.., "lower"));
/// assert_eq!(word.parse(Input::from("Rust")).unwrap(), "Rust");
/// ```
pub fn cons_char<'i, F, G>(mut head: F, mut tail: G) -> impl Parser<'i, String>
where
    F: Parser<'i, char>,
    G: Parser<'i, String>,
{
    trace("cons_char", move |input: &mut Input<'i>| {
        let head = head.parse_next(input)?;
        let tail = tail.parse_next(input)?;
        let mut text = String::with_capacity(head.len_utf8() + tail.len());
        text.push(head);
        text.push_str(&tail);
        Ok(text)
    })
}

/// Append a parsed codepoint onto a parsed `String`
pub fn append_char<'i, F, G>(mut first: F, mut second: G) -> impl Parser<'i, String>
where
    F: Parser<'i, String>,
    G: Parser<'i, char>,
{
    trace("append_char", move |input: &mut Input<'i>| {
        let mut text = first.parse_next(input)?;
        text.push(second.parse_next(input)?);
        Ok(text)
    })
}

macro_rules! impl_parser_for_tuple {
    ($($parser:ident $output:ident $idx:tt),+) => {
        impl<'i, $($parser, $output),+> Parser<'i, ($($output,)+)> for ($($parser,)+)
        where
            $($parser: Parser<'i, $output>),+
        {
            fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<($($output,)+)> {
                Ok(($(self.$idx.parse_next(input)?,)+))
            }
        }
    };
}

impl_parser_for_tuple!(P1 O1 0);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3, P5 O5 4);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3, P5 O5 4, P6 O6 5);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3, P5 O5 4, P6 O6 5, P7 O7 6);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3, P5 O5 4, P6 O6 5, P7 O7 6, P8 O8 7);
impl_parser_for_tuple!(P1 O1 0, P2 O2 1, P3 O3 2, P4 O4 3, P5 O5 4, P6 O6 5, P7 O7 6, P8 O8 7, P9 O9 8);
