//! Combinators applying their child parser multiple times

use crate::error::Error;
use crate::stream::{Accumulate, Input, Range};
use crate::trace::trace;
use crate::Parser;

/// [`Accumulate`] the output of a parser into a container, like `Vec`
///
/// Matches greedily: iteration stops at the first failure (or at the upper
/// bound), and the whole parser succeeds when at least the lower bound was
/// collected, failing with the inner failure otherwise.
///
/// A match that consumes nothing ends the iteration rather than looping
/// forever; repetition only counts progress.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::repeat;
/// use sift::token::one_of;
///
/// let mut digits = repeat(1.., one_of("digit"));
/// let values: Vec<char> = digits.parse(Input::from("42x")).unwrap();
/// assert_eq!(values, vec!['4', '2']);
///
/// let mut exactly_two = repeat(2, one_of("digit"));
/// let short: Result<Vec<char>, _> = exactly_two.parse(Input::from("7"));
/// assert_eq!(short.unwrap_err().to_string(), "digit expected at 1:2");
/// ```
#[doc(alias = "many")]
#[doc(alias = "many0")]
#[doc(alias = "many1")]
pub fn repeat<'i, O, C, F>(occurrences: impl Into<Range>, mut parser: F) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    F: Parser<'i, O>,
{
    let (min, max) = occurrences.into().raw();
    trace("repeat", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let mut accumulated = C::initial(None);
        let mut count = 0;
        let mut failure = None;
        while count < max {
            let before = input.checkpoint();
            let remaining = input.eof_offset();
            match parser.parse_next(input) {
                Ok(value) => {
                    if input.eof_offset() == remaining {
                        input.reset(&before);
                        break;
                    }
                    accumulated.accumulate(value);
                    count += 1;
                }
                Err(error) => {
                    input.reset(&before);
                    failure = Some(error);
                    break;
                }
            }
        }
        if count < min {
            input.reset(&start);
            Err(failure
                .unwrap_or_else(|| Error::message("repetition made no progress", input.position())))
        } else {
            Ok(accumulated)
        }
    })
}

/// Repeat a parser, folding its outputs in place
///
/// Like [`repeat`] without building a container: `init` makes the seed and
/// `fold` absorbs each match.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::fold_repeat;
/// use sift::token::one_of;
///
/// let mut number = fold_repeat(
///     1..,
///     one_of("digit"),
///     || 0u32,
///     |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0),
/// );
/// assert_eq!(number.parse(Input::from("1234")).unwrap(), 1234);
/// ```
#[doc(alias = "reduce")]
pub fn fold_repeat<'i, O, A, F, Init, Fold>(
    occurrences: impl Into<Range>,
    mut parser: F,
    mut init: Init,
    mut fold: Fold,
) -> impl Parser<'i, A>
where
    F: Parser<'i, O>,
    Init: FnMut() -> A,
    Fold: FnMut(A, O) -> A,
{
    let (min, max) = occurrences.into().raw();
    trace("fold_repeat", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let mut accumulated = init();
        let mut count = 0;
        let mut failure = None;
        while count < max {
            let before = input.checkpoint();
            let remaining = input.eof_offset();
            match parser.parse_next(input) {
                Ok(value) => {
                    if input.eof_offset() == remaining {
                        input.reset(&before);
                        break;
                    }
                    accumulated = fold(accumulated, value);
                    count += 1;
                }
                Err(error) => {
                    input.reset(&before);
                    failure = Some(error);
                    break;
                }
            }
        }
        if count < min {
            input.reset(&start);
            Err(failure
                .unwrap_or_else(|| Error::message("repetition made no progress", input.position())))
        } else {
            Ok(accumulated)
        }
    })
}

/// [`Accumulate`] a parser until a terminator would match
///
/// Each round first tries `end` as a lookahead: when it matches, iteration
/// stops with the cursor still *before* the terminator. Otherwise `parser`
/// must match and make progress. A failure reports from the construct's
/// start.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::repeat_till;
/// use sift::token::{any, literal};
///
/// let mut body: Vec<char> = repeat_till(any, literal("end"))
///     .parse(Input::from("abend"))
///     .unwrap();
/// assert_eq!(body, vec!['a', 'b']);
/// ```
#[doc(alias = "many_until")]
pub fn repeat_till<'i, O, OE, C, F, G>(mut parser: F, mut end: G) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    F: Parser<'i, O>,
    G: Parser<'i, OE>,
{
    trace("repeat_till", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let mut accumulated = C::initial(None);
        loop {
            let here = input.checkpoint();
            if end.parse_next(input).is_ok() {
                input.reset(&here);
                return Ok(accumulated);
            }
            input.reset(&here);
            let remaining = input.eof_offset();
            match parser.parse_next(input) {
                Ok(value) => {
                    if input.eof_offset() == remaining {
                        input.reset(&start);
                        return Err(Error::message(
                            "repetition made no progress",
                            input.position(),
                        ));
                    }
                    accumulated.accumulate(value);
                }
                Err(error) => {
                    input.reset(&start);
                    return Err(error);
                }
            }
        }
    })
}

/// Greedily discard matches of `ignored`, then apply `next`
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::skip_many;
/// use sift::token::{one_of, take_while};
///
/// let mut word = skip_many(one_of("space"), take_while(1.., "alpha"));
/// assert_eq!(word.parse(Input::from("   hello")).unwrap(), "hello");
/// ```
pub fn skip_many<'i, O1, O2, F, G>(mut ignored: F, mut next: G) -> impl Parser<'i, O2>
where
    F: Parser<'i, O1>,
    G: Parser<'i, O2>,
{
    trace("skip_many", move |input: &mut Input<'i>| {
        loop {
            let here = input.checkpoint();
            let remaining = input.eof_offset();
            match ignored.parse_next(input) {
                Ok(_) if input.eof_offset() != remaining => {}
                _ => {
                    input.reset(&here);
                    break;
                }
            }
        }
        next.parse_next(input)
    })
}

/// [`Accumulate`] zero or more `parser` matches separated by `separator`
///
/// The separator only commits when another element follows; a trailing
/// separator is left unconsumed.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::separated0;
/// use sift::token::one_of;
///
/// let mut list = separated0(one_of("digit"), ',');
/// let values: Vec<char> = list.parse(Input::from("1,2,3,")).unwrap();
/// assert_eq!(values, vec!['1', '2', '3']);
///
/// let empty: Vec<char> = list.parse(Input::from("")).unwrap();
/// assert!(empty.is_empty());
/// ```
#[doc(alias = "sep")]
#[doc(alias = "separated_list0")]
pub fn separated0<'i, O, OS, C, P, S>(mut parser: P, mut separator: S) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    trace("separated0", move |input: &mut Input<'i>| {
        let mut accumulated = C::initial(None);
        let start = input.checkpoint();
        match parser.parse_next(input) {
            Ok(value) => accumulated.accumulate(value),
            Err(_) => {
                input.reset(&start);
                return Ok(accumulated);
            }
        }
        separated_tail(&mut parser, &mut separator, &mut accumulated, input);
        Ok(accumulated)
    })
}

/// [`Accumulate`] one or more `parser` matches separated by `separator`
///
/// Like [`separated0`], but the first element is mandatory; its failure is
/// the construct's failure, reported from the construct's start.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::separated1;
/// use sift::token::one_of;
///
/// let mut list = separated1(one_of("digit"), ',');
/// let missing: Result<Vec<char>, _> = list.parse(Input::from("x"));
/// assert_eq!(missing.unwrap_err().to_string(), "digit expected at 1:1");
/// ```
#[doc(alias = "sep1")]
#[doc(alias = "separated_list1")]
pub fn separated1<'i, O, OS, C, P, S>(mut parser: P, mut separator: S) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    trace("separated1", move |input: &mut Input<'i>| {
        let mut accumulated = C::initial(None);
        let start = input.checkpoint();
        match parser.parse_next(input) {
            Ok(value) => accumulated.accumulate(value),
            Err(error) => {
                input.reset(&start);
                return Err(error);
            }
        }
        separated_tail(&mut parser, &mut separator, &mut accumulated, input);
        Ok(accumulated)
    })
}

fn separated_tail<'i, O, OS, C, P, S>(
    parser: &mut P,
    separator: &mut S,
    accumulated: &mut C,
    input: &mut Input<'i>,
) where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    loop {
        let here = input.checkpoint();
        let remaining = input.eof_offset();
        if separator.parse_next(input).is_err() {
            input.reset(&here);
            return;
        }
        match parser.parse_next(input) {
            Ok(value) => {
                if input.eof_offset() == remaining {
                    input.reset(&here);
                    return;
                }
                accumulated.accumulate(value);
            }
            Err(_) => {
                input.reset(&here);
                return;
            }
        }
    }
}

/// Like [`separated0`], also allowing a trailing separator
///
/// After every element the separator commits as soon as it matches, whether
/// or not another element follows.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::separated_end0;
/// use sift::token::one_of;
///
/// let mut list = separated_end0(one_of("digit"), ',');
/// let (rest, values) = list.parse_peek(Input::from("1,2,")).unwrap();
/// let values: Vec<char> = values;
/// assert_eq!(values, vec!['1', '2']);
/// assert!(rest.is_empty());
/// ```
#[doc(alias = "sep_end")]
pub fn separated_end0<'i, O, OS, C, P, S>(mut parser: P, mut separator: S) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    trace("separated_end0", move |input: &mut Input<'i>| {
        let mut accumulated = C::initial(None);
        separated_end_tail(&mut parser, &mut separator, &mut accumulated, input);
        Ok(accumulated)
    })
}

/// Like [`separated_end0`], but the first element is mandatory
#[doc(alias = "sep_end1")]
pub fn separated_end1<'i, O, OS, C, P, S>(mut parser: P, mut separator: S) -> impl Parser<'i, C>
where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    trace("separated_end1", move |input: &mut Input<'i>| {
        let mut accumulated = C::initial(None);
        let start = input.checkpoint();
        match parser.parse_next(input) {
            Ok(value) => accumulated.accumulate(value),
            Err(error) => {
                input.reset(&start);
                return Err(error);
            }
        }
        let after_first = input.checkpoint();
        if separator.parse_next(input).is_err() {
            input.reset(&after_first);
            return Ok(accumulated);
        }
        separated_end_tail(&mut parser, &mut separator, &mut accumulated, input);
        Ok(accumulated)
    })
}

fn separated_end_tail<'i, O, OS, C, P, S>(
    parser: &mut P,
    separator: &mut S,
    accumulated: &mut C,
    input: &mut Input<'i>,
) where
    C: Accumulate<O>,
    P: Parser<'i, O>,
    S: Parser<'i, OS>,
{
    loop {
        let here = input.checkpoint();
        let remaining = input.eof_offset();
        match parser.parse_next(input) {
            Ok(value) => accumulated.accumulate(value),
            Err(_) => {
                input.reset(&here);
                return;
            }
        }
        let after_element = input.checkpoint();
        if separator.parse_next(input).is_err() {
            input.reset(&after_element);
            return;
        }
        if input.eof_offset() == remaining {
            return;
        }
    }
}

/// One or more `term`s folded left-associatively with `op`'s combiner
///
/// The operator parser yields the binary function applied between terms.
/// An operator match with no term after it fails the whole construct; a
/// left-associative grammar cannot end on an operator.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::chain_left1;
/// use sift::token::one_of;
///
/// let digit = one_of("digit").map(|c| c.to_digit(10).unwrap_or(0));
/// let minus = '-'.value(|a: u32, b: u32| a - b);
/// let mut subtraction = chain_left1(digit, minus);
/// // (9 - 3) - 2, not 9 - (3 - 2)
/// assert_eq!(subtraction.parse(Input::from("9-3-2")).unwrap(), 4);
/// ```
#[doc(alias = "chainl1")]
pub fn chain_left1<'i, O, C, F, Op>(mut term: F, mut op: Op) -> impl Parser<'i, O>
where
    F: Parser<'i, O>,
    Op: Parser<'i, C>,
    C: FnOnce(O, O) -> O,
{
    trace("chain_left1", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let mut accumulated = match term.parse_next(input) {
            Ok(value) => value,
            Err(error) => {
                input.reset(&start);
                return Err(error);
            }
        };
        loop {
            let here = input.checkpoint();
            let combine = match op.parse_next(input) {
                Ok(combine) => combine,
                Err(_) => {
                    input.reset(&here);
                    return Ok(accumulated);
                }
            };
            match term.parse_next(input) {
                Ok(value) => accumulated = combine(accumulated, value),
                Err(error) => {
                    input.reset(&start);
                    return Err(error);
                }
            }
        }
    })
}

/// One or more `term`s folded right-associatively with `op`'s combiner
///
/// Folding is deferred until the chain ends, then applied right to left.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::chain_right1;
/// use sift::token::one_of;
///
/// let digit = one_of("digit").map(|c| c.to_digit(10).unwrap_or(0));
/// let arrow = '^'.value(|a: u32, b: u32| a.pow(b));
/// let mut power = chain_right1(digit, arrow);
/// // 2 ^ (3 ^ 2)
/// assert_eq!(power.parse(Input::from("2^3^2")).unwrap(), 512);
/// ```
#[doc(alias = "chainr1")]
pub fn chain_right1<'i, O, C, F, Op>(mut term: F, mut op: Op) -> impl Parser<'i, O>
where
    F: Parser<'i, O>,
    Op: Parser<'i, C>,
    C: FnOnce(O, O) -> O,
{
    trace("chain_right1", move |input: &mut Input<'i>| {
        let start = input.checkpoint();
        let first = match term.parse_next(input) {
            Ok(value) => value,
            Err(error) => {
                input.reset(&start);
                return Err(error);
            }
        };
        let mut chain: Vec<(C, O)> = Vec::new();
        loop {
            let here = input.checkpoint();
            let combine = match op.parse_next(input) {
                Ok(combine) => combine,
                Err(_) => {
                    input.reset(&here);
                    break;
                }
            };
            match term.parse_next(input) {
                Ok(value) => chain.push((combine, value)),
                Err(error) => {
                    input.reset(&start);
                    return Err(error);
                }
            }
        }
        let Some((last_combine, last_value)) = chain.pop() else {
            return Ok(first);
        };
        let mut accumulated = last_value;
        let mut pending = last_combine;
        while let Some((combine, value)) = chain.pop() {
            accumulated = pending(value, accumulated);
            pending = combine;
        }
        Ok(pending(first, accumulated))
    })
}

/// Reverse the `Vec` produced by a parser
pub fn reversed<'i, O, F>(parser: F) -> impl Parser<'i, Vec<O>>
where
    F: Parser<'i, Vec<O>>,
{
    parser.map(|mut values| {
        values.reverse();
        values
    })
}
