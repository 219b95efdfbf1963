use crate::error::{Error, PResult};
use crate::stream::Input;
use crate::trace::trace;
use crate::Parser;

/// Helper trait for the [`alt()`] combinator
///
/// This trait is implemented for tuples of up to 9 elements; nest `alt`
/// calls for more alternatives.
pub trait Alt<'i, O> {
    /// Tests each parser in the tuple and returns the result of the first
    /// one that succeeds
    fn choice(&mut self, input: &mut Input<'i>) -> PResult<O>;
}

/// Tests a list of parsers one by one until one succeeds
///
/// Every branch starts from the same spot: a branch that fails is fully
/// backtracked before the next one runs, no matter how far it got. When all
/// branches fail, their failures merge with [`Error::or`] — the furthest
/// one wins, and `Expected` siblings at the same position join into one
/// `"a or b"` description.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::alt;
/// use sift::token::literal;
///
/// let mut keyword = alt((literal("if"), literal("else"), literal("while")));
/// assert_eq!(keyword.parse(Input::from("else")).unwrap(), "else");
///
/// let mut bit = alt(('0', '1'));
/// assert_eq!(
///     bit.parse(Input::from("2")).unwrap_err().to_string(),
///     "`0' or `1' expected at 1:1"
/// );
/// ```
pub fn alt<'i, O, List>(mut alternatives: List) -> impl Parser<'i, O>
where
    List: Alt<'i, O>,
{
    trace("alt", move |input: &mut Input<'i>| {
        alternatives.choice(input)
    })
}

impl<'i, O, P1> Alt<'i, O> for (P1,)
where
    P1: Parser<'i, O>,
{
    fn choice(&mut self, input: &mut Input<'i>) -> PResult<O> {
        self.0.parse_next(input)
    }
}

macro_rules! alt_trait_impl {
    ($($parser:ident $idx:tt),+) => {
        impl<'i, Output, P0, $($parser),+> Alt<'i, Output> for (P0, $($parser,)+)
        where
            P0: Parser<'i, Output>,
            $($parser: Parser<'i, Output>),+
        {
            fn choice(&mut self, input: &mut Input<'i>) -> PResult<Output> {
                let start = input.checkpoint();
                let mut error = match self.0.parse_next(input) {
                    Ok(output) => return Ok(output),
                    Err(error) => error,
                };
                $(
                    input.reset(&start);
                    match self.$idx.parse_next(input) {
                        Ok(output) => return Ok(output),
                        Err(next) => error = Error::or(error, next),
                    }
                )+
                input.reset(&start);
                Err(error)
            }
        }
    };
}

alt_trait_impl!(P1 1);
alt_trait_impl!(P1 1, P2 2);
alt_trait_impl!(P1 1, P2 2, P3 3);
alt_trait_impl!(P1 1, P2 2, P3 3, P4 4);
alt_trait_impl!(P1 1, P2 2, P3 3, P4 4, P5 5);
alt_trait_impl!(P1 1, P2 2, P3 3, P4 4, P5 5, P6 6);
alt_trait_impl!(P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7);
alt_trait_impl!(P1 1, P2 2, P3 3, P4 4, P5 5, P6 6, P7 7, P8 8);
