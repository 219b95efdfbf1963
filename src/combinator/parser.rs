use core::marker::PhantomData;

use crate::error::{Error, PResult};
use crate::stream::Input;
use crate::Parser;

/// Implementation of [`Parser::by_ref`]
pub struct ByRef<'p, P: ?Sized> {
    parser: &'p mut P,
}

impl<'p, P: ?Sized> ByRef<'p, P> {
    pub(crate) fn new(parser: &'p mut P) -> Self {
        Self { parser }
    }
}

impl<'i, 'p, O, P> Parser<'i, O> for ByRef<'p, P>
where
    P: Parser<'i, O> + ?Sized,
{
    #[inline(always)]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O> {
        self.parser.parse_next(input)
    }
}

/// Implementation of [`Parser::map`]
pub struct Map<F, G, O> {
    parser: F,
    map: G,
    o: PhantomData<O>,
}

impl<F, G, O> Map<F, G, O> {
    pub(crate) fn new(parser: F, map: G) -> Self {
        Self {
            parser,
            map,
            o: PhantomData,
        }
    }
}

impl<'i, F, G, O, O2> Parser<'i, O2> for Map<F, G, O>
where
    F: Parser<'i, O>,
    G: FnMut(O) -> O2,
{
    #[inline]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O2> {
        self.parser.parse_next(input).map(&mut self.map)
    }
}

/// Implementation of [`Parser::value`]
pub struct Value<F, O, O2> {
    parser: F,
    value: O2,
    o: PhantomData<O>,
}

impl<F, O, O2> Value<F, O, O2> {
    pub(crate) fn new(parser: F, value: O2) -> Self {
        Self {
            parser,
            value,
            o: PhantomData,
        }
    }
}

impl<'i, F, O, O2> Parser<'i, O2> for Value<F, O, O2>
where
    F: Parser<'i, O>,
    O2: Clone,
{
    #[inline]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O2> {
        self.parser.parse_next(input).map(|_| self.value.clone())
    }
}

/// Implementation of [`Parser::tag`]
pub struct Tag<F, T> {
    parser: F,
    tag: T,
}

impl<F, T> Tag<F, T> {
    pub(crate) fn new(parser: F, tag: T) -> Self {
        Self { parser, tag }
    }
}

impl<'i, F, T, O> Parser<'i, (T, O)> for Tag<F, T>
where
    F: Parser<'i, O>,
    T: Clone,
{
    #[inline]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<(T, O)> {
        let output = self.parser.parse_next(input)?;
        Ok((self.tag.clone(), output))
    }
}

/// Implementation of [`Parser::verify`]
pub struct Verify<F, G> {
    parser: F,
    predicate: G,
}

impl<F, G> Verify<F, G> {
    pub(crate) fn new(parser: F, predicate: G) -> Self {
        Self { parser, predicate }
    }
}

impl<'i, F, G, O> Parser<'i, O> for Verify<F, G>
where
    F: Parser<'i, O>,
    G: FnMut(&O) -> bool,
    O: core::fmt::Debug,
{
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O> {
        let start = input.checkpoint();
        let position = input.position();
        let output = self.parser.parse_next(input)?;
        if (self.predicate)(&output) {
            Ok(output)
        } else {
            input.reset(&start);
            Err(Error::message(
                format!("`{output:?}' failed predicate"),
                position,
            ))
        }
    }
}

/// Implementation of [`Parser::flat_map`]
pub struct FlatMap<F, G, O> {
    parser: F,
    build: G,
    o: PhantomData<O>,
}

impl<F, G, O> FlatMap<F, G, O> {
    pub(crate) fn new(parser: F, build: G) -> Self {
        Self {
            parser,
            build,
            o: PhantomData,
        }
    }
}

impl<'i, F, G, H, O, O2> Parser<'i, O2> for FlatMap<F, G, O>
where
    F: Parser<'i, O>,
    G: FnMut(O) -> H,
    H: Parser<'i, O2>,
{
    #[inline]
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O2> {
        let output = self.parser.parse_next(input)?;
        (self.build)(output).parse_next(input)
    }
}

/// Implementation of [`Parser::label`]
pub struct Label<F> {
    parser: F,
    name: String,
}

impl<F> Label<F> {
    pub(crate) fn new(parser: F, name: String) -> Self {
        Self { parser, name }
    }
}

impl<'i, F, O> Parser<'i, O> for Label<F>
where
    F: Parser<'i, O>,
{
    fn parse_next(&mut self, input: &mut Input<'i>) -> PResult<O> {
        let start = input.checkpoint();
        let position = input.position();
        match self.parser.parse_next(input) {
            Ok(output) => Ok(output),
            // a failure that got further in is more informative than the
            // generic name
            Err(error) if error.position() > position => Err(error),
            Err(_) => {
                input.reset(&start);
                Err(Error::expected(self.name.clone(), position))
            }
        }
    }
}
