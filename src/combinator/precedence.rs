//! Operator-precedence (Pratt) parsing
//!
//! [`precedence`] turns an operand parser plus a parser of operator
//! [descriptors][Affix] into an expression parser. Descriptors come from the
//! four builders — [`prefix`], [`postfix`], [`infix_left`], [`infix_right`] —
//! which attach a user precedence and a fold function to any operator
//! parser.
//!
//! A user precedence `p` is encoded into binding powers on the `2p` scale:
//! prefix binds at `2p`, postfix at `2p - 1`, left-associative infix at
//! `(2p - 1, 2p)` and right-associative infix at `(2p, 2p - 1)`. The climb
//! compares a single `power >= threshold`, and the left/right asymmetry of
//! the pairs is exactly what makes associativity fall out.

use std::rc::Rc;

use crate::error::PResult;
use crate::stream::Input;
use crate::trace::trace;
use crate::Parser;

/// An operator descriptor: shape, binding power, fold function
///
/// Produced by operator parsers built with [`prefix`], [`postfix`],
/// [`infix_left`] and [`infix_right`]; consumed by [`precedence`].
pub enum Affix<V> {
    /// A unary operator before its operand
    Prefix(u32, Rc<dyn Fn(V) -> V>),
    /// A unary operator after its operand
    Postfix(u32, Rc<dyn Fn(V) -> V>),
    /// A binary operator grouping to the left, `(left, right)` powers
    InfixLeft((u32, u32), Rc<dyn Fn(V, V) -> V>),
    /// A binary operator grouping to the right, `(left, right)` powers
    InfixRight((u32, u32), Rc<dyn Fn(V, V) -> V>),
}

impl<V> Clone for Affix<V> {
    fn clone(&self) -> Self {
        match self {
            Affix::Prefix(power, fold) => Affix::Prefix(*power, Rc::clone(fold)),
            Affix::Postfix(power, fold) => Affix::Postfix(*power, Rc::clone(fold)),
            Affix::InfixLeft(powers, fold) => Affix::InfixLeft(*powers, Rc::clone(fold)),
            Affix::InfixRight(powers, fold) => Affix::InfixRight(*powers, Rc::clone(fold)),
        }
    }
}

impl<V> core::fmt::Debug for Affix<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Affix::Prefix(power, _) => f.debug_tuple("Prefix").field(power).finish(),
            Affix::Postfix(power, _) => f.debug_tuple("Postfix").field(power).finish(),
            Affix::InfixLeft(powers, _) => f.debug_tuple("InfixLeft").field(powers).finish(),
            Affix::InfixRight(powers, _) => f.debug_tuple("InfixRight").field(powers).finish(),
        }
    }
}

/// Mark an operator parser as prefix at a precedence tier
///
/// `fold` builds the combined value from the operand.
pub fn prefix<'i, V, O, P, F>(mut op: P, precedence: u32, fold: F) -> impl Parser<'i, Affix<V>>
where
    P: Parser<'i, O>,
    F: Fn(V) -> V + 'static,
{
    assert!(precedence >= 1, "precedence tiers start at 1");
    let fold: Rc<dyn Fn(V) -> V> = Rc::new(fold);
    move |input: &mut Input<'i>| {
        let _ = op.parse_next(input)?;
        Ok(Affix::Prefix(2 * precedence, Rc::clone(&fold)))
    }
}

/// Mark an operator parser as postfix at a precedence tier
pub fn postfix<'i, V, O, P, F>(mut op: P, precedence: u32, fold: F) -> impl Parser<'i, Affix<V>>
where
    P: Parser<'i, O>,
    F: Fn(V) -> V + 'static,
{
    assert!(precedence >= 1, "precedence tiers start at 1");
    let fold: Rc<dyn Fn(V) -> V> = Rc::new(fold);
    move |input: &mut Input<'i>| {
        let _ = op.parse_next(input)?;
        Ok(Affix::Postfix(2 * precedence - 1, Rc::clone(&fold)))
    }
}

/// Mark an operator parser as left-associative infix at a precedence tier
///
/// `fold` combines the left and right operands.
pub fn infix_left<'i, V, O, P, F>(mut op: P, precedence: u32, fold: F) -> impl Parser<'i, Affix<V>>
where
    P: Parser<'i, O>,
    F: Fn(V, V) -> V + 'static,
{
    assert!(precedence >= 1, "precedence tiers start at 1");
    let fold: Rc<dyn Fn(V, V) -> V> = Rc::new(fold);
    move |input: &mut Input<'i>| {
        let _ = op.parse_next(input)?;
        Ok(Affix::InfixLeft(
            (2 * precedence - 1, 2 * precedence),
            Rc::clone(&fold),
        ))
    }
}

/// Mark an operator parser as right-associative infix at a precedence tier
pub fn infix_right<'i, V, O, P, F>(mut op: P, precedence: u32, fold: F) -> impl Parser<'i, Affix<V>>
where
    P: Parser<'i, O>,
    F: Fn(V, V) -> V + 'static,
{
    assert!(precedence >= 1, "precedence tiers start at 1");
    let fold: Rc<dyn Fn(V, V) -> V> = Rc::new(fold);
    move |input: &mut Input<'i>| {
        let _ = op.parse_next(input)?;
        Ok(Affix::InfixRight(
            (2 * precedence, 2 * precedence - 1),
            Rc::clone(&fold),
        ))
    }
}

/// Parse an expression from an operand parser and operator descriptors
///
/// Precedence climbing: operands and operators alternate, and an operator
/// only applies while its binding power stays at or above the threshold set
/// by the operator above it. Combine multiple operators with
/// [`alt`][crate::combinator::alt].
///
/// This is the designated mechanism for left-associative grammars; raw
/// left recursion is not supported.
///
/// # Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::{alt, infix_left, infix_right, precedence, prefix};
/// use sift::token::one_of;
///
/// let digit = one_of("digit").map(|c| i64::from(c.to_digit(10).unwrap_or(0)));
/// let mut expr = precedence(
///     digit,
///     alt((
///         infix_left('+', 2, |a, b| a + b),
///         infix_left('*', 3, |a, b| a * b),
///         infix_right('^', 4, |a: i64, b| a.pow(b as u32)),
///         prefix('-', 5, |a: i64| -a),
///     )),
/// );
///
/// assert_eq!(expr.parse(Input::from("1+2*3")).unwrap(), 7);
/// assert_eq!(expr.parse(Input::from("2^3^2")).unwrap(), 512);
/// assert_eq!(expr.parse(Input::from("-2+3")).unwrap(), 1);
/// ```
pub fn precedence<'i, V, T, Op>(mut term: T, mut op: Op) -> impl Parser<'i, V>
where
    T: Parser<'i, V>,
    Op: Parser<'i, Affix<V>>,
{
    trace("precedence", move |input: &mut Input<'i>| {
        climb(&mut term, &mut op, input, 0)
    })
}

fn climb<'i, V, T, Op>(
    term: &mut T,
    op: &mut Op,
    input: &mut Input<'i>,
    threshold: u32,
) -> PResult<V>
where
    T: Parser<'i, V>,
    Op: Parser<'i, Affix<V>>,
{
    let start = input.checkpoint();
    let mut value = match term.parse_next(input) {
        Ok(value) => value,
        Err(term_error) => {
            // no operand here; the only legal opener is a prefix operator
            input.reset(&start);
            let remaining = input.eof_offset();
            match op.parse_next(input) {
                Ok(Affix::Prefix(power, fold)) => {
                    if input.eof_offset() == remaining {
                        input.reset(&start);
                        return Err(term_error);
                    }
                    let operand = climb(term, op, input, power)?;
                    fold(operand)
                }
                Ok(_) => {
                    input.reset(&start);
                    return Err(term_error);
                }
                Err(op_error) => {
                    input.reset(&start);
                    // the missing operand is the diagnosis, unless the
                    // operator parser got further into the input
                    let position = input.position();
                    return Err(if op_error.position() > position {
                        op_error
                    } else {
                        term_error
                    });
                }
            }
        }
    };
    loop {
        let here = input.checkpoint();
        let remaining = input.eof_offset();
        let affix = match op.parse_next(input) {
            Ok(affix) => affix,
            Err(_) => {
                input.reset(&here);
                break;
            }
        };
        if input.eof_offset() == remaining {
            // an operator that consumed nothing would climb forever
            input.reset(&here);
            break;
        }
        match affix {
            Affix::Postfix(power, fold) => {
                if power < threshold {
                    input.reset(&here);
                    break;
                }
                value = fold(value);
            }
            Affix::InfixLeft((left, right), fold) | Affix::InfixRight((left, right), fold) => {
                if left < threshold {
                    input.reset(&here);
                    break;
                }
                let rhs = climb(term, op, input, right)?;
                value = fold(value, rhs);
            }
            Affix::Prefix(..) => {
                input.reset(&here);
                break;
            }
        }
    }
    Ok(value)
}
