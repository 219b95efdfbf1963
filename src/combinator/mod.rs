//! # List of parsers and combinators
//!
//! **Note**: this list is meant to provide a nicer overview of the whole
//! surface than the raw alphabetical docs.
//!
//! ## Basic elements
//!
//! Parsers recognizing specific codepoints, in [`token`][crate::token]:
//!
//! | combinator | usage | output |
//! |---|---|---|
//! | [`any`][crate::token::any] | `any` | the next codepoint |
//! | [`one_of`][crate::token::one_of] | `one_of(('a'..='z', "digit"))` | a codepoint in a [charset][crate::charset] |
//! | [`none_of`][crate::token::none_of] | `none_of('"')` | a codepoint outside a charset |
//! | [`satisfy`][crate::token::satisfy] | `satisfy(\|c\| c != ';')` | a codepoint passing a predicate |
//! | [`literal`][crate::token::literal] | `literal("if")`, or just `"if"` | a fixed string |
//! | [`eof`][crate::token::eof] | `eof` | `()` at end of input |
//! | [`take_while`][crate::token::take_while] | `take_while(1.., "alpha")` | a `String` of charset matches |
//!
//! ## Choice and lookahead
//!
//! | combinator | usage |
//! |---|---|
//! | [`alt`] | try alternatives in order from the same spot; merged failure |
//! | [`opt`] | make a parser optional |
//! | [`peek`] | match without consuming |
//! | [`not`] | succeed only when the inner parser fails; consumes nothing |
//!
//! ## Sequencing
//!
//! Tuples of parsers are parsers producing tuples: `("foo", "bar").parse(..)`.
//!
//! | combinator | kept |
//! |---|---|
//! | [`preceded`] | second |
//! | [`terminated`] | first |
//! | [`delimited`] | middle |
//! | [`separated_pair`] | first and third |
//! | [`cons`], [`concat`] | `Vec` shapes |
//! | [`cons_char`], [`append_char`], [`concat_str`] | `String` shapes |
//! | [`map2`] | `f(first, second)` |
//!
//! ## Repetition
//!
//! Every bound is an [`Into<Range>`][crate::stream::Range]: `3`, `(1, 5)`,
//! `1..=5`, `0..`, `..`.
//!
//! | combinator | usage |
//! |---|---|
//! | [`repeat`] | greedy repetition into any [`Accumulate`][crate::stream::Accumulate] container |
//! | [`fold_repeat`] | repetition folded in place |
//! | [`repeat_till`] | repeat until a terminator would match (terminator stays unconsumed) |
//! | [`skip_many`] | discard repetitions, then parse what follows |
//! | [`separated0`], [`separated1`] | list with separators, no trailing separator |
//! | [`separated_end0`], [`separated_end1`] | list allowing a trailing separator |
//! | [`chain_left1`], [`chain_right1`] | operator folding, the operator parser yields the combiner |
//! | [`reversed`] | reverse a `Vec` output |
//!
//! ## Expressions
//!
//! [`precedence`] parses prefix/postfix/infix operator grammars from an
//! operand parser and operator descriptors built with [`prefix`],
//! [`postfix`], [`infix_left`], [`infix_right`].
//!
//! ## Escape hatches
//!
//! [`external`] adapts a plain `&str -> (value, rest)` function;
//! [`fragment`] adapts a [`ParseFragment`] type; [`fail`] always fails with
//! a message; [`success`]/[`empty`]/[`empty_list`] consume nothing.

mod branch;
mod core;
mod multi;
mod parser;
mod precedence;
mod sequence;

#[cfg(test)]
mod tests;

pub use self::branch::{alt, Alt};
pub use self::core::{
    empty, empty_list, external, fail, fragment, not, opt, peek, success, ParseFragment,
};
pub use self::multi::{
    chain_left1, chain_right1, fold_repeat, repeat, repeat_till, reversed, separated0, separated1,
    separated_end0, separated_end1, skip_many,
};
pub use self::parser::{ByRef, FlatMap, Label, Map, Tag, Value, Verify};
pub use self::precedence::{infix_left, infix_right, postfix, precedence, prefix, Affix};
pub use self::sequence::{
    append_char, concat, concat_str, cons, cons_char, delimited, map2, preceded, separated_pair,
    terminated,
};
