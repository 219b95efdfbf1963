//! # sift, parsing text codepoint by codepoint
//!
//! sift is a parser combinator library for character-level grammars,
//! supporting:
//! - Latin-1, UTF-8, UTF-16 and UTF-32 input, parsed under a codepoint
//!   cursor (positions count codepoints, never bytes)
//! - named character classes — POSIX names and Unicode general categories —
//!   backed by [interval sets][intervals]
//! - operator-precedence (Pratt) expression parsing with
//!   [`precedence`][combinator::precedence]
//! - failure messages positioned as `line:col`, merged across alternatives
//!   so the furthest, most specific diagnosis wins
//!
//! ## Example
//!
//! ```rust
//! use sift::combinator::{delimited, separated1};
//! use sift::prelude::*;
//! use sift::token::one_of;
//!
//! fn digits(input: &mut Input<'_>) -> PResult<u32> {
//!     let digit = one_of("digit").map(|c| c.to_digit(10).unwrap_or(0));
//!     sift::combinator::fold_repeat(1.., digit, || 0, |acc, d| acc * 10 + d)
//!         .parse_next(input)
//! }
//!
//! let mut list = delimited('[', separated1(digits, ','), ']');
//! let parsed: Vec<u32> = list.parse(Input::from("[1,22,333]")).unwrap();
//! assert_eq!(parsed, vec![1, 22, 333]);
//! // the list backtracks off the dangling separator, so the close bracket
//! // is what goes missing
//! assert_eq!(
//!     list.parse(Input::from("[1,x]")).unwrap_err().to_string(),
//!     "`]' expected at 1:3"
//! );
//! ```
//!
//! ## Parsers
//!
//! A parser is any value implementing [`Parser`], most often a closure of
//! shape `FnMut(&mut Input<'i>) -> PResult<O>`. Bare `char` and `&str`
//! values are parsers matching themselves, and tuples of parsers are
//! parsers producing tuples.
//!
//! Composition happens through the [`Parser`] methods and the free
//! functions in [`combinator`]; the
//! ["choose a combinator" overview][combinator] lists the whole surface.
//!
//! Backtracking is unconditional: when a branch of
//! [`alt`][combinator::alt] fails, the cursor returns to where the branch
//! started, however far the branch got. There is no commit/cut operator;
//! grammars choose backtracking points with `alt` alone.
//!
//! ## Debugging
//!
//! The `debug` feature traces every combinator's entry and outcome to
//! stderr; see [`trace`][trace::trace].

#![deny(missing_docs)]

pub mod charset;
pub mod combinator;
pub mod error;
pub mod intervals;
mod parser;
pub mod stream;
pub mod token;
pub mod trace;

pub use self::parser::Parser;

/// Core concepts available for glob import
///
/// ## Example
///
/// ```rust
/// use sift::prelude::*;
///
/// fn parse_word(input: &mut Input<'_>) -> PResult<String> {
///     sift::token::take_while(1.., "alpha").parse_next(input)
/// }
///
/// assert_eq!(parse_word.parse(Input::from("hi")).unwrap(), "hi");
/// ```
pub mod prelude {
    pub use crate::error::PResult;
    pub use crate::error::ParseError;
    pub use crate::stream::Encoding;
    pub use crate::stream::Input;
    pub use crate::Parser;
}
