//! # Error management
//!
//! Failures carry two things: what went wrong ([`ErrorCause`]) and the
//! codepoint position where the diagnosis is meaningful — usually where
//! matching failed, not where the enclosing construct started.
//!
//! [`alt`][crate::combinator::alt] merges sibling failures with
//! [`Error::or`]: the furthest position wins, and two `Expected` failures at
//! the same position join into one `"a or b"` description. This
//! longest-match heuristic keeps messages actionable in hand-written
//! grammars.
//!
//! User-visible rendering happens exactly once, at [`Parser::parse`]: the
//! returned [`ParseError`] owns the original input and displays
//! `"<message> at <line>:<col>"` with 1-based coordinates and tab expansion.
//!
//! [`Parser::parse`]: crate::Parser::parse

use core::fmt;

use crate::stream::Input;

/// Holds the result of a [`Parser`][crate::Parser]
///
/// - `Ok(O)` is the parsed value; the input was advanced past it
/// - `Err(Error)` is a positioned failure
pub type PResult<O> = Result<O, Error>;

/// Rendered for the end of input, in both `Expected` and `Unexpected` roles
pub(crate) const EOF_DESCRIPTION: &str = "end of input";

/// What a failure is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCause {
    /// The parser wanted a specific construct and did not find it
    Expected(String),
    /// The parser found something it disallows
    Unexpected(String),
    /// Free-form, from [`fail`][crate::combinator::fail], predicate
    /// rejections, and external adapters
    Message(String),
}

/// A positioned parse failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    cause: ErrorCause,
    position: usize,
}

impl Error {
    /// An `Expected` failure at a codepoint position
    #[inline]
    pub fn expected(description: impl Into<String>, position: usize) -> Self {
        Self {
            cause: ErrorCause::Expected(description.into()),
            position,
        }
    }

    /// An `Unexpected` failure at a codepoint position
    #[inline]
    pub fn unexpected(description: impl Into<String>, position: usize) -> Self {
        Self {
            cause: ErrorCause::Unexpected(description.into()),
            position,
        }
    }

    /// A free-form failure at a codepoint position
    #[inline]
    pub fn message(text: impl Into<String>, position: usize) -> Self {
        Self {
            cause: ErrorCause::Message(text.into()),
            position,
        }
    }

    /// What the failure is about
    #[inline]
    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }

    /// The codepoint position of the failure
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Combine failures from two parse branches
    ///
    /// Two `Expected` failures at the same position merge their
    /// descriptions with `" or "`; otherwise the failure that got further
    /// wins, and `other` wins ties.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (
                Error {
                    cause: ErrorCause::Expected(first),
                    position,
                },
                Error {
                    cause: ErrorCause::Expected(second),
                    position: other_position,
                },
            ) if position == other_position => Error {
                cause: ErrorCause::Expected(format!("{first} or {second}")),
                position,
            },
            (this, other) => {
                if this.position > other.position {
                    this
                } else {
                    other
                }
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            ErrorCause::Expected(description) => write!(f, "{description} expected"),
            ErrorCause::Unexpected(description) => write!(f, "unexpected {description}"),
            ErrorCause::Message(text) => f.write_str(text),
        }
    }
}

impl std::error::Error for Error {}

/// Tab stops expand to the next multiple of this many columns
pub const DEFAULT_TAB_SIZE: usize = 8;

/// A failure returned from [`Parser::parse`][crate::Parser::parse], bound to
/// its source input
///
/// `Display` renders `"<message> at <line>:<col>"` with 1-based line and
/// column, expanding tabs to [`DEFAULT_TAB_SIZE`]-column stops; use
/// [`render`][ParseError::render] for a different tab size.
///
/// ## Example
///
/// ```rust
/// use sift::prelude::*;
/// use sift::token::one_of;
///
/// let err = one_of("lower").parse(Input::from("")).unwrap_err();
/// assert_eq!(err.to_string(), "lower expected at 1:1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'i> {
    input: Input<'i>,
    error: Error,
}

impl<'i> ParseError<'i> {
    pub(crate) fn new(input: Input<'i>, error: Error) -> Self {
        Self { input, error }
    }

    /// The underlying positioned failure
    #[inline]
    pub fn inner(&self) -> &Error {
        &self.error
    }

    /// The codepoint position of the failure
    #[inline]
    pub fn position(&self) -> usize {
        self.error.position()
    }

    /// The 1-based line and column of the failure
    ///
    /// Walks the source up to the failure position: a newline starts the
    /// next line, a tab advances the column to the next multiple of
    /// `tab_size`, and every other codepoint is one column wide.
    pub fn line_column(&self, tab_size: usize) -> (usize, usize) {
        let tab_size = tab_size.max(1);
        let mut cursor = self.input;
        let mut line = 1;
        let mut column = 1;
        let mut remaining = self.error.position();
        while remaining > 0 {
            let Some(token) = cursor.next_token() else {
                break;
            };
            match token {
                '\n' => {
                    line += 1;
                    column = 1;
                }
                '\t' => column = ((column - 1) / tab_size + 1) * tab_size + 1,
                _ => column += 1,
            }
            remaining -= 1;
        }
        (line, column)
    }

    /// Render the full message with an explicit tab size
    pub fn render(&self, tab_size: usize) -> String {
        let (line, column) = self.line_column(tab_size);
        format!("{} at {line}:{column}", self.error)
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_TAB_SIZE))
    }
}

impl std::error::Error for ParseError<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_merges_at_equal_positions() {
        let merged = Error::expected("`a'", 3).or(Error::expected("`b'", 3));
        assert_eq!(merged, Error::expected("`a' or `b'", 3));
    }

    #[test]
    fn furthest_failure_wins() {
        let deep = Error::expected("`a'", 7);
        let shallow = Error::expected("`b'", 2);
        assert_eq!(deep.clone().or(shallow.clone()), deep);
        assert_eq!(shallow.or(deep.clone()), deep);
    }

    #[test]
    fn unmergeable_ties_are_right_biased() {
        let first = Error::unexpected("`a'", 3);
        let second = Error::message("nope", 3);
        assert_eq!(first.or(second.clone()), second);
    }

    #[test]
    fn cause_rendering() {
        assert_eq!(Error::expected("digit", 0).to_string(), "digit expected");
        assert_eq!(
            Error::unexpected(EOF_DESCRIPTION, 0).to_string(),
            "unexpected end of input"
        );
        assert_eq!(Error::message("oops", 0).to_string(), "oops");
    }

    fn rendered(source: &str, position: usize) -> String {
        ParseError::new(Input::from(source), Error::expected("x", position)).to_string()
    }

    #[test]
    fn line_and_column_are_one_based() {
        assert_eq!(rendered("abc", 0), "x expected at 1:1");
        assert_eq!(rendered("abc", 2), "x expected at 1:3");
    }

    #[test]
    fn newlines_reset_the_column() {
        let source = "one\ntwo\nthree";
        assert_eq!(rendered(source, 4), "x expected at 2:1");
        assert_eq!(rendered(source, 6), "x expected at 2:3");
        assert_eq!(rendered(source, 8), "x expected at 3:1");
    }

    #[test]
    fn tabs_expand_to_the_next_stop() {
        // column after a leading tab is 9 with the default tab size
        assert_eq!(rendered("\tx", 1), "x expected at 1:9");
        // a tab mid-line jumps to the next multiple
        assert_eq!(rendered("ab\tx", 3), "x expected at 1:9");
        // small custom tab size
        let err = ParseError::new(Input::from("\tx"), Error::expected("x", 1));
        assert_eq!(err.render(4), "x expected at 1:5");
    }

    #[test]
    fn positions_count_codepoints_not_bytes() {
        assert_eq!(rendered("über", 2), "x expected at 1:3");
    }

    #[test]
    fn position_past_the_input_clamps_to_the_end() {
        assert_eq!(rendered("ab", 10), "x expected at 1:3");
    }
}
