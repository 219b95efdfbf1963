//! Parser execution tracing
//!
//! With the `debug` feature enabled, every built-in combinator logs its
//! entry, the input it saw, and how it resolved to stderr, indented by call
//! depth. Without the feature, [`trace`] compiles down to the parser it
//! wraps.

#[cfg(feature = "debug")]
mod internals;

use crate::stream::Input;
use crate::Parser;

/// Trace the execution of the parser
///
/// Named combinators in this crate wrap themselves in `trace`; wrap your own
/// grammar rules to see them in the trace too.
///
/// ```rust
/// use sift::prelude::*;
/// use sift::combinator::repeat;
/// use sift::trace::trace;
/// use sift::token::one_of;
///
/// let mut digits = trace("digits", repeat(1.., one_of("digit")));
/// let parsed: Vec<char> = digits.parse(Input::from("12")).unwrap();
/// assert_eq!(parsed, vec!['1', '2']);
/// ```
#[cfg_attr(not(feature = "debug"), allow(unused_variables))]
pub fn trace<'i, O>(
    name: impl core::fmt::Display,
    mut parser: impl Parser<'i, O>,
) -> impl Parser<'i, O> {
    #[cfg(feature = "debug")]
    {
        let mut call_count = 0;
        move |input: &mut Input<'i>| {
            let depth = internals::Depth::new();
            let original = *input;
            internals::start(*depth, &name, call_count, &original);

            let result = parser.parse_next(input);

            let consumed = original.eof_offset() - input.eof_offset();
            internals::end(*depth, &name, call_count, consumed, result.is_ok());
            call_count += 1;

            result
        }
    }
    #[cfg(not(feature = "debug"))]
    {
        move |input: &mut Input<'i>| parser.parse_next(input)
    }
}
