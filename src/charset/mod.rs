//! Character-set descriptors
//!
//! The charset-taking primitives ([`one_of`][crate::token::one_of],
//! [`none_of`][crate::token::none_of], [`take_while`][crate::token::take_while])
//! accept anything that converts [`IntoCharset`]:
//!
//! - a `char`: that codepoint
//! - a `u32`: that codepoint by value
//! - an inclusive range: `'a'..='z'`, `0x30..=0x39`
//! - a class name: `"alpha"`, `"digit"`, `"Ll"`, `"lowercase_letter"`, ...
//! - a mix of the above, as a tuple, array, or `Vec`
//!
//! Nested mixes flatten; everything resolves by union. A malformed
//! descriptor (unknown name, inverted range, out-of-range codepoint) panics
//! at construction, never during a parse.
//!
//! ## Example
//!
//! ```rust
//! use sift::prelude::*;
//! use sift::token::one_of;
//!
//! let mut identifier_start = one_of(('a'..='z', 'A'..='Z', '_'));
//! assert_eq!(identifier_start.parse_peek(Input::from("x1")).unwrap().1, 'x');
//! ```

pub(crate) mod classes;

use core::fmt;

use crate::intervals::IntervalSet;
pub(crate) use classes::Table;

/// A normalized character-set descriptor
///
/// Keeps the parts the user wrote so failure messages can name classes
/// (`"lower expected"`) instead of dumping ranges; resolution to an
/// [`IntervalSet`] happens against the active encoding's registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charset {
    parts: Vec<CharsetPart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum CharsetPart {
    Single(char),
    Range(char, char),
    Named(&'static str),
}

impl Charset {
    fn from_parts(parts: Vec<CharsetPart>) -> Self {
        Self { parts }
    }

    /// Resolve against a registry table, unioning every part
    pub(crate) fn resolve(&self, table: Table) -> IntervalSet {
        let mut set = IntervalSet::new();
        for part in &self.parts {
            match *part {
                CharsetPart::Single(c) => set.insert(c as u32),
                CharsetPart::Range(min, max) => set.insert_range(min as u32, max as u32),
                CharsetPart::Named(name) => {
                    // validated at construction
                    if let Some(named) = classes::lookup(table, name) {
                        set = set.union(named);
                    }
                }
            }
        }
        set
    }

    /// The description used in `Expected` failures
    ///
    /// A lone codepoint renders as `` `c' ``, a lone class as its name,
    /// anything else as `one of ...`.
    pub(crate) fn expected_label(&self) -> String {
        match self.parts.as_slice() {
            [CharsetPart::Single(c)] => format!("`{c}'"),
            [CharsetPart::Named(name)] => (*name).to_owned(),
            _ => format!("one of {self}"),
        }
    }

    /// The description used by the negated primitive
    pub(crate) fn negated_label(&self) -> String {
        format!("not {self}")
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            match *part {
                CharsetPart::Single(c) => write!(f, "`{c}'")?,
                CharsetPart::Range(min, max) => write!(f, "`{min}'..`{max}'")?,
                CharsetPart::Named(name) => f.write_str(name)?,
            }
        }
        Ok(())
    }
}

/// Conversion into a [`Charset`] descriptor
///
/// # Panics
///
/// Conversions panic on malformed descriptors: an unknown class name, an
/// inverted range, or an integer outside the scalar-value range.
pub trait IntoCharset {
    /// Normalize into a charset
    fn into_charset(self) -> Charset;
}

impl IntoCharset for Charset {
    fn into_charset(self) -> Charset {
        self
    }
}

impl IntoCharset for char {
    fn into_charset(self) -> Charset {
        Charset::from_parts(vec![CharsetPart::Single(self)])
    }
}

impl IntoCharset for u32 {
    fn into_charset(self) -> Charset {
        let c = char::from_u32(self)
            .unwrap_or_else(|| panic!("{self:#X} is not a Unicode scalar value"));
        c.into_charset()
    }
}

impl IntoCharset for &'static str {
    fn into_charset(self) -> Charset {
        assert!(
            classes::is_known(self),
            "unknown character class `{self}`"
        );
        Charset::from_parts(vec![CharsetPart::Named(self)])
    }
}

impl IntoCharset for core::ops::RangeInclusive<char> {
    fn into_charset(self) -> Charset {
        let (min, max) = (*self.start(), *self.end());
        assert!(min <= max, "inverted range `{min}'..=`{max}'");
        Charset::from_parts(vec![CharsetPart::Range(min, max)])
    }
}

impl IntoCharset for core::ops::RangeInclusive<u32> {
    fn into_charset(self) -> Charset {
        let min = char::from_u32(*self.start())
            .unwrap_or_else(|| panic!("{:#X} is not a Unicode scalar value", self.start()));
        let max = char::from_u32(*self.end())
            .unwrap_or_else(|| panic!("{:#X} is not a Unicode scalar value", self.end()));
        (min..=max).into_charset()
    }
}

impl<T: IntoCharset, const N: usize> IntoCharset for [T; N] {
    fn into_charset(self) -> Charset {
        let mut parts = Vec::new();
        for member in self {
            parts.extend(member.into_charset().parts);
        }
        Charset::from_parts(parts)
    }
}

impl<T: IntoCharset> IntoCharset for Vec<T> {
    fn into_charset(self) -> Charset {
        let mut parts = Vec::new();
        for member in self {
            parts.extend(member.into_charset().parts);
        }
        Charset::from_parts(parts)
    }
}

macro_rules! impl_into_charset_for_tuple {
    ($($member:ident $idx:tt),+) => {
        impl<$($member: IntoCharset),+> IntoCharset for ($($member,)+) {
            fn into_charset(self) -> Charset {
                let mut parts = Vec::new();
                $(parts.extend(self.$idx.into_charset().parts);)+
                Charset::from_parts(parts)
            }
        }
    };
}

impl_into_charset_for_tuple!(A 0, B 1);
impl_into_charset_for_tuple!(A 0, B 1, C 2);
impl_into_charset_for_tuple!(A 0, B 1, C 2, D 3);
impl_into_charset_for_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_into_charset_for_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_label() {
        let set = 'a'.into_charset();
        assert_eq!(set.expected_label(), "`a'");
        assert!(set.resolve(Table::Unicode).contains('a' as u32));
    }

    #[test]
    fn named_class_label_is_the_name() {
        let set = "lower".into_charset();
        assert_eq!(set.expected_label(), "lower");
        assert!(set.resolve(Table::Unicode).contains('x' as u32));
        assert!(!set.resolve(Table::Unicode).contains('X' as u32));
    }

    #[test]
    fn mixed_descriptors_flatten_and_union() {
        let set = ('_', 'a'..='z', "digit").into_charset();
        assert_eq!(set.expected_label(), "one of `_', `a'..`z', digit");
        let resolved = set.resolve(Table::Unicode);
        assert!(resolved.contains('_' as u32));
        assert!(resolved.contains('q' as u32));
        assert!(resolved.contains('7' as u32));
        assert!(!resolved.contains('!' as u32));
    }

    #[test]
    fn nested_lists_flatten() {
        let set = vec![vec!['a'.into_charset(), ('0'..='9').into_charset()]].into_charset();
        let resolved = set.resolve(Table::Unicode);
        assert!(resolved.contains('a' as u32));
        assert!(resolved.contains('5' as u32));
    }

    #[test]
    fn duplicate_members_union_away() {
        let set = ('a', 'a', 'a'..='c').into_charset();
        let resolved = set.resolve(Table::Unicode);
        assert_eq!(resolved.iter().collect::<Vec<_>>(), vec![('a' as u32, 'c' as u32)]);
    }

    #[test]
    fn latin1_resolution_differs() {
        let set = "alpha".into_charset();
        assert!(set.resolve(Table::Latin1).contains(0xFC));
        assert!(set.resolve(Table::Latin1).iter().all(|(_, max)| max <= 0xFF));
        assert!(set.resolve(Table::Unicode).contains('λ' as u32));
    }

    #[test]
    #[should_panic(expected = "unknown character class")]
    fn unknown_name_panics_at_construction() {
        let _ = "no_such_class".into_charset();
    }

    #[test]
    #[should_panic(expected = "inverted range")]
    fn inverted_range_panics_at_construction() {
        let _ = ('z'..='a').into_charset();
    }
}
