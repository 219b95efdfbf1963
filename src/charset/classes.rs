//! Named character-class registries
//!
//! Two process-wide immutable tables, built lazily on first use:
//!
//! - the Latin-1 table: the POSIX class names over `0..=0xFF`, plus every
//!   Unicode name clipped to that universe;
//! - the Unicode table: the POSIX names derived from general categories,
//!   plus the 30 general categories under both their short (`Lu`) and long
//!   (`uppercase_letter`) names.

use std::collections::HashMap;
use std::sync::OnceLock;

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::intervals::IntervalSet;

/// Which registry names resolve against
///
/// Latin-1 input uses the Latin-1 table; every other encoding uses the
/// Unicode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Latin1,
    Unicode,
}

impl Table {
    pub(crate) fn for_encoding(encoding: crate::stream::Encoding) -> Self {
        match encoding {
            crate::stream::Encoding::Latin1 => Table::Latin1,
            _ => Table::Unicode,
        }
    }
}

/// Resolve a class name against a table
pub(crate) fn lookup(table: Table, name: &str) -> Option<&'static IntervalSet> {
    match table {
        Table::Latin1 => latin1_registry().get(name),
        Table::Unicode => unicode_registry().get(name),
    }
}

/// Whether `name` resolves in any table
pub(crate) fn is_known(name: &str) -> bool {
    unicode_registry().contains_key(name)
}

const MAX_SCALAR: u32 = 0x10FFFF;

/// The 30 general categories: short name, long name, crate category
#[rustfmt::skip]
const CATEGORIES: [(&str, &str, GeneralCategory); 30] = [
    ("Lu", "uppercase_letter",      GeneralCategory::UppercaseLetter),
    ("Ll", "lowercase_letter",      GeneralCategory::LowercaseLetter),
    ("Lt", "titlecase_letter",      GeneralCategory::TitlecaseLetter),
    ("Lm", "modifier_letter",       GeneralCategory::ModifierLetter),
    ("Lo", "other_letter",          GeneralCategory::OtherLetter),
    ("Mn", "nonspacing_mark",       GeneralCategory::NonspacingMark),
    ("Mc", "spacing_mark",          GeneralCategory::SpacingMark),
    ("Me", "enclosing_mark",        GeneralCategory::EnclosingMark),
    ("Nd", "decimal_number",        GeneralCategory::DecimalNumber),
    ("Nl", "letter_number",         GeneralCategory::LetterNumber),
    ("No", "other_number",          GeneralCategory::OtherNumber),
    ("Pc", "connector_punctuation", GeneralCategory::ConnectorPunctuation),
    ("Pd", "dash_punctuation",      GeneralCategory::DashPunctuation),
    ("Ps", "open_punctuation",      GeneralCategory::OpenPunctuation),
    ("Pe", "close_punctuation",     GeneralCategory::ClosePunctuation),
    ("Pi", "initial_punctuation",   GeneralCategory::InitialPunctuation),
    ("Pf", "final_punctuation",     GeneralCategory::FinalPunctuation),
    ("Po", "other_punctuation",     GeneralCategory::OtherPunctuation),
    ("Sm", "math_symbol",           GeneralCategory::MathSymbol),
    ("Sc", "currency_symbol",       GeneralCategory::CurrencySymbol),
    ("Sk", "modifier_symbol",       GeneralCategory::ModifierSymbol),
    ("So", "other_symbol",          GeneralCategory::OtherSymbol),
    ("Zs", "space_separator",       GeneralCategory::SpaceSeparator),
    ("Zl", "line_separator",        GeneralCategory::LineSeparator),
    ("Zp", "paragraph_separator",   GeneralCategory::ParagraphSeparator),
    ("Cc", "control",               GeneralCategory::Control),
    ("Cf", "format",                GeneralCategory::Format),
    ("Cs", "surrogate",             GeneralCategory::Surrogate),
    ("Co", "private_use",           GeneralCategory::PrivateUse),
    ("Cn", "unassigned",            GeneralCategory::Unassigned),
];

fn category_index(category: GeneralCategory) -> usize {
    CATEGORIES
        .iter()
        .position(|&(_, _, c)| c == category)
        .unwrap_or(CATEGORIES.len() - 1)
}

fn unicode_registry() -> &'static HashMap<&'static str, IntervalSet> {
    static REGISTRY: OnceLock<HashMap<&'static str, IntervalSet>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        // One sweep over the scalar values, extending a run per category.
        let mut runs: Vec<Vec<(u32, u32)>> = vec![Vec::new(); CATEGORIES.len()];
        for c in '\0'..=char::MAX {
            let value = c as u32;
            let run = &mut runs[category_index(get_general_category(c))];
            match run.last_mut() {
                Some(last) if last.1 + 1 == value => last.1 = value,
                _ => run.push((value, value)),
            }
        }
        let mut sets: Vec<IntervalSet> = runs
            .into_iter()
            .map(IntervalSet::from_sorted_ranges)
            .collect();
        // no scalar value is a surrogate, so Cs never shows up in the sweep
        sets[category_index(GeneralCategory::Surrogate)] = IntervalSet::range(0xD800, 0xDFFF);

        let mut registry = HashMap::new();
        for (i, &(short, long, _)) in CATEGORIES.iter().enumerate() {
            registry.insert(short, sets[i].clone());
            registry.insert(long, sets[i].clone());
        }

        let category = |short: &str| {
            registry
                .get(short)
                .cloned()
                .unwrap_or_default()
        };
        let union_of = |shorts: &[&str]| {
            shorts
                .iter()
                .fold(IntervalSet::new(), |acc, short| acc.union(&category(short)))
        };

        let alpha = union_of(&["Lu", "Ll", "Lt"]);
        let digit = category("Nd");
        let alnum = alpha.union(&digit);
        let space = union_of(&["Zs", "Zl", "Zp"])
            .union(&IntervalSet::range(0x09, 0x0D))
            .union(&IntervalSet::singleton(0x85));
        let invisible = space
            .union(&union_of(&["Cc", "Cf", "Cs", "Co", "Cn"]));
        let graph = invisible.complement(0, MAX_SCALAR);
        let print = graph.union(&category("Zs"));
        let punct = union_of(&["Pc", "Pd", "Ps", "Pe", "Pi", "Pf", "Po", "Sm", "Sc", "Sk", "So"]);
        let word = alnum.union(&IntervalSet::singleton(u32::from(b'_')));
        let blank = category("Zs").union(&IntervalSet::singleton(0x09));
        let cntrl = category("Cc");
        let lower = category("Ll");
        let upper = category("Lu");
        let xdigit: IntervalSet = [(0x30, 0x39), (0x41, 0x46), (0x61, 0x66)]
            .into_iter()
            .collect();

        registry.insert("alnum", alnum);
        registry.insert("alpha", alpha);
        registry.insert("ascii", IntervalSet::range(0x00, 0x7F));
        registry.insert("blank", blank);
        registry.insert("cntrl", cntrl);
        registry.insert("digit", digit);
        registry.insert("graph", graph);
        registry.insert("lower", lower);
        registry.insert("print", print);
        registry.insert("punct", punct);
        registry.insert("space", space);
        registry.insert("upper", upper);
        registry.insert("word", word);
        registry.insert("xdigit", xdigit);
        registry
    })
}

fn latin1_registry() -> &'static HashMap<&'static str, IntervalSet> {
    static REGISTRY: OnceLock<HashMap<&'static str, IntervalSet>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let from = |ranges: &[(u32, u32)]| -> IntervalSet { ranges.iter().copied().collect() };

        let alpha = from(&[
            (0x41, 0x5A),
            (0x61, 0x7A),
            (0xAA, 0xAA),
            (0xB5, 0xB5),
            (0xBA, 0xBA),
            (0xC0, 0xD6),
            (0xD8, 0xF6),
            (0xF8, 0xFF),
        ]);
        let digit = from(&[(0x30, 0x39)]);
        let alnum = alpha.union(&digit);
        let graph = from(&[(0x21, 0x7E), (0xA1, 0xFF)]);

        let mut registry = HashMap::new();
        registry.insert("alnum", alnum.clone());
        registry.insert("alpha", alpha);
        registry.insert("ascii", IntervalSet::range(0x00, 0x7F));
        registry.insert("blank", from(&[(0x09, 0x09), (0x20, 0x20), (0xA0, 0xA0)]));
        registry.insert("cntrl", from(&[(0x00, 0x1F), (0x7F, 0x9F)]));
        registry.insert("digit", digit);
        registry.insert("graph", graph.clone());
        registry.insert(
            "lower",
            from(&[
                (0x61, 0x7A),
                (0xAA, 0xAA),
                (0xB5, 0xB5),
                (0xBA, 0xBA),
                (0xDF, 0xF6),
                (0xF8, 0xFF),
            ]),
        );
        registry.insert("print", from(&[(0x20, 0x7E), (0xA0, 0xFF)]));
        registry.insert("punct", graph.complement(0, 0xFF).union(&alnum).complement(0, 0xFF));
        registry.insert("space", from(&[(0x09, 0x0D), (0x20, 0x20), (0x85, 0x85), (0xA0, 0xA0)]));
        registry.insert("upper", from(&[(0x41, 0x5A), (0xC0, 0xD6), (0xD8, 0xDE)]));
        registry.insert("word", alnum.union(&IntervalSet::singleton(u32::from(b'_'))));
        registry.insert(
            "xdigit",
            from(&[(0x30, 0x39), (0x41, 0x46), (0x61, 0x66)]),
        );

        // Unicode names resolve under Latin-1 too, clipped to the byte range.
        for (&name, set) in unicode_registry() {
            registry.entry(name).or_insert_with(|| clip(set, 0xFF));
        }
        registry
    })
}

fn clip(set: &IntervalSet, hi: u32) -> IntervalSet {
    set.iter()
        .take_while(|&(min, _)| min <= hi)
        .map(|(min, max)| (min, max.min(hi)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unicode(name: &str) -> &'static IntervalSet {
        lookup(Table::Unicode, name).unwrap()
    }

    fn latin1(name: &str) -> &'static IntervalSet {
        lookup(Table::Latin1, name).unwrap()
    }

    #[test]
    fn short_and_long_names_alias() {
        assert_eq!(unicode("Ll"), unicode("lowercase_letter"));
        assert_eq!(unicode("Nd"), unicode("decimal_number"));
        assert_eq!(unicode("Zs"), unicode("space_separator"));
    }

    #[test]
    fn unicode_categories_classify() {
        assert!(unicode("Lu").contains('A' as u32));
        assert!(unicode("Ll").contains('ü' as u32));
        assert!(unicode("Nd").contains('٣' as u32)); // ARABIC-INDIC DIGIT THREE
        assert!(unicode("Sc").contains('€' as u32));
        assert!(unicode("Cs").contains(0xD800));
        assert!(!unicode("Lu").contains('a' as u32));
    }

    #[test]
    fn unicode_posix_derivations() {
        let alpha = unicode("alpha");
        assert!(alpha.contains('A' as u32));
        assert!(alpha.contains('ü' as u32));
        assert!(alpha.contains('ǅ' as u32)); // titlecase
        assert!(!alpha.contains('5' as u32));
        assert!(unicode("space").contains('\u{2028}' as u32));
        assert!(unicode("space").contains('\t' as u32));
        assert!(unicode("word").contains('_' as u32));
        assert!(unicode("graph").contains('x' as u32));
        assert!(!unicode("graph").contains(' ' as u32));
        assert!(unicode("print").contains(' ' as u32));
    }

    #[test]
    fn latin1_posix_tables() {
        assert!(latin1("alpha").contains(0xFC)); // ü
        assert!(latin1("upper").contains(0xC0)); // À
        assert!(!latin1("upper").contains(0xD7)); // × is punct
        assert!(latin1("punct").contains(0xD7));
        assert!(latin1("cntrl").contains(0x9F));
        assert!(latin1("space").contains(0xA0));
        assert!(latin1("xdigit").contains(u32::from(b'f')));
        assert!(!latin1("xdigit").contains(u32::from(b'g')));
    }

    #[test]
    fn latin1_falls_back_to_clipped_unicode() {
        let ll = latin1("Ll");
        assert!(ll.contains(0xFC));
        assert!(ll.iter().all(|(_, max)| max <= 0xFF));
    }

    #[test]
    fn unknown_names_miss() {
        assert!(lookup(Table::Unicode, "nope").is_none());
        assert!(!is_known("nope"));
        assert!(is_known("alpha"));
        assert!(is_known("uppercase_letter"));
    }
}
