use super::*;
use crate::error::{Error, PResult};
use crate::stream::{Encoding, Input};
use crate::token::{any, eof, literal, one_of, take_while};
use crate::Parser;

fn digit<'i>() -> impl Parser<'i, char> {
    one_of("digit")
}

#[test]
fn alt_takes_the_first_match() {
    let mut keyword = alt((literal("if"), literal("else"), literal("while")));
    assert_eq!(keyword.parse_peek(Input::from("if")).unwrap().1, "if");
    assert_eq!(keyword.parse_peek(Input::from("while")).unwrap().1, "while");
}

#[test]
fn alt_backtracks_each_branch_fully() {
    // the first branch consumes "ab" before failing on 'c'; the second
    // branch must still see the input from the start
    let mut p = alt((literal("abc"), literal("abd")));
    assert_eq!(p.parse_peek(Input::from("abd")).unwrap().1, "abd");
}

#[test]
fn alt_merges_expected_failures_at_the_same_position() {
    let mut bit = alt(('0', '1'));
    let err = bit.parse_peek(Input::from("2")).unwrap_err();
    assert_eq!(err, Error::expected("`0' or `1'", 0));
}

#[test]
fn alt_prefers_the_furthest_failure() {
    let mut p = alt(((literal("ab"), literal("cd")).map(|_| ()), 'x'.map(|_| ())));
    let err = p.parse_peek(Input::from("abxx")).unwrap_err();
    // the first branch failed two codepoints in; its diagnosis wins
    assert_eq!(err, Error::expected("`cd'", 2));
}

#[test]
fn alt_restores_the_cursor_on_total_failure() {
    let mut input = Input::from("zzz");
    let _ = alt((literal("ab"), literal("cd")))
        .parse_next(&mut input)
        .unwrap_err();
    assert_eq!(input.position(), 0);
}

#[test]
fn alt_of_identical_parsers_behaves_like_one() {
    // alt(a, a) succeeds exactly like a, and fails with a merged description
    let mut doubled = alt((literal("ab"), literal("ab")));
    assert_eq!(doubled.parse_peek(Input::from("ab")).unwrap().1, "ab");
    let err = doubled.parse_peek(Input::from("xy")).unwrap_err();
    assert_eq!(err, Error::expected("`ab' or `ab'", 0));
}

#[test]
fn opt_never_fails() {
    let mut sign = opt('-');
    assert_eq!(sign.parse_peek(Input::from("-1")).unwrap().1, Some('-'));
    let (rest, value) = sign.parse_peek(Input::from("1")).unwrap();
    assert_eq!(value, None);
    assert_eq!(rest.position(), 0);
}

#[test]
fn peek_consumes_nothing() {
    let (rest, c) = peek(any).parse_peek(Input::from("ab")).unwrap();
    assert_eq!(c, 'a');
    assert_eq!(rest.position(), 0);
}

#[test]
fn not_reports_the_excluded_value() {
    let mut no_digit = not(digit());
    assert!(no_digit.parse_peek(Input::from("x")).is_ok());
    let err = no_digit.parse_peek(Input::from("7")).unwrap_err();
    assert_eq!(err, Error::unexpected("'7'", 0));
}

#[test]
fn success_and_empty_consume_nothing() {
    let (rest, value) = success(42).parse_peek(Input::from("xyz")).unwrap();
    assert_eq!(value, 42);
    assert_eq!(rest.position(), 0);
    assert!(empty.parse_peek(Input::from("xyz")).is_ok());
    let (_, seed) = empty_list::<char>.parse_peek(Input::from("xyz")).unwrap();
    assert!(seed.is_empty());
}

#[test]
fn fail_uses_the_given_message() {
    let mut p = alt(('a'.value(()), fail("broken input")));
    let err = p.parse_peek(Input::from("b")).unwrap_err();
    assert_eq!(err, Error::message("broken input", 0));
}

// map(return(v), f) == return(f(v))
#[test]
fn mapping_a_pure_value_is_pure() {
    let mut mapped = success(21).map(|v| v * 2);
    let (rest, value) = mapped.parse_peek(Input::from("x")).unwrap();
    assert_eq!(value, 42);
    assert_eq!(rest.position(), 0);
}

// bind(return(v), f) == f(v)
#[test]
fn binding_a_pure_value_runs_the_built_parser() {
    let mut bound = success('[').flat_map(|open| {
        assert_eq!(open, '[');
        ']'
    });
    assert_eq!(bound.parse_peek(Input::from("]")).unwrap().1, ']');
}

// seq(a, return(())) consumes exactly what a does
#[test]
fn sequencing_with_pure_adds_no_consumption() {
    let mut p = ('a', success(()));
    let (rest, value) = p.parse_peek(Input::from("ab")).unwrap();
    assert_eq!(value, ('a', ()));
    assert_eq!(rest.position(), 1);
}

#[test]
fn tuples_produce_flat_tuples() {
    let mut p = (literal("foo"), literal("bar"), literal("baz"));
    let (rest, value) = p.parse_peek(Input::from("foobarbaz")).unwrap();
    assert_eq!(value, ("foo", "bar", "baz"));
    assert!(rest.is_empty());
}

#[test]
fn tuple_failure_keeps_the_deep_position() {
    let mut p = (literal("foo"), literal("bar"));
    let err = p.parse_peek(Input::from("fooxxx")).unwrap_err();
    assert_eq!(err, Error::expected("`bar'", 3));
}

#[test]
fn value_replaces_and_tag_pairs() {
    assert_eq!('x'.value(7).parse_peek(Input::from("x")).unwrap().1, 7);
    assert_eq!(
        'x'.tag("found").parse_peek(Input::from("x")).unwrap().1,
        ("found", 'x')
    );
}

#[test]
fn verify_rejects_at_the_start_position() {
    let mut long_word = take_while(1.., "alpha").verify(|w: &String| w.len() > 3);
    assert_eq!(long_word.parse_peek(Input::from("rust")).unwrap().1, "rust");

    let mut input = Input::from("ab");
    let err = long_word.parse_next(&mut input).unwrap_err();
    assert_eq!(err, Error::message("`\"ab\"' failed predicate", 0));
    assert_eq!(input.position(), 0);
}

#[test]
fn label_rewrites_failures_at_the_start() {
    let mut boolean = alt((literal("true"), literal("false"))).label("boolean");
    let err = boolean.parse_peek(Input::from("yes")).unwrap_err();
    assert_eq!(err, Error::expected("boolean", 0));
}

#[test]
fn label_keeps_deeper_failures() {
    let mut pair = (literal("a"), literal("b")).label("pair");
    let err = pair.parse_peek(Input::from("ax")).unwrap_err();
    assert_eq!(err, Error::expected("`b'", 1));
}

#[test]
fn preceded_terminated_delimited() {
    assert_eq!(
        preceded(':', any).parse_peek(Input::from(":x")).unwrap().1,
        'x'
    );
    assert_eq!(
        terminated(any, ';').parse_peek(Input::from("x;")).unwrap().1,
        'x'
    );
    assert_eq!(
        delimited('(', any, ')').parse_peek(Input::from("(x)")).unwrap().1,
        'x'
    );
    assert_eq!(
        separated_pair(any, '=', any)
            .parse_peek(Input::from("a=b"))
            .unwrap()
            .1,
        ('a', 'b')
    );
}

#[test]
fn vec_and_string_shapes() {
    let mut ident = cons(one_of("alpha"), repeat(0.., one_of("alnum")));
    assert_eq!(
        ident.parse_peek(Input::from("a1b")).unwrap().1,
        vec!['a', '1', 'b']
    );

    let mut halves = concat(repeat(2, digit()), repeat(2, one_of("alpha")));
    assert_eq!(
        halves.parse_peek(Input::from("12ab")).unwrap().1,
        vec!['1', '2', 'a', 'b']
    );

    let mut word = cons_char(one_of("upper"), take_while(0.., "lower"));
    assert_eq!(word.parse_peek(Input::from("Rust")).unwrap().1, "Rust");

    let mut pair = concat_str(take_while(1.., "alpha"), take_while(1.., "digit"));
    assert_eq!(pair.parse_peek(Input::from("ab12")).unwrap().1, "ab12");

    let mut suffixed = append_char(take_while(1.., "alpha"), '!');
    assert_eq!(suffixed.parse_peek(Input::from("hi!")).unwrap().1, "hi!");

    let mut combined = map2(digit(), digit(), |a, b| format!("{b}{a}"));
    assert_eq!(combined.parse_peek(Input::from("12")).unwrap().1, "21");
}

#[test]
fn repeat_collects_greedily() {
    let mut letters = repeat(0.., one_of("alpha"));
    let (rest, values): (_, Vec<char>) = letters.parse_peek(Input::from("ab1")).unwrap();
    assert_eq!(values, vec!['a', 'b']);
    assert_eq!(rest.as_bytes(), b"1");
}

#[test]
fn repeat_zero_matches_is_fine_at_zero_minimum() {
    let mut letters = repeat(0.., one_of("alpha"));
    let (rest, values): (_, Vec<char>) = letters.parse_peek(Input::from("123")).unwrap();
    assert!(values.is_empty());
    assert_eq!(rest.position(), 0);
}

#[test]
fn repeat_requires_the_minimum() {
    let mut two_plus = repeat(2.., one_of("alpha"));
    let result: Result<(_, Vec<char>), _> = two_plus.parse_peek(Input::from("a1"));
    assert_eq!(result.unwrap_err(), Error::expected("alpha", 1));
}

#[test]
fn repeat_respects_the_maximum() {
    let mut at_most_two = repeat((0, 2), one_of("alpha"));
    let (rest, values): (_, Vec<char>) = at_most_two.parse_peek(Input::from("abcd")).unwrap();
    assert_eq!(values, vec!['a', 'b']);
    assert_eq!(rest.position(), 2);
}

#[test]
fn repeat_exact_count() {
    let mut three = repeat(3, one_of("digit"));
    let (rest, values): (_, Vec<char>) = three.parse_peek(Input::from("1234")).unwrap();
    assert_eq!(values, vec!['1', '2', '3']);
    assert_eq!(rest.as_bytes(), b"4");
}

// many(p) terminates for any p that does not make progress
#[test]
fn repeat_terminates_on_zero_progress() {
    let mut stuck = repeat(0.., success('x'));
    let (rest, values): (_, Vec<char>) = stuck.parse_peek(Input::from("abc")).unwrap();
    assert!(values.is_empty());
    assert_eq!(rest.position(), 0);
}

#[test]
fn repeat_counts_into_other_accumulators() {
    let mut counted = repeat(0.., one_of("alpha"));
    let (_, count): (_, usize) = counted.parse_peek(Input::from("abc")).unwrap();
    assert_eq!(count, 3);

    let mut text = repeat(1.., one_of("alpha"));
    let (_, word): (_, String) = text.parse_peek(Input::from("abc")).unwrap();
    assert_eq!(word, "abc");
}

#[test]
fn fold_repeat_folds_in_place() {
    let mut number = fold_repeat(
        1..,
        one_of("digit").map(|c| c.to_digit(10).unwrap_or(0)),
        || 0u32,
        |acc, d| acc * 10 + d,
    );
    assert_eq!(number.parse_peek(Input::from("5047")).unwrap().1, 5047);
}

#[test]
fn fold_repeat_requires_the_minimum() {
    let mut number = fold_repeat(2.., digit(), || 0, |acc, _| acc + 1);
    let err = number.parse_peek(Input::from("7")).unwrap_err();
    assert_eq!(err, Error::expected("digit", 1));
}

#[test]
fn repeat_till_leaves_the_terminator() {
    let mut body = repeat_till(any, literal("end"));
    let (rest, values): (_, Vec<char>) = body.parse_peek(Input::from("abend!")).unwrap();
    assert_eq!(values, vec!['a', 'b']);
    assert_eq!(rest.as_bytes(), b"end!");
}

#[test]
fn repeat_till_fails_from_the_construct_start() {
    let mut body = repeat_till(digit(), literal(";"));
    let mut input = Input::from("12x");
    let result: PResult<Vec<char>> = body.parse_next(&mut input);
    assert_eq!(result.unwrap_err(), Error::expected("digit", 2));
    assert_eq!(input.position(), 0);
}

#[test]
fn skip_many_discards_then_parses() {
    let mut word = skip_many(one_of("space"), take_while(1.., "alpha"));
    assert_eq!(word.parse_peek(Input::from("   hi")).unwrap().1, "hi");
    assert_eq!(word.parse_peek(Input::from("hi")).unwrap().1, "hi");
}

#[test]
fn separated0_accepts_empty_and_leaves_trailing_separators() {
    let mut list = separated0(digit(), ',');
    let (_, values): (_, Vec<char>) = list.parse_peek(Input::from("")).unwrap();
    assert!(values.is_empty());

    let (rest, values): (_, Vec<char>) = list.parse_peek(Input::from("1,2,")).unwrap();
    assert_eq!(values, vec!['1', '2']);
    assert_eq!(rest.as_bytes(), b",");
}

#[test]
fn separated1_requires_one_element() {
    let mut list = separated1(digit(), ',');
    let (_, values): (_, Vec<char>) = list.parse_peek(Input::from("7")).unwrap();
    assert_eq!(values, vec!['7']);

    let mut input = Input::from("x");
    let result: PResult<Vec<char>> = list.parse_next(&mut input);
    assert_eq!(result.unwrap_err(), Error::expected("digit", 0));
    assert_eq!(input.position(), 0);
}

#[test]
fn separated_end_variants_consume_trailing_separators() {
    let mut list = separated_end0(digit(), ',');
    let (rest, values): (_, Vec<char>) = list.parse_peek(Input::from("1,2,")).unwrap();
    assert_eq!(values, vec!['1', '2']);
    assert!(rest.is_empty());

    let (rest, values): (_, Vec<char>) = list.parse_peek(Input::from("1,2;")).unwrap();
    assert_eq!(values, vec!['1', '2']);
    assert_eq!(rest.as_bytes(), b";");

    let (_, values): (_, Vec<char>) = list.parse_peek(Input::from("")).unwrap();
    assert!(values.is_empty());

    let mut list1 = separated_end1(digit(), ',');
    let (rest, values): (_, Vec<char>) = list1.parse_peek(Input::from("1,")).unwrap();
    assert_eq!(values, vec!['1']);
    assert!(rest.is_empty());

    let result: Result<(_, Vec<char>), _> = list1.parse_peek(Input::from(",1"));
    assert_eq!(result.unwrap_err(), Error::expected("digit", 0));
}

#[test]
fn chain_left_folds_left() {
    let value = |c: char| c.to_digit(10).unwrap_or(0) as i64;
    let mut sub = chain_left1(digit().map(value), '-'.value(|a: i64, b: i64| a - b));
    assert_eq!(sub.parse_peek(Input::from("9-3-2")).unwrap().1, 4);
    assert_eq!(sub.parse_peek(Input::from("7")).unwrap().1, 7);
}

#[test]
fn chain_right_folds_right() {
    let value = |c: char| i64::from(c.to_digit(10).unwrap_or(0));
    let mut pow = chain_right1(
        digit().map(value),
        '^'.value(|a: i64, b: i64| a.pow(b as u32)),
    );
    assert_eq!(pow.parse_peek(Input::from("2^3^2")).unwrap().1, 512);
}

#[test]
fn chains_fail_after_a_dangling_operator() {
    let mut sub = chain_left1(digit().map(|c| c as i64), '-'.value(|a: i64, b: i64| a - b));
    let mut input = Input::from("1-x");
    let result = sub.parse_next(&mut input);
    assert_eq!(result.unwrap_err(), Error::expected("digit", 2));
    assert_eq!(input.position(), 0);

    let mut pow = chain_right1(digit().map(|c| c as i64), '^'.value(|a: i64, b: i64| a + b));
    let mut input = Input::from("1^");
    let result = pow.parse_next(&mut input);
    assert_eq!(result.unwrap_err(), Error::expected("digit", 2));
    assert_eq!(input.position(), 0);
}

#[test]
fn reversed_reverses() {
    let mut backwards = reversed(repeat(0.., digit()));
    assert_eq!(
        backwards.parse_peek(Input::from("123")).unwrap().1,
        vec!['3', '2', '1']
    );
}

#[test]
fn external_adapts_str_functions() {
    fn shift(input: &str) -> Result<(char, &str), String> {
        let mut chars = input.chars();
        let first = chars.next().ok_or("empty")?;
        Ok((first, chars.as_str()))
    }
    let mut p = external("shift", shift);
    let (rest, first) = p.parse_peek(Input::from("über")).unwrap();
    assert_eq!(first, 'ü');
    assert_eq!(rest.position(), 1);

    let err = p.parse_peek(Input::from("")).unwrap_err();
    assert_eq!(err, Error::message("shift: empty", 0));
}

#[test]
fn external_rejects_non_text_inputs() {
    fn noop(input: &str) -> Result<((), &str), String> {
        Ok(((), input))
    }
    let bytes = [0x00, 0x61];
    let err = external("noop", noop)
        .parse_peek(Input::new(&bytes, Encoding::Utf16))
        .unwrap_err();
    assert_eq!(err, Error::message("noop: input is not text", 0));
}

#[test]
fn fragment_adapts_types() {
    struct Hex(u32);
    impl ParseFragment for Hex {
        fn parse_fragment(input: &str) -> Result<(Self, &str), String> {
            let end = input
                .find(|c: char| !c.is_ascii_hexdigit())
                .unwrap_or(input.len());
            let value = u32::from_str_radix(&input[..end], 16).map_err(|e| e.to_string())?;
            Ok((Hex(value), &input[end..]))
        }
    }

    let (rest, hex): (_, Hex) = fragment().parse_peek(Input::from("ff;")).unwrap();
    assert_eq!(hex.0, 255);
    assert_eq!(rest.as_bytes(), b";");
}

#[test]
fn eof_composes_with_grammars() {
    let mut whole = terminated(take_while(1.., "digit"), eof);
    assert_eq!(whole.parse_peek(Input::from("12")).unwrap().1, "12");
    let err = whole.parse_peek(Input::from("12x")).unwrap_err();
    assert_eq!(err, Error::expected("end of input", 2));
}
