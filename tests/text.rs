use parsely::prelude::*;
use rstest::rstest;

#[rstest]
#[case("a", 'a')]
#[case("z", 'z')]
#[case("A", 'A')]
#[case("Z", 'Z')]
#[case("é", 'é')]
fn alpha_accepts(#[case] input: &str, #[case] expected: char) {
    assert_eq!(alpha().parse(from_str(input)), Ok(expected));
}

#[rstest]
#[case("\0")]
#[case("0")]
#[case("9")]
#[case("!")]
#[case(" ")]
#[case(",")]
fn alpha_rejects(#[case] input: &str) {
    let report = alpha().parse(from_str(input)).unwrap_err();
    assert!(report.expected.contains(&"alpha".to_string()));
}

#[rstest]
#[case("0", '0')]
#[case("9", '9')]
fn digit_accepts(#[case] input: &str, #[case] expected: char) {
    assert_eq!(digit().parse(from_str(input)), Ok(expected));
}

#[rstest]
#[case("\0")]
#[case("a")]
#[case("A")]
#[case("!")]
#[case(" ")]
fn digit_rejects(#[case] input: &str) {
    assert!(digit().parse(from_str(input)).is_err());
}

#[test]
fn space_takes_separators_only() {
    assert_eq!(space().parse(from_str(" ")), Ok(' '));
    assert_eq!(space().parse(from_str("\u{00a0}")), Ok('\u{00a0}'));
    for rejected in ["\r", "\n", "\t", "\0", "0", "a", ","] {
        assert!(space().parse(from_str(rejected)).is_err(), "accepted {:?}", rejected);
    }
}

#[test]
fn wspace_takes_any_whitespace() {
    for accepted in [" ", "\r", "\n", "\t"] {
        assert!(wspace().parse(from_str(accepted)).is_ok(), "rejected {:?}", accepted);
    }
    for rejected in ["\0", "0", "a", ","] {
        assert!(wspace().parse(from_str(rejected)).is_err(), "accepted {:?}", rejected);
    }
}

#[test]
fn wspaces_skips_runs_of_whitespace() {
    assert!(wspaces().parse(from_str(" ")).is_ok());
    assert!(wspaces().parse(from_str(" \t\n\r ")).is_ok());
    assert!(wspaces().parse(from_str("")).is_ok());
    assert!(wspaces().parse(from_str(" A ")).is_err());
}

#[test]
fn chr_matches_one_character() {
    let p = chr('X');
    assert_eq!(p.parse(from_str("X")), Ok('X'));
    for rejected in ["A", "AX", "x", " X"] {
        assert!(p.parse(from_str(rejected)).is_err(), "accepted {:?}", rejected);
    }
}

#[test]
fn string_matches_whole_literals() {
    let hello = string("hello");
    let result = hello.run(from_str("hello!"));
    assert!(result.is_consumed());
    match result.into_inner() {
        Reply::Ok { value, rest, .. } => {
            assert_eq!(value, "hello");
            assert_eq!(rest.position(), 5);
        }
        Reply::Err { .. } => panic!("expected a match"),
    }
}

#[test]
fn string_mismatch_after_progress_is_consuming() {
    let result = string("hello").run(from_str("help"));
    assert!(result.is_consumed());
    match result.into_inner() {
        Reply::Err { msg } => {
            let report = msg.into_report();
            assert_eq!(report.position, 3);
            assert!(report.expected.contains(&"\"hello\"".to_string()));
        }
        Reply::Ok { .. } => panic!("expected a failure"),
    }
}

#[test]
fn string_mismatch_on_first_char_is_empty() {
    let result = string("hello").run(from_str("xyz"));
    assert!(!result.is_consumed());
    assert!(matches!(result.into_inner(), Reply::Err { .. }));
}

#[test]
fn string_reports_end_of_input_mid_match() {
    let result = string("hello").run(from_str("he"));
    assert!(result.is_consumed());
    match result.into_inner() {
        Reply::Err { msg } => {
            let report = msg.into_report();
            assert_eq!(report.unexpected, Some(Unexpected::EndOfInput));
            assert!(report.expected.contains(&"hello".to_string()));
        }
        Reply::Ok { .. } => panic!("expected a failure"),
    }
}

#[test]
fn alpha_num_collects_a_run() {
    assert_eq!(alpha_num().parse(from_str("ab12cd")), Ok("ab12cd".to_string()));
    let report = alpha_num().parse(from_str("!x")).unwrap_err();
    assert!(report.expected.contains(&"alphaNum".to_string()));
    assert!(alpha_num().parse(from_str("")).is_err());
}

#[test]
fn regex_matches_prefixes_only() {
    let p = regex("[0-9]+");
    assert_eq!(p.by_ref().left(string("px")).parse(from_str("640px")), Ok("640".to_string()));
    // A match further in does not count.
    assert!(p.parse(from_str("x640")).is_err());
}

#[test]
fn regex_reports_its_pattern() {
    let report = regex("[0-9]+").parse(from_str("x")).unwrap_err();
    assert!(report.expected.contains(&"Regex('[0-9]+')".to_string()));
}

#[test]
fn regex_zero_length_match_is_empty_ok() {
    let result = regex("a*").run(from_str("bbb"));
    assert!(!result.is_consumed());
    match result.into_inner() {
        Reply::Ok { value, rest, .. } => {
            assert_eq!(value, "");
            assert_eq!(rest.position(), 0);
        }
        Reply::Err { .. } => panic!("zero-length match should succeed"),
    }
}

#[test]
fn regex_works_on_char_slice_inputs() {
    let chars: Vec<char> = "abc123".chars().collect();
    assert_eq!(regex("[a-c]+").by_ref().left(intr()).parse(from_chars(&chars)), Ok("abc".to_string()));
}

#[rstest]
#[case("0", 0)]
#[case("1", 1)]
#[case("-1", -1)]
#[case("123456789", 123456789)]
#[case("-123456789", -123456789)]
fn intr_accepts(#[case] input: &str, #[case] expected: i32) {
    assert_eq!(intr().parse(from_str(input)), Ok(expected));
}

#[rstest]
#[case("")]
#[case("+")]
#[case("-")]
#[case("1.1")]
#[case("+-1")]
#[case("0-0")]
#[case("1 0")]
fn intr_rejects(#[case] input: &str) {
    assert!(intr().parse(from_str(input)).is_err());
}

#[test]
fn intr_overflow_is_a_parse_error() {
    let report = intr().parse(from_str("99999999999999999999")).unwrap_err();
    assert!(report.expected.contains(&"integer".to_string()));
}

#[test]
fn lng_covers_the_64_bit_range() {
    assert_eq!(lng().parse(from_str("2147483648")), Ok(2147483648i64));
    assert_eq!(lng().parse(from_str("-9223372036854775808")), Ok(i64::MIN));
    let report = lng().parse(from_str("99999999999999999999")).unwrap_err();
    assert!(report.expected.contains(&"long".to_string()));
}

#[rstest]
#[case("0", 0.0)]
#[case("0.", 0.0)]
#[case(".0", 0.0)]
#[case("0.0", 0.0)]
#[case(".1", 0.1)]
#[case("1", 1.0)]
#[case("1.0", 1.0)]
#[case("1.2", 1.2)]
#[case("-1.2", -1.2)]
#[case("1.5f", 1.5)]
#[case("1.5D", 1.5)]
#[case("123456789.123456789", 123456789.123456789)]
#[case("12345.6789e12", 1.23456789e16)]
#[case("-12345.6789e12", -1.23456789e16)]
#[case("12345.6789e-12", 12345.6789e-12)]
fn dble_accepts(#[case] input: &str, #[case] expected: f64) {
    assert_eq!(dble().parse(from_str(input)), Ok(expected));
}

#[rstest]
#[case("")]
#[case("+")]
#[case("-")]
#[case("1.1.")]
#[case("+-1")]
#[case("e")]
#[case("0-0")]
#[case("1 0")]
fn dble_rejects(#[case] input: &str) {
    assert!(dble().parse(from_str(input)).is_err());
}

#[test]
fn dble_overflow_rounds_to_infinity() {
    let value = dble().parse(from_str("9e99999999")).unwrap();
    assert!(value.is_infinite() && value.is_sign_positive());
    let value = dble().parse(from_str("-9e99999999")).unwrap();
    assert!(value.is_infinite() && value.is_sign_negative());
}

#[test]
fn number_prefers_integers() {
    assert_eq!(number().parse(from_str("42")), Ok(Either::Left(42)));
    assert_eq!(number().parse(from_str("42.0")), Ok(Either::Left(42)));
    assert_eq!(number().parse(from_str("4.2")), Ok(Either::Right(4.2)));
    assert_eq!(number().parse(from_str("1e100")), Ok(Either::Right(1e100)));
}

#[test]
fn str_between_collects_raw_text() {
    let quoted = str_between(chr('"'), chr('"'));
    assert_eq!(quoted.parse(from_str("\"a, b!\"")), Ok("a, b!".to_string()));
    assert_eq!(quoted.parse(from_str("\"\"")), Ok(String::new()));

    let result = quoted.run(from_str("\"never closed"));
    assert!(result.is_consumed());
    assert!(matches!(result.into_inner(), Reply::Err { .. }));
}

#[test]
fn text_parsers_compose() {
    // key = value ; ...
    let pair = alpha_num().left(wspaces()).left(chr('=')).left(wspaces()).bind(|key: String| {
        number().map(move |value| (key.clone(), value))
    });
    let entries = sep_end_by::<_, _, Vec<_>>(pair, wspaces().then(chr(';')).then(wspaces()));
    let parsed = entries.parse(from_str("width = 640; height = 480; scale = 1.5;")).unwrap();
    assert_eq!(parsed, vec![
        ("width".to_string(), Either::Left(640)),
        ("height".to_string(), Either::Left(480)),
        ("scale".to_string(), Either::Right(1.5)),
    ]);
}
