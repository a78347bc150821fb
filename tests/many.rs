use parsely::prelude::*;

fn ok<I: Input, O>(result: IResult<I, O>) -> (bool, O, usize) {
    let consumed = result.is_consumed();
    match result.into_inner() {
        Reply::Ok { value, rest, .. } => (consumed, value, rest.position()),
        Reply::Err { msg } => panic!("expected success, got error at {}", msg.position()),
    }
}

#[test]
fn many_collects_in_input_order() {
    let (consumed, values, pos) = ok(many::<_, Vec<char>>(digit()).run(from_str("123abc")));
    assert!(consumed);
    assert_eq!(values, vec!['1', '2', '3']);
    assert_eq!(pos, 3);
}

#[test]
fn many_accepts_zero_matches_without_consuming() {
    let (consumed, values, pos) = ok(many::<_, Vec<char>>(digit()).run(from_str("abc")));
    assert!(!consumed);
    assert_eq!(values, vec![]);
    assert_eq!(pos, 0);
}

#[test]
fn many_collects_into_strings() {
    let word = many::<_, String>(alpha());
    assert_eq!(word.parse(from_str("hello")), Ok("hello".to_string()));
}

#[test]
fn many_fails_fast_on_consuming_errors() {
    // The third "ab" gets halfway before failing; many must not swallow it.
    let p = many::<_, Vec<String>>(string("ab"));
    let result = p.run(from_str("ababax"));
    assert!(result.is_consumed());
    match result.into_inner() {
        Reply::Err { msg } => assert_eq!(msg.position(), 5),
        Reply::Ok { .. } => panic!("expected the partial match to fail the repetition"),
    }
}

#[test]
fn many_with_attempt_stops_at_the_partial_match() {
    let p = many::<_, Vec<String>>(string("ab").attempt());
    let (consumed, values, pos) = ok(p.run(from_str("ababax")));
    assert!(consumed);
    assert_eq!(values, vec!["ab".to_string(), "ab".to_string()]);
    assert_eq!(pos, 4);
}

#[test]
fn many1_requires_at_least_one() {
    assert_eq!(many1::<_, Vec<char>>(digit()).parse(from_str("7")), Ok(vec!['7']));
    assert!(many1::<_, Vec<char>>(digit()).parse(from_str("")).is_err());
    assert!(many1::<_, Vec<char>>(digit()).parse(from_str("x")).is_err());
}

#[test]
fn skip_many_discards_results() {
    let p = skip_many(wspace()).then(alpha_num());
    assert_eq!(p.parse(from_str("   ok")), Ok("ok".to_string()));
    assert_eq!(p.parse(from_str("ok")), Ok("ok".to_string()));
}

#[test]
fn skip_many1_requires_at_least_one() {
    let p = skip_many1(wspace()).then(alpha_num());
    assert_eq!(p.parse(from_str(" ok")), Ok("ok".to_string()));
    assert!(p.parse(from_str("ok")).is_err());
}

#[test]
fn count_applies_exactly_n_times() {
    let four = count::<_, String>(digit(), 4);
    assert_eq!(four.by_ref().left(string("-")).left(digit().skip_many()).parse(from_str("2024-0802")), Ok("2024".to_string()));
    assert!(four.parse(from_str("123")).is_err());
    assert_eq!(count::<_, Vec<char>>(digit(), 0).parse(from_str("")), Ok(vec![]));
}

#[test]
fn count_failure_flags_prior_consumption() {
    let result = count::<_, Vec<char>>(digit(), 3).run(from_str("12x"));
    assert!(result.is_consumed());
    assert!(matches!(result.into_inner(), Reply::Err { .. }));

    let result = count::<_, Vec<char>>(digit(), 3).run(from_str("xyz"));
    assert!(!result.is_consumed());
    assert!(matches!(result.into_inner(), Reply::Err { .. }));
}

#[test]
fn many_does_not_spin_on_non_consuming_parsers() {
    // pure() succeeds without consuming; the loop must terminate.
    let (consumed, values, pos) = ok(many::<_, Vec<i32>>(pure(1)).run(from_str("abc")));
    assert!(!consumed);
    assert_eq!(values, vec![]);
    assert_eq!(pos, 0);
}

#[test]
fn many_of_zero_width_regex_terminates() {
    let p = many::<_, Vec<String>>(regex("a*"));
    let (consumed, values, pos) = ok(p.run(from_str("aab")));
    assert!(consumed);
    assert_eq!(values, vec!["aa".to_string()]);
    assert_eq!(pos, 2);

    let (consumed, values, _) = ok(p.run(from_str("bbb")));
    assert!(!consumed);
    assert_eq!(values, Vec::<String>::new());
}

#[test]
fn many_is_stack_safe_on_large_inputs() {
    let input: String = "9".repeat(200_000);
    let digits = many::<_, Vec<char>>(digit());
    let (consumed, values, pos) = ok(digits.run(from_str(&input)));
    assert!(consumed);
    assert_eq!(values.len(), 200_000);
    assert_eq!(pos, 200_000);

    let skipped = skip_many(digit());
    let (consumed, _, pos) = ok(skipped.run(from_str(&input)));
    assert!(consumed);
    assert_eq!(pos, 200_000);
}
