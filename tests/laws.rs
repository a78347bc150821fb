//! Algebraic laws of the combinators, checked observationally over finite
//! input sets: two parsers are considered equal when they produce the same
//! consumption flag, the same value and rest position on success, and the
//! same rendered report on failure.

use parsely::prelude::*;

#[derive(Debug, PartialEq)]
enum Shape<O> {
    Ok { consumed: bool, value: O, pos: usize },
    Err { consumed: bool, report: ParseError<char> },
}

fn shape<O>(result: IResult<StrInput, O>) -> Shape<O> {
    let consumed = result.is_consumed();
    match result.into_inner() {
        Reply::Ok { value, rest, .. } => Shape::Ok { consumed, value, pos: rest.position() },
        Reply::Err { msg } => {
            let mut report = msg.into_report();
            report.expected.sort();
            Shape::Err { consumed, report }
        }
    }
}

const INPUTS: &[&str] = &["", "1", "a", "11", "1a", "a1", "ab", "111", "11a", "121", "abc"];

#[test]
fn monad_left_identity() {
    // bind(pure(x), f) ≡ f(x)
    let f = |c: char| chr(c);
    for input in INPUTS {
        let lhs = Parser::<StrInput>::bind(pure('1'), f).run(from_str(input));
        let rhs = f('1').run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn monad_right_identity() {
    // bind(p, pure) ≡ p
    for input in INPUTS {
        let lhs = digit().bind(|c| pure(c)).run(from_str(input));
        let rhs = digit().run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);

        let lhs = Parser::<StrInput>::bind(string("ab"), |s| pure(s)).run(from_str(input));
        let rhs = string("ab").run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn monad_associativity() {
    // bind(bind(p, f), g) ≡ bind(p, |x| bind(f(x), g))
    let f = |c: char| chr(c);
    let g = |c: char| item_to(c, c);
    for input in INPUTS {
        let lhs = digit().bind(f).bind(g).run(from_str(input));
        let rhs = digit().bind(move |x| Parser::<StrInput>::bind(f(x), g)).run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn or_with_failing_left_is_the_right_parser() {
    // or(fail, p) ≡ p (up to the merged empty message)
    for input in INPUTS {
        let lhs = fail::<char>().or(digit()).run(from_str(input));
        let rhs = digit().run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn or_with_failing_right_is_the_left_parser() {
    // or(p, fail) ≡ p
    for input in INPUTS {
        let lhs = digit().or(fail()).run(from_str(input));
        let rhs = digit().run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn or_is_associative_on_failure() {
    let a = || chr('x');
    let b = || chr('y');
    let c = || chr('z');
    for input in INPUTS {
        let lhs = Parser::<StrInput>::or(Parser::<StrInput>::or(a(), b()), c()).run(from_str(input));
        let rhs = a().or(b().or(c())).run(from_str(input));
        assert_eq!(shape(lhs), shape(rhs), "on input {:?}", input);
    }
}

#[test]
fn attempt_is_idempotent() {
    for input in INPUTS {
        let once = attempt(string("11")).run(from_str(input));
        let twice = attempt(attempt(string("11"))).run(from_str(input));
        assert_eq!(shape(once), shape(twice), "on input {:?}", input);
    }
}

#[test]
fn progress_invariant() {
    // Consumed replies advance the cursor; empty replies do not.
    fn check<O>(result: IResult<StrInput, O>, input: &str) {
        let consumed = result.is_consumed();
        if let Reply::Ok { rest, .. } = result.into_inner() {
            if consumed {
                assert!(rest.position() > 0, "consumed but did not advance on {:?}", input);
            } else {
                assert_eq!(rest.position(), 0, "empty but advanced on {:?}", input);
            }
        }
    }
    for input in INPUTS {
        check(digit().run(from_str(input)), input);
        check(alpha().run(from_str(input)), input);
        check(Parser::<StrInput>::attempt(string("11")).run(from_str(input)), input);
        check(many::<_, Vec<char>>(digit()).run(from_str(input)), input);
        check(or_not(alpha_num()).run(from_str(input)), input);
        check(eof().run(from_str(input)), input);
    }
}

#[test]
fn message_merge_takes_the_larger_position() {
    let near = Message::<char>::of(1, Some(Unexpected::Token('a')), "near");
    let far = Message::<char>::of(4, Some(Unexpected::Token('b')), "far");
    assert_eq!(near.clone().merge(far.clone()).into_report().expected, vec!["far".to_string()]);
    assert_eq!(far.merge(near).into_report().position, 4);
}

#[test]
fn message_merge_unions_expectations_at_equal_positions() {
    let a = Message::<char>::of(2, Some(Unexpected::Token('x')), "a");
    let b = Message::<char>::of(2, None, "b");

    let mut ab = a.clone().merge(b.clone()).into_report();
    let mut ba = b.merge(a).into_report();
    assert_eq!(ab.position, 2);
    ab.expected.sort();
    ba.expected.sort();
    // Commutative on the expected set.
    assert_eq!(ab.expected, ba.expected);
    assert_eq!(ab.expected, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn message_merge_is_associative_on_the_expected_set() {
    let msg = |name: &'static str| Message::<char>::of(3, None, name);
    let mut left = msg("a").merge(msg("b")).merge(msg("c")).into_report();
    let mut right = msg("a").merge(msg("b").merge(msg("c"))).into_report();
    left.expected.sort();
    right.expected.sort();
    assert_eq!(left.expected, right.expected);
}

#[test]
fn merged_names_deduplicate() {
    let msg = |name: &'static str| Message::<char>::of(3, None, name);
    let report = msg("a").merge(msg("b")).merge(msg("a")).into_report();
    assert_eq!(report.expected, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn repeated_runs_are_deterministic() {
    let p = Parser::<StrInput>::or(Parser::<StrInput>::attempt(string("ab")), string("a1"));
    for input in INPUTS {
        assert_eq!(shape(p.run(from_str(input))), shape(p.run(from_str(input))), "on input {:?}", input);
    }
}
