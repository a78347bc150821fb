use parsely::prelude::*;

fn add(a: i64, b: i64) -> i64 {
    a + b
}
fn sub(a: i64, b: i64) -> i64 {
    a - b
}

type BinOp = fn(i64, i64) -> i64;

#[test]
fn chainl1_folds_left() {
    let sum = chainl1(lng(), Parser::<StrInput>::to(chr('+'), add as BinOp));
    assert_eq!(sum.parse(from_str("1+2+3")), Ok(6));
    assert_eq!(sum.parse(from_str("7")), Ok(7));

    let diff = chainl1(lng(), Parser::<StrInput>::to(chr('-'), sub as BinOp));
    assert_eq!(diff.parse(from_str("1-2-3")), Ok((1 - 2) - 3));
}

#[test]
fn chainr1_folds_right() {
    let diff = chainr1(lng(), Parser::<StrInput>::to(chr('-'), sub as BinOp));
    assert_eq!(diff.parse(from_str("1-2-3")), Ok(1 - (2 - 3)));
    assert_eq!(diff.parse(from_str("9")), Ok(9));
}

#[test]
fn chain_defaults_on_zero_operands() {
    let sum = chainl(lng(), Parser::<StrInput>::to(chr('+'), add as BinOp), 0);
    assert_eq!(sum.parse(from_str("")), Ok(0));
    assert_eq!(sum.parse(from_str("4+5")), Ok(9));

    let diff = chainr(lng(), Parser::<StrInput>::to(chr('-'), sub as BinOp), -1);
    assert_eq!(diff.parse(from_str("")), Ok(-1));
    assert_eq!(diff.parse(from_str("5-2-1")), Ok(5 - (2 - 1)));
}

#[test]
fn a_dangling_operator_is_a_hard_error() {
    let sum = chainl1(lng(), Parser::<StrInput>::to(chr('+'), add as BinOp));
    let result = sum.run(from_str("1+"));
    assert!(result.is_consumed());
    assert!(matches!(result.into_inner(), Reply::Err { .. }));
}

#[test]
fn operators_can_choose_their_function() {
    let op = Parser::<StrInput>::or(
        Parser::<StrInput>::to(chr('+'), add as BinOp),
        Parser::<StrInput>::to(chr('-'), sub as BinOp),
    );
    let expr = chainl1(lng(), op);
    assert_eq!(expr.parse(from_str("10-3+2-1")), Ok(8));
}

#[test]
fn mixed_precedence_via_nested_chains() {
    fn mul(a: i64, b: i64) -> i64 {
        a * b
    }
    fn term<I: TextInput>() -> impl Parser<I, Output = i64> {
        chainl1(lng(), Parser::<I>::to(chr('*'), mul as BinOp))
    }
    let expr = chainl1(term, Parser::<StrInput>::to(chr('+'), add as BinOp));
    assert_eq!(expr.parse(from_str("2*3+4*5")), Ok(26));
}

#[test]
fn chainl1_is_stack_safe() {
    let input = {
        let mut s = String::from("0");
        for _ in 0..100_000 {
            s.push_str("+1");
        }
        s
    };
    let sum = chainl1(lng(), Parser::<StrInput>::to(chr('+'), add as BinOp));
    assert_eq!(sum.parse(from_str(&input)), Ok(100_000));
}

#[test]
fn chainr1_is_stack_safe() {
    let input = {
        let mut s = String::from("0");
        for _ in 0..100_000 {
            s.push_str("-0");
        }
        s
    };
    let diff = chainr1(lng(), Parser::<StrInput>::to(chr('-'), sub as BinOp));
    assert_eq!(diff.parse(from_str(&input)), Ok(0));
}
