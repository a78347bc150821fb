//! Operator-chain combinators.
//!
//! `chainl1`/`chainr1` parse `operand (operator operand)*` and fold the
//! results left- or right-associatively. The operator parser yields the
//! function to apply, so one grammar rule covers a whole precedence level.
//! This is the classic way to eliminate left recursion in expression grammars.
//!
//! A round is only committed once the operator consumes input: an operator
//! that fails without consuming simply ends the chain.

use crate::{
    input::Input,
    parser::{Consumed, IResult, Parser, Reply},
    prim::RefParser,
};

/// Outcome of attempting one `operator operand` round.
enum Round<I: Input, Op, A> {
    Applied { op: Op, operand: A, rest: I, consumed: bool },
    Stop { msg: crate::error::Message<I::Item> },
    Fatal { msg: crate::error::Message<I::Item> },
}

fn round<I, P, Op>(operand: &P, operator: &Op, input: I) -> Round<I, Op::Output, P::Output>
where
    I: Input,
    P: Parser<I>,
    Op: Parser<I>,
{
    let (f, after_op, op_consumed, op_msg) = match operator.run(input) {
        Consumed::Consumed(Reply::Ok { value, rest, msg }) => (value, rest, true, msg),
        Consumed::Consumed(Reply::Err { msg }) => return Round::Fatal { msg },
        Consumed::Empty(Reply::Ok { value, rest, msg }) => (value, rest, false, msg),
        Consumed::Empty(Reply::Err { msg }) => return Round::Stop { msg },
    };
    match operand.run(after_op) {
        Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
            Round::Applied { op: f, operand: value, rest, consumed: true }
        }
        Consumed::Consumed(Reply::Err { msg }) => Round::Fatal { msg },
        Consumed::Empty(Reply::Ok { value, rest, .. }) => {
            Round::Applied { op: f, operand: value, rest, consumed: op_consumed }
        }
        // The operator consumed, so the missing operand is a hard error;
        // otherwise the chain just ends before the operator.
        Consumed::Empty(Reply::Err { msg }) => {
            if op_consumed {
                Round::Fatal { msg }
            } else {
                Round::Stop { msg: op_msg.merge(msg) }
            }
        }
    }
}

/// Left-associative chain of one or more operands. See [`Parser::chainl1`].
///
/// ```
/// use parsely::prelude::*;
///
/// fn add(a: i64, b: i64) -> i64 { a + b }
/// let sum = chainl1(lng(), chr('+').to(add as fn(i64, i64) -> i64));
/// assert_eq!(sum.parse(from_str("1+2+3")), Ok(6));
/// ```
#[derive(Clone, Copy)]
pub struct Chainl1<P, Op>(P, Op);
#[inline]
pub fn chainl1<P, Op>(operand: P, operator: Op) -> Chainl1<P, Op> {
    Chainl1(operand, operator)
}
impl<I, P, Op> Parser<I> for Chainl1<P, Op>
where
    I: Input,
    P: Parser<I>,
    Op: Parser<I>,
    Op::Output: FnOnce(P::Output, P::Output) -> P::Output,
{
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        let (mut acc, mut input, mut consumed) = match self.0.run(input) {
            Consumed::Consumed(Reply::Ok { value, rest, .. }) => (value, rest, true),
            Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
            Consumed::Empty(Reply::Ok { value, rest, .. }) => (value, rest, false),
            Consumed::Empty(Reply::Err { msg }) => return Consumed::Empty(Reply::Err { msg }),
        };
        loop {
            match round(&self.0, &self.1, input.clone()) {
                Round::Applied { op, operand, rest, consumed: advanced } => {
                    acc = op(acc, operand);
                    consumed |= advanced;
                    // A round that consumed nothing would never stop matching.
                    if !advanced {
                        return Consumed::with_flag(consumed, Reply::Ok {
                            value: acc,
                            rest,
                            msg: crate::error::Message::empty(input.position()),
                        });
                    }
                    input = rest;
                }
                Round::Stop { msg } => {
                    return Consumed::with_flag(consumed, Reply::Ok { value: acc, rest: input, msg });
                }
                Round::Fatal { msg } => return Consumed::Consumed(Reply::Err { msg }),
            }
        }
    }
}

/// Right-associative chain of one or more operands. See [`Parser::chainr1`].
///
/// ```
/// use parsely::prelude::*;
///
/// fn pow(a: i64, b: i64) -> i64 { a.pow(b as u32) }
/// let p = chainr1(lng(), chr('^').to(pow as fn(i64, i64) -> i64));
/// assert_eq!(p.parse(from_str("2^3^2")), Ok(512)); // 2 ^ (3 ^ 2)
/// ```
#[derive(Clone, Copy)]
pub struct Chainr1<P, Op>(P, Op);
#[inline]
pub fn chainr1<P, Op>(operand: P, operator: Op) -> Chainr1<P, Op> {
    Chainr1(operand, operator)
}
impl<I, P, Op> Parser<I> for Chainr1<P, Op>
where
    I: Input,
    P: Parser<I>,
    Op: Parser<I>,
    Op::Output: FnOnce(P::Output, P::Output) -> P::Output,
{
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        let (first, mut input, mut consumed) = match self.0.run(input) {
            Consumed::Consumed(Reply::Ok { value, rest, .. }) => (value, rest, true),
            Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
            Consumed::Empty(Reply::Ok { value, rest, .. }) => (value, rest, false),
            Consumed::Empty(Reply::Err { msg }) => return Consumed::Empty(Reply::Err { msg }),
        };
        // Collect operand/operator pairs, then fold from the right.
        let mut pending: Vec<(P::Output, Op::Output)> = Vec::new();
        let mut last = first;
        loop {
            match round(&self.0, &self.1, input.clone()) {
                Round::Applied { op, operand, rest, consumed: advanced } => {
                    pending.push((last, op));
                    last = operand;
                    consumed |= advanced;
                    if !advanced {
                        input = rest;
                        break;
                    }
                    input = rest;
                }
                Round::Stop { msg } => {
                    let mut acc = last;
                    for (left, op) in pending.into_iter().rev() {
                        acc = op(left, acc);
                    }
                    return Consumed::with_flag(consumed, Reply::Ok { value: acc, rest: input, msg });
                }
                Round::Fatal { msg } => return Consumed::Consumed(Reply::Err { msg }),
            }
        }
        let mut acc = last;
        for (left, op) in pending.into_iter().rev() {
            acc = op(left, acc);
        }
        let msg = crate::error::Message::empty(input.position());
        Consumed::with_flag(consumed, Reply::Ok { value: acc, rest: input, msg })
    }
}

/// Left-associative chain; `default` on zero operands. See
/// [`Parser::chainl`].
///
/// ```
/// use parsely::prelude::*;
///
/// fn add(a: i64, b: i64) -> i64 { a + b }
/// let sum = chainl(lng(), chr('+').to(add as fn(i64, i64) -> i64), 0);
/// assert_eq!(sum.parse(from_str("")), Ok(0));
/// ```
#[derive(Clone)]
pub struct Chainl<P, Op, A>(P, Op, A);
#[inline]
pub fn chainl<P, Op, A>(operand: P, operator: Op, default: A) -> Chainl<P, Op, A> {
    Chainl(operand, operator, default)
}
impl<I, P, Op, A> Parser<I> for Chainl<P, Op, A>
where
    I: Input,
    P: Parser<I, Output = A>,
    A: Clone,
    Op: Parser<I>,
    Op::Output: FnOnce(A, A) -> A,
{
    type Output = A;
    fn run(&self, input: I) -> IResult<I, A> {
        match Chainl1(RefParser(&self.0), RefParser(&self.1)).run(input.clone()) {
            Consumed::Empty(Reply::Err { msg }) => {
                Consumed::Empty(Reply::Ok { value: self.2.clone(), rest: input, msg })
            }
            other => other,
        }
    }
}

/// Right-associative chain; `default` on zero operands. See
/// [`Parser::chainr`].
#[derive(Clone)]
pub struct Chainr<P, Op, A>(P, Op, A);
#[inline]
pub fn chainr<P, Op, A>(operand: P, operator: Op, default: A) -> Chainr<P, Op, A> {
    Chainr(operand, operator, default)
}
impl<I, P, Op, A> Parser<I> for Chainr<P, Op, A>
where
    I: Input,
    P: Parser<I, Output = A>,
    A: Clone,
    Op: Parser<I>,
    Op::Output: FnOnce(A, A) -> A,
{
    type Output = A;
    fn run(&self, input: I) -> IResult<I, A> {
        match Chainr1(RefParser(&self.0), RefParser(&self.1)).run(input.clone()) {
            Consumed::Empty(Reply::Err { msg }) => {
                Consumed::Empty(Reply::Ok { value: self.2.clone(), rest: input, msg })
            }
            other => other,
        }
    }
}
