//! Sequencing combinators.
//!
//! All of these follow the same message discipline as `bind`: a consuming
//! first half makes the whole sequence report consumption regardless of the
//! second half, and messages merge only across consecutive non-consuming
//! outcomes.

use crate::{
    input::Input,
    parser::{Consumed, IResult, Parser, Reply},
    prim::RefParser,
};

/// Map the output of a parser. See [`Parser::map`].
#[derive(Clone, Copy)]
pub struct Map<P, F>(pub(crate) P, pub(crate) F);
#[inline]
pub fn map<P, F>(parser: P, f: F) -> Map<P, F> {
    Map(parser, f)
}
impl<I: Input, P: Parser<I>, O, F: Fn(P::Output) -> O> Parser<I> for Map<P, F> {
    type Output = O;
    #[inline]
    fn run(&self, input: I) -> IResult<I, O> {
        self.0.run(input).map(|reply| reply.map(&self.1))
    }
}

/// Replace the output of a parser with a constant. See [`Parser::to`].
#[derive(Clone, Copy)]
pub struct To<P, O>(pub(crate) P, pub(crate) O);
#[inline]
pub fn to<P, O: Clone>(parser: P, value: O) -> To<P, O> {
    To(parser, value)
}
impl<I: Input, P: Parser<I>, O: Clone> Parser<I> for To<P, O> {
    type Output = O;
    #[inline]
    fn run(&self, input: I) -> IResult<I, O> {
        self.0.run(input).map(|reply| reply.map(|_| self.1.clone()))
    }
}

/// Monadic bind. See [`Parser::bind`].
#[derive(Clone, Copy)]
pub struct Bind<P, F>(pub(crate) P, pub(crate) F);
#[inline]
pub fn bind<P, F>(parser: P, f: F) -> Bind<P, F> {
    Bind(parser, f)
}
impl<I: Input, P: Parser<I>, Q: Parser<I>, F: Fn(P::Output) -> Q> Parser<I> for Bind<P, F> {
    type Output = Q::Output;
    fn run(&self, input: I) -> IResult<I, Q::Output> {
        match self.0.run(input) {
            // Already consumed: the flag is settled, whatever the second
            // parser does. Its message passes through untouched.
            Consumed::Consumed(reply) => Consumed::Consumed(match reply {
                Reply::Ok { value, rest, .. } => (self.1)(value).run(rest).into_inner(),
                Reply::Err { msg } => Reply::Err { msg },
            }),
            Consumed::Empty(reply) => match reply {
                Reply::Ok { value, rest, msg } => match (self.1)(value).run(rest) {
                    committed @ Consumed::Consumed(_) => committed,
                    Consumed::Empty(reply) => Consumed::Empty(reply.merge_msg(msg)),
                },
                Reply::Err { msg } => Consumed::Empty(Reply::Err { msg }),
            },
        }
    }
}

/// Sequence two parsers, keeping the second output. See [`Parser::then`].
#[derive(Clone, Copy)]
pub struct Then<P, Q>(pub(crate) P, pub(crate) Q);
#[inline]
pub fn then<P, Q>(first: P, second: Q) -> Then<P, Q> {
    Then(first, second)
}
impl<I: Input, P: Parser<I>, Q: Parser<I>> Parser<I> for Then<P, Q> {
    type Output = Q::Output;
    fn run(&self, input: I) -> IResult<I, Q::Output> {
        match self.0.run(input) {
            Consumed::Consumed(reply) => Consumed::Consumed(match reply {
                Reply::Ok { rest, .. } => self.1.run(rest).into_inner(),
                Reply::Err { msg } => Reply::Err { msg },
            }),
            Consumed::Empty(reply) => match reply {
                Reply::Ok { rest, msg, .. } => match self.1.run(rest) {
                    committed @ Consumed::Consumed(_) => committed,
                    Consumed::Empty(reply) => Consumed::Empty(reply.merge_msg(msg)),
                },
                Reply::Err { msg } => Consumed::Empty(Reply::Err { msg }),
            },
        }
    }
}

/// Sequence two parsers, keeping the first output. See [`Parser::left`].
#[derive(Clone, Copy)]
pub struct Left<P, Q>(pub(crate) P, pub(crate) Q);
#[inline]
pub fn left<P, Q>(first: P, second: Q) -> Left<P, Q> {
    Left(first, second)
}
impl<I: Input, P: Parser<I>, Q: Parser<I>> Parser<I> for Left<P, Q> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        match self.0.run(input) {
            Consumed::Consumed(reply) => Consumed::Consumed(match reply {
                Reply::Ok { value, rest, .. } => self.1.run(rest).into_inner().map(|_| value),
                Reply::Err { msg } => Reply::Err { msg },
            }),
            Consumed::Empty(reply) => match reply {
                Reply::Ok { value, rest, msg } => match self.1.run(rest) {
                    Consumed::Consumed(reply) => Consumed::Consumed(reply.map(|_| value)),
                    Consumed::Empty(reply) => Consumed::Empty(reply.map(|_| value).merge_msg(msg)),
                },
                Reply::Err { msg } => Consumed::Empty(Reply::Err { msg }),
            },
        }
    }
}

/// A parser bracketed by two others. See [`Parser::between`].
///
/// ```
/// use parsely::prelude::*;
///
/// let quoted = between(chr('"'), chr('"'), alpha_num());
/// assert_eq!(quoted.parse(from_str("\"ab12\"")), Ok("ab12".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct Between<Open, P, Close>(pub(crate) Open, pub(crate) P, pub(crate) Close);
#[inline]
pub fn between<Open, Close, P>(open: Open, close: Close, parser: P) -> Between<Open, P, Close> {
    Between(open, parser, close)
}
impl<I: Input, Open: Parser<I>, P: Parser<I>, Close: Parser<I>> Parser<I> for Between<Open, P, Close> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        RefParser(&self.0).then(RefParser(&self.1).left(RefParser(&self.2))).run(input)
    }
}
