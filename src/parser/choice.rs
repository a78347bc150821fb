//! Alternation combinators.
//!
//! `or` commits to a branch as soon as it consumes input; a branch that
//! fails without consuming lets the next one run, and the messages of all
//! non-consuming outcomes are merged so the final error names every
//! alternative that was viable at the deepest position reached.

use crate::{
    error::Message,
    input::Input,
    parser::{Consumed, IResult, Parser, Reply},
    prim::{pure, Pure, RefParser},
};

/// Ordered choice between two parsers. See [`Parser::or`].
#[derive(Clone, Copy)]
pub struct Or<P, Q>(pub(crate) P, pub(crate) Q);
impl<I: Input, P: Parser<I>, Q: Parser<I, Output = P::Output>> Parser<I> for Or<P, Q> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        match self.0.run(input.clone()) {
            committed @ Consumed::Consumed(_) => committed,
            // A non-consuming success still gives the alternative a chance to
            // consume; its message is folded in either way.
            Consumed::Empty(Reply::Ok { value, rest, msg }) => match self.1.run(input) {
                committed @ Consumed::Consumed(_) => committed,
                Consumed::Empty(reply) => {
                    Consumed::Empty(Reply::Ok { value, rest, msg: msg.merge(reply.into_msg()) })
                }
            },
            Consumed::Empty(Reply::Err { msg }) => match self.1.run(input) {
                committed @ Consumed::Consumed(_) => committed,
                Consumed::Empty(reply) => Consumed::Empty(reply.merge_msg(msg)),
            },
        }
    }
}

/// Ordered choice over a tuple (up to eight parsers) or a `Vec`.
///
/// The tuple form is a right fold with [`Parser::or`], so the commit and
/// message rules are exactly those of nested `or` calls.
///
/// ```
/// use parsely::prelude::*;
///
/// let keyword = choice((string("let"), string("if"), string("else")));
/// assert_eq!(keyword.parse(from_str("if")), Ok("if".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct Choice<Ps>(Ps);

/// Create a [`Choice`].
pub fn choice<Ps>(parsers: Ps) -> Choice<Ps> {
    Choice(parsers)
}

macro_rules! or_chain {
    ($head:ident) => { RefParser($head) };
    ($head:ident $(, $tail:ident)+) => { Or(RefParser($head), or_chain!($($tail),+)) };
}

macro_rules! choice_impl {
    ($head:ident $(, $tail:ident)*) => {
        impl<I: Input, $head: Parser<I>, $($tail: Parser<I, Output = $head::Output>),*> Parser<I>
            for Choice<($head, $($tail,)*)>
        {
            type Output = $head::Output;
            fn run(&self, input: I) -> IResult<I, Self::Output> {
                #[allow(non_snake_case)]
                let ($head, $($tail,)*) = &self.0;
                or_chain!($head $(, $tail)*).run(input)
            }
        }
    };
}

choice_impl!(P1);
choice_impl!(P1, P2);
choice_impl!(P1, P2, P3);
choice_impl!(P1, P2, P3, P4);
choice_impl!(P1, P2, P3, P4, P5);
choice_impl!(P1, P2, P3, P4, P5, P6);
choice_impl!(P1, P2, P3, P4, P5, P6, P7);
choice_impl!(P1, P2, P3, P4, P5, P6, P7, P8);

impl<I: Input, P: Parser<I>> Parser<I> for Choice<Vec<P>> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        let mut first_ok: Option<(P::Output, I)> = None;
        let mut pending: Option<Message<I::Item>> = None;
        for parser in &self.0 {
            match parser.run(input.clone()) {
                committed @ Consumed::Consumed(_) => return committed,
                Consumed::Empty(Reply::Ok { value, rest, msg }) => {
                    if first_ok.is_none() {
                        first_ok = Some((value, rest));
                    }
                    pending = Some(match pending {
                        Some(merged) => merged.merge(msg),
                        None => msg,
                    });
                }
                Consumed::Empty(Reply::Err { msg }) => {
                    pending = Some(match pending {
                        Some(merged) => merged.merge(msg),
                        None => msg,
                    });
                }
            }
        }
        let msg = pending.unwrap_or_else(|| Message::empty(input.position()));
        match first_ok {
            Some((value, rest)) => Consumed::Empty(Reply::Ok { value, rest, msg }),
            None => Consumed::Empty(Reply::Err { msg }),
        }
    }
}

/// Try `parser`; yield `default` if it fails without consuming.
///
/// ```
/// use parsely::prelude::*;
///
/// let sign = option(one_of("+-".chars()), '+');
/// assert_eq!(sign.by_ref().left(digit()).parse(from_str("-1")), Ok('-'));
/// assert_eq!(sign.by_ref().left(digit()).parse(from_str("1")), Ok('+'));
/// ```
pub fn option<P, O: Clone>(parser: P, default: O) -> Or<P, Pure<O>> {
    Or(parser, pure(default))
}

/// `Some` on success, `None` on failure without consumption. See
/// [`Parser::or_not`].
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(or_not(digit()).parse(from_str("5")), Ok(Some('5')));
/// assert_eq!(or_not(digit()).parse(from_str("")), Ok(None));
/// ```
#[derive(Clone, Copy)]
pub struct OrNot<P>(pub(crate) P);
#[inline]
pub fn or_not<P>(parser: P) -> OrNot<P> {
    OrNot(parser)
}
impl<I: Input, P: Parser<I>> Parser<I> for OrNot<P> {
    type Output = Option<P::Output>;
    fn run(&self, input: I) -> IResult<I, Option<P::Output>> {
        match self.0.run(input.clone()) {
            Consumed::Consumed(reply) => Consumed::Consumed(reply.map(Some)),
            Consumed::Empty(Reply::Ok { value, rest, msg }) => {
                Consumed::Empty(Reply::Ok { value: Some(value), rest, msg })
            }
            Consumed::Empty(Reply::Err { msg }) => Consumed::Empty(Reply::Ok { value: None, rest: input, msg }),
        }
    }
}

/// Accept `parser` or nothing, discarding the value. See
/// [`Parser::optional`].
#[derive(Clone, Copy)]
pub struct Optional<P>(pub(crate) P);
#[inline]
pub fn optional<P>(parser: P) -> Optional<P> {
    Optional(parser)
}
impl<I: Input, P: Parser<I>> Parser<I> for Optional<P> {
    type Output = ();
    fn run(&self, input: I) -> IResult<I, ()> {
        match self.0.run(input.clone()) {
            Consumed::Consumed(reply) => Consumed::Consumed(reply.map(|_| ())),
            Consumed::Empty(Reply::Ok { rest, msg, .. }) => Consumed::Empty(Reply::Ok { value: (), rest, msg }),
            Consumed::Empty(Reply::Err { msg }) => Consumed::Empty(Reply::Ok { value: (), rest: input, msg }),
        }
    }
}
