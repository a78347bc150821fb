//! Repetition combinators.
//!
//! The whole family is driven by one iterative loop ([`Repeat`]), so a
//! million-element input does not touch the native stack. The loop rules:
//!
//! - a match that consumed input continues the loop;
//! - a failure without consumption ends the loop normally (the accumulated
//!   values are the result);
//! - a failure *after* consuming input fails the whole repetition;
//! - a match without consumption ends the loop instead of spinning forever
//!   (the reference design diverges here; see the crate docs).

use std::{iter, marker::PhantomData};

use crate::{
    error::Message,
    input::Input,
    parser::{Consumed, IResult, Parser, Reply},
};

/// How a repetition loop ended.
pub(crate) enum End<S> {
    /// The inner parser failed (or matched) without consuming; `msg` is what
    /// it reported at the stopping point.
    Stopped(Message<S>),
    /// The inner parser failed after consuming. The repetition is committed
    /// to this error.
    Fatal(Message<S>),
}

/// Iterator driving the `many` family.
///
/// Yields values while the inner parser keeps consuming; the final state is
/// left in `consumed`/`end` for the owning combinator to assemble a reply.
pub(crate) struct Repeat<'a, P, I: Input> {
    parser: &'a P,
    pub(crate) input: I,
    pub(crate) consumed: bool,
    pub(crate) end: Option<End<I::Item>>,
}

impl<'a, P: Parser<I>, I: Input> Repeat<'a, P, I> {
    pub(crate) fn new(parser: &'a P, input: I) -> Self {
        Repeat { parser, input, consumed: false, end: None }
    }

    /// Assemble the reply after the iterator has been drained.
    pub(crate) fn finish<O>(self, values: O) -> IResult<I, O> {
        match self.end {
            Some(End::Fatal(msg)) => Consumed::Consumed(Reply::Err { msg }),
            Some(End::Stopped(msg)) => {
                Consumed::with_flag(self.consumed, Reply::Ok { value: values, rest: self.input, msg })
            }
            // A collector bailed out early; treat it as a clean stop.
            None => {
                let msg = Message::empty(self.input.position());
                Consumed::with_flag(self.consumed, Reply::Ok { value: values, rest: self.input, msg })
            }
        }
    }
}

impl<'a, P: Parser<I>, I: Input> Iterator for Repeat<'a, P, I> {
    type Item = P::Output;
    fn next(&mut self) -> Option<P::Output> {
        if self.end.is_some() {
            return None;
        }
        match self.parser.run(self.input.clone()) {
            Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
                self.input = rest;
                self.consumed = true;
                Some(value)
            }
            Consumed::Consumed(Reply::Err { msg }) => {
                self.end = Some(End::Fatal(msg));
                None
            }
            // Matched without advancing: stop rather than loop forever.
            Consumed::Empty(Reply::Ok { .. }) => {
                self.end = Some(End::Stopped(Message::empty(self.input.position())));
                None
            }
            Consumed::Empty(Reply::Err { msg }) => {
                self.end = Some(End::Stopped(msg));
                None
            }
        }
    }
}

/// Zero or more repetitions. See [`Parser::many`].
///
/// ```
/// use parsely::prelude::*;
///
/// let digits = many::<_, String>(digit());
/// assert_eq!(digits.by_ref().left(skip_many(any())).parse(from_str("123abc")), Ok("123".to_string()));
/// assert_eq!(digits.parse(from_str("")), Ok(String::new()));
/// ```
pub struct Many<P, O>(P, PhantomData<fn() -> O>);
impl<P: Clone, O> Clone for Many<P, O> {
    #[inline]
    fn clone(&self) -> Self {
        Many(self.0.clone(), PhantomData)
    }
}
#[inline]
pub fn many<P, O>(parser: P) -> Many<P, O> {
    Many(parser, PhantomData)
}
impl<I: Input, P: Parser<I>, O: FromIterator<P::Output>> Parser<I> for Many<P, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let mut repeat = Repeat::new(&self.0, input);
        let values: O = repeat.by_ref().collect();
        repeat.finish(values)
    }
}

/// One or more repetitions. See [`Parser::many1`].
///
/// ```
/// use parsely::prelude::*;
///
/// let word = many1::<_, String>(alpha());
/// assert_eq!(word.by_ref().left(eof()).parse(from_str("hello")), Ok("hello".to_string()));
/// assert!(word.parse(from_str("")).is_err());
/// ```
pub struct Many1<P, O>(P, PhantomData<fn() -> O>);
impl<P: Clone, O> Clone for Many1<P, O> {
    #[inline]
    fn clone(&self) -> Self {
        Many1(self.0.clone(), PhantomData)
    }
}
#[inline]
pub fn many1<P, O>(parser: P) -> Many1<P, O> {
    Many1(parser, PhantomData)
}
impl<I: Input, P: Parser<I>, O: FromIterator<P::Output>> Parser<I> for Many1<P, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        head_tail(&self.0, &self.0, input)
    }
}

/// `head` once, then `tail` until it stops consuming. This is the common
/// core of `many1`, `sep_by1` and `end_by1`.
pub(crate) fn head_tail<I, P, Q, O>(head: &P, tail: &Q, input: I) -> IResult<I, O>
where
    I: Input,
    P: Parser<I>,
    Q: Parser<I, Output = P::Output>,
    O: FromIterator<P::Output>,
{
    match head.run(input) {
        Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
            let mut repeat = Repeat::new(tail, rest);
            repeat.consumed = true;
            let values: O = iter::once(value).chain(repeat.by_ref()).collect();
            repeat.finish(values)
        }
        Consumed::Consumed(Reply::Err { msg }) => Consumed::Consumed(Reply::Err { msg }),
        Consumed::Empty(Reply::Ok { value, rest, msg }) => {
            let mut repeat = Repeat::new(tail, rest);
            let values: O = iter::once(value).chain(repeat.by_ref()).collect();
            // The non-consuming first match keeps its message in play.
            match repeat.finish(values) {
                Consumed::Empty(reply) => Consumed::Empty(reply.merge_msg(msg)),
                committed => committed,
            }
        }
        Consumed::Empty(Reply::Err { msg }) => Consumed::Empty(Reply::Err { msg }),
    }
}

/// Zero or more repetitions, values discarded. See [`Parser::skip_many`].
///
/// ```
/// use parsely::prelude::*;
///
/// let p = skip_many(wspace()).then(digit());
/// assert_eq!(p.parse(from_str("   7")), Ok('7'));
/// assert_eq!(p.parse(from_str("7")), Ok('7'));
/// ```
#[derive(Clone, Copy)]
pub struct SkipMany<P>(P);
#[inline]
pub fn skip_many<P>(parser: P) -> SkipMany<P> {
    SkipMany(parser)
}
impl<I: Input, P: Parser<I>> Parser<I> for SkipMany<P> {
    type Output = ();
    fn run(&self, input: I) -> IResult<I, ()> {
        let mut repeat = Repeat::new(&self.0, input);
        repeat.by_ref().for_each(drop);
        repeat.finish(())
    }
}

/// One or more repetitions, values discarded. See [`Parser::skip_many1`].
#[derive(Clone, Copy)]
pub struct SkipMany1<P>(P);
#[inline]
pub fn skip_many1<P>(parser: P) -> SkipMany1<P> {
    SkipMany1(parser)
}
impl<I: Input, P: Parser<I>> Parser<I> for SkipMany1<P> {
    type Output = ();
    fn run(&self, input: I) -> IResult<I, ()> {
        match Many1::<_, Discard>(self.0.by_ref(), PhantomData).run(input) {
            Consumed::Consumed(reply) => Consumed::Consumed(reply.map(|_| ())),
            Consumed::Empty(reply) => Consumed::Empty(reply.map(|_| ())),
        }
    }
}

/// `FromIterator` sink that drains and drops.
struct Discard;
impl<T> FromIterator<T> for Discard {
    fn from_iter<Iter: IntoIterator<Item = T>>(iter: Iter) -> Discard {
        iter.into_iter().for_each(drop);
        Discard
    }
}

/// Exactly `n` repetitions. See [`Parser::count`].
///
/// ```
/// use parsely::prelude::*;
///
/// let pair = count::<_, String>(digit(), 2);
/// assert_eq!(pair.by_ref().left(chr('!')).parse(from_str("42!")), Ok("42".to_string()));
/// assert!(pair.parse(from_str("4")).is_err());
/// assert_eq!(count::<_, Vec<_>>(digit(), 0).parse(from_str("")), Ok(vec![]));
/// ```
pub struct Count<P, O>(P, usize, PhantomData<fn() -> O>);
impl<P: Clone, O> Clone for Count<P, O> {
    #[inline]
    fn clone(&self) -> Self {
        Count(self.0.clone(), self.1, PhantomData)
    }
}
#[inline]
pub fn count<P, O>(parser: P, n: usize) -> Count<P, O> {
    Count(parser, n, PhantomData)
}
impl<I: Input, P: Parser<I>, O: FromIterator<P::Output>> Parser<I> for Count<P, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let mut input = input;
        let mut consumed = false;
        // Merged messages of the trailing run of non-consuming steps; a
        // consuming step resets it, mirroring how `bind` forwards messages.
        let mut run_msg: Option<Message<I::Item>> = None;
        let mut values = Vec::with_capacity(self.1);
        for _ in 0..self.1 {
            match self.0.run(input.clone()) {
                Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
                    consumed = true;
                    run_msg = None;
                    values.push(value);
                    input = rest;
                }
                Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
                Consumed::Empty(Reply::Ok { value, rest, msg }) => {
                    run_msg = Some(match run_msg {
                        Some(merged) => merged.merge(msg),
                        None => msg,
                    });
                    values.push(value);
                    input = rest;
                }
                Consumed::Empty(Reply::Err { msg }) => {
                    let msg = match run_msg {
                        Some(merged) => merged.merge(msg),
                        None => msg,
                    };
                    return Consumed::with_flag(consumed, Reply::Err { msg });
                }
            }
        }
        let msg = match run_msg {
            Some(merged) => merged.merge(Message::empty(input.position())),
            None => Message::empty(input.position()),
        };
        Consumed::with_flag(consumed, Reply::Ok { value: values.into_iter().collect(), rest: input, msg })
    }
}
