//! Primitive parsers and wrappers.
//!
//! The leaves every grammar bottoms out in: [`pure`], [`fail`], [`eof`],
//! [`satisfy`] and its equality variants, plus the two wrappers that bend
//! the consumption protocol: [`attempt`] and [`label`].

use std::{borrow::Cow, fmt::Display, marker::PhantomData};

use either::Either;

use crate::{
    error::{Message, Unexpected},
    input::Input,
    parser::{Consumed, IResult, Parser, Reply},
};

impl<I: Input, P: Parser<I>, F: Fn() -> P> Parser<I> for F {
    type Output = P::Output;
    #[inline]
    fn run(&self, input: I) -> IResult<I, P::Output> {
        self().run(input)
    }
}

impl<I: Input, P1: Parser<I>, P2: Parser<I, Output = P1::Output>> Parser<I> for Either<P1, P2> {
    type Output = P1::Output;
    #[inline]
    fn run(&self, input: I) -> IResult<I, P1::Output> {
        match self {
            Either::Left(left) => left.run(input),
            Either::Right(right) => right.run(input),
        }
    }
}

/// Make a raw function a parser.
///
/// The function must obey the protocol itself: report `Consumed` exactly
/// when it advanced past the entry cursor.
///
/// ```
/// use parsely::prelude::*;
///
/// let bang = parser(|input: StrInput| match input.current() {
///     Some('!') => Consumed::Consumed(Reply::Ok {
///         value: (),
///         rest: input.advance(1),
///         msg: Message::empty(input.position()),
///     }),
///     _ => Consumed::Empty(Reply::Err { msg: Message::of(input.position(), None, "bang") }),
/// });
/// assert_eq!(bang.parse(from_str("!")), Ok(()));
/// ```
#[derive(Clone, Copy)]
pub struct FnParser<F>(F);
#[inline]
pub fn parser<I: Input, O, F: Fn(I) -> IResult<I, O>>(f: F) -> FnParser<F> {
    FnParser(f)
}
impl<I: Input, O, F: Fn(I) -> IResult<I, O>> Parser<I> for FnParser<F> {
    type Output = O;
    #[inline]
    fn run(&self, input: I) -> IResult<I, O> {
        (self.0)(input)
    }
}

/// A parser borrowing another parser. See [`Parser::by_ref`].
pub struct RefParser<'a, P>(pub(crate) &'a P);
impl<'a, P> Clone for RefParser<'a, P> {
    #[inline]
    fn clone(&self) -> Self {
        RefParser(self.0)
    }
}
impl<'a, P> Copy for RefParser<'a, P> {}
impl<'a, I: Input, P: Parser<I>> Parser<I> for RefParser<'a, P> {
    type Output = P::Output;
    #[inline]
    fn run(&self, input: I) -> IResult<I, P::Output> {
        self.0.run(input)
    }
}

/// A parser returning its argument without touching the input.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(pure(42).parse(from_str("")), Ok(42));
/// ```
#[derive(Clone, Copy)]
pub struct Pure<O>(O);
#[inline]
pub fn pure<O: Clone>(value: O) -> Pure<O> {
    Pure(value)
}
impl<I: Input, O: Clone> Parser<I> for Pure<O> {
    type Output = O;
    #[inline]
    fn run(&self, input: I) -> IResult<I, O> {
        let msg = Message::empty(input.position());
        Consumed::Empty(Reply::Ok { value: self.0.clone(), rest: input, msg })
    }
}

/// A parser that always fails without consuming.
///
/// ```
/// use parsely::prelude::*;
///
/// assert!(fail::<char>().parse(from_str("anything")).is_err());
/// ```
pub struct Fail<O>(Option<Cow<'static, str>>, PhantomData<fn() -> O>);
impl<O> Clone for Fail<O> {
    #[inline]
    fn clone(&self) -> Self {
        Fail(self.0.clone(), PhantomData)
    }
}
#[inline]
pub fn fail<O>() -> Fail<O> {
    Fail(None, PhantomData)
}
/// Like [`fail`], but naming what was expected (and blaming the current
/// symbol).
#[inline]
pub fn fail_expecting<O>(expected: impl Into<Cow<'static, str>>) -> Fail<O> {
    Fail(Some(expected.into()), PhantomData)
}
impl<I: Input, O> Parser<I> for Fail<O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let position = input.position();
        let msg = match &self.0 {
            None => Message::empty(position),
            Some(expected) => {
                let unexpected = match input.current() {
                    Some(token) => Unexpected::Token(token),
                    None => Unexpected::EndOfInput,
                };
                Message::of(position, Some(unexpected), expected.clone())
            }
        };
        Consumed::Empty(Reply::Err { msg })
    }
}

/// A parser matching only the end of the input.
///
/// ```
/// use parsely::prelude::*;
///
/// assert!(matches!(eof().run(from_str("")), Consumed::Empty(Reply::Ok { .. })));
/// assert!(matches!(eof().run(from_str("a")), Consumed::Empty(Reply::Err { .. })));
/// ```
#[derive(Clone, Copy)]
pub struct Eof;
#[inline]
pub fn eof() -> Eof {
    Eof
}
impl<I: Input> Parser<I> for Eof {
    type Output = ();
    fn run(&self, input: I) -> IResult<I, ()> {
        let position = input.position();
        match input.current() {
            None => {
                let msg = Message::of(position, None, "end of input");
                Consumed::Empty(Reply::Ok { value: (), rest: input, msg })
            }
            Some(token) => {
                Consumed::Empty(Reply::Err { msg: Message::of(position, Some(Unexpected::Token(token)), "end of input") })
            }
        }
    }
}

/// A parser taking any single symbol.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(any().left(any()).parse(from_str("xy")), Ok('x'));
/// assert!(any().parse(from_str("")).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct Any;
#[inline]
pub fn any() -> Any {
    Any
}
impl<I: Input> Parser<I> for Any {
    type Output = I::Item;
    fn run(&self, input: I) -> IResult<I, I::Item> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::unexpected_end(position) }),
            Some(item) => {
                Consumed::Consumed(Reply::Ok { value: item, rest: input.advance(1), msg: Message::empty(position) })
            }
        }
    }
}

/// A parser taking one symbol that satisfies a predicate.
///
/// ```
/// use parsely::prelude::*;
///
/// let even = satisfy(|d: &u32| d % 2 == 0);
/// let digits = [4u32, 7];
/// assert_eq!(even.parse(from_slice(&digits[..1])), Ok(4));
/// assert!(even.run(from_slice(&digits[1..])).is_consumed() == false);
/// ```
#[derive(Clone, Copy)]
pub struct Satisfy<F>(F);
#[inline]
pub fn satisfy<F>(test: F) -> Satisfy<F> {
    Satisfy(test)
}
impl<I: Input, F: Fn(&I::Item) -> bool> Parser<I> for Satisfy<F> {
    type Output = I::Item;
    fn run(&self, input: I) -> IResult<I, I::Item> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::unexpected_end(position) }),
            Some(item) if (self.0)(&item) => {
                Consumed::Consumed(Reply::Ok { value: item, rest: input.advance(1), msg: Message::empty(position) })
            }
            Some(item) => Consumed::Empty(Reply::Err { msg: Message::unexpected(position, item) }),
        }
    }
}

/// A parser taking one symbol equal to `value`.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(item('a').parse(from_str("a")), Ok('a'));
/// let err = item('a').parse(from_str("b")).unwrap_err();
/// assert_eq!(err.expected, vec!["a".to_string()]);
/// ```
#[derive(Clone)]
pub struct Item<T>(T, Cow<'static, str>);
pub fn item<T: Display>(value: T) -> Item<T> {
    let name = value.to_string();
    Item(value, name.into())
}
impl<I: Input, T: PartialEq<I::Item>> Parser<I> for Item<T> {
    type Output = I::Item;
    fn run(&self, input: I) -> IResult<I, I::Item> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::end_of_input(position, self.1.clone()) }),
            Some(item) if self.0 == item => {
                Consumed::Consumed(Reply::Ok { value: item, rest: input.advance(1), msg: Message::empty(position) })
            }
            Some(item) => Consumed::Empty(Reply::Err {
                msg: Message::of(position, Some(Unexpected::Token(item)), self.1.clone()),
            }),
        }
    }
}

/// Like [`item`], but replying with `result` instead of the symbol.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(item_to('t', true).or(item_to('f', false)).parse(from_str("f")), Ok(false));
/// ```
#[derive(Clone)]
pub struct ItemTo<T, O>(T, O, Cow<'static, str>);
pub fn item_to<T: Display, O: Clone>(value: T, result: O) -> ItemTo<T, O> {
    let name = value.to_string();
    ItemTo(value, result, name.into())
}
impl<I: Input, T: PartialEq<I::Item>, O: Clone> Parser<I> for ItemTo<T, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::end_of_input(position, self.2.clone()) }),
            Some(item) if self.0 == item => Consumed::Consumed(Reply::Ok {
                value: self.1.clone(),
                rest: input.advance(1),
                msg: Message::empty(position),
            }),
            Some(item) => Consumed::Empty(Reply::Err {
                msg: Message::of(position, Some(Unexpected::Token(item)), self.2.clone()),
            }),
        }
    }
}

/// A parser taking one symbol that appears in the given sequence.
///
/// ```
/// use parsely::prelude::*;
///
/// let hex = one_of("0123456789abcdef".chars());
/// assert_eq!(hex.parse(from_str("c")), Ok('c'));
/// assert!(hex.parse(from_str("x")).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct OneOf<Iter>(Iter);
#[inline]
pub fn one_of<Iter: IntoIterator + Clone>(items: Iter) -> OneOf<Iter> {
    OneOf(items)
}
impl<I: Input, T: PartialEq<I::Item>, Iter: IntoIterator<Item = T> + Clone> Parser<I> for OneOf<Iter> {
    type Output = I::Item;
    fn run(&self, input: I) -> IResult<I, I::Item> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::unexpected_end(position) }),
            Some(item) => {
                if self.0.clone().into_iter().any(|candidate| candidate == item) {
                    Consumed::Consumed(Reply::Ok { value: item, rest: input.advance(1), msg: Message::empty(position) })
                } else {
                    Consumed::Empty(Reply::Err { msg: Message::unexpected(position, item) })
                }
            }
        }
    }
}

/// A parser taking one symbol that does *not* appear in the given sequence.
///
/// ```
/// use parsely::prelude::*;
///
/// let unquoted = none_of("\"\\".chars());
/// assert_eq!(unquoted.parse(from_str("a")), Ok('a'));
/// assert!(unquoted.parse(from_str("\"")).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct NoneOf<Iter>(Iter);
#[inline]
pub fn none_of<Iter: IntoIterator + Clone>(items: Iter) -> NoneOf<Iter> {
    NoneOf(items)
}
impl<I: Input, T: PartialEq<I::Item>, Iter: IntoIterator<Item = T> + Clone> Parser<I> for NoneOf<Iter> {
    type Output = I::Item;
    fn run(&self, input: I) -> IResult<I, I::Item> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::unexpected_end(position) }),
            Some(item) => {
                if self.0.clone().into_iter().any(|candidate| candidate == item) {
                    Consumed::Empty(Reply::Err { msg: Message::unexpected(position, item) })
                } else {
                    Consumed::Consumed(Reply::Ok { value: item, rest: input.advance(1), msg: Message::empty(position) })
                }
            }
        }
    }
}

/// Turn a consuming failure into a non-consuming one.
///
/// `or` commits as soon as a branch consumes input; `attempt` undoes that
/// commitment, which is what enables arbitrary-length lookahead. See
/// [`Parser::attempt`].
#[derive(Clone, Copy)]
pub struct Attempt<P>(pub(crate) P);
#[inline]
pub fn attempt<P>(parser: P) -> Attempt<P> {
    Attempt(parser)
}
impl<I: Input, P: Parser<I>> Parser<I> for Attempt<P> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        match self.0.run(input) {
            Consumed::Consumed(Reply::Err { msg }) => Consumed::Empty(Reply::Err { msg }),
            other => other,
        }
    }
}

/// Name a parser for error messages. See [`Parser::label`].
#[derive(Clone)]
pub struct Label<P>(pub(crate) P, pub(crate) Cow<'static, str>);
#[inline]
pub fn label<P>(parser: P, name: impl Into<Cow<'static, str>>) -> Label<P> {
    Label(parser, name.into())
}
impl<I: Input, P: Parser<I>> Parser<I> for Label<P> {
    type Output = P::Output;
    fn run(&self, input: I) -> IResult<I, P::Output> {
        match self.0.run(input) {
            committed @ Consumed::Consumed(_) => committed,
            Consumed::Empty(reply) => Consumed::Empty(reply.expect_name(self.1.clone())),
        }
    }
}
