//! The parser trait and its evaluation protocol.
//!
//! Every parser is a pure function from an [`Input`] to a
//! [`Consumed`]-wrapped [`Reply`]. The four resulting shapes drive the whole
//! library:
//!
//! - **EmptyOk**: matched without advancing (`pure`, zero-length matches).
//! - **EmptyError**: failed without advancing; `or` may try an alternative.
//! - **ConsumedOk**: matched after advancing; `or` is committed.
//! - **ConsumedError**: failed after advancing; only [`attempt`] can demote
//!   this back to EmptyError.
//!
//! Combinators branch on the consumption flag before they look at the reply,
//! and merge messages only between non-consuming outcomes. This is what
//! turns a naive backtracker into a predictive parser with useful errors.
//!
//! [`attempt`]: crate::prim::attempt

pub mod chain;
pub mod choice;
pub mod many;
pub mod sep;
pub mod then;

use std::borrow::Cow;

use crate::{
    error::{Message, ParseError},
    input::Input,
    parser::{
        chain::{Chainl, Chainl1, Chainr, Chainr1},
        choice::{Optional, Or, OrNot},
        many::{Count, Many, Many1, SkipMany, SkipMany1},
        sep::{EndBy, EndBy1, SepBy, SepBy1, SepEndBy, SepEndBy1},
        then::{Between, Bind, Left, Map, Then, To},
    },
    prim::{Attempt, Label, RefParser},
};

/// Outcome of one parser application.
pub enum Reply<I: Input, O> {
    /// The parser matched, producing `value` and the rest of the input.
    ///
    /// The message records expectations met along the way; it only becomes
    /// visible if a later parser fails at the same position.
    Ok { value: O, rest: I, msg: Message<I::Item> },
    /// The parser failed.
    Err { msg: Message<I::Item> },
}

impl<I: Input, O> Reply<I, O> {
    /// Map the carried value.
    #[inline]
    pub fn map<O2>(self, f: impl FnOnce(O) -> O2) -> Reply<I, O2> {
        match self {
            Reply::Ok { value, rest, msg } => Reply::Ok { value: f(value), rest, msg },
            Reply::Err { msg } => Reply::Err { msg },
        }
    }

    /// Change the value type of a failed reply.
    ///
    /// Panics when called on a successful reply; a real value cannot be
    /// recast.
    pub fn cast<O2>(self) -> Reply<I, O2> {
        match self {
            Reply::Err { msg } => Reply::Err { msg },
            Reply::Ok { .. } => unreachable!("cast on a successful reply"),
        }
    }

    /// The message, whichever side carries it.
    #[inline]
    pub fn into_msg(self) -> Message<I::Item> {
        match self {
            Reply::Ok { msg, .. } | Reply::Err { msg } => msg,
        }
    }

    /// Merge an earlier non-consuming message into this reply's message.
    #[inline]
    pub(crate) fn merge_msg(self, earlier: Message<I::Item>) -> Self {
        match self {
            Reply::Ok { value, rest, msg } => Reply::Ok { value, rest, msg: earlier.merge(msg) },
            Reply::Err { msg } => Reply::Err { msg: earlier.merge(msg) },
        }
    }

    /// Replace the expected set of the message with `{name}`.
    #[inline]
    pub(crate) fn expect_name(self, name: Cow<'static, str>) -> Self {
        match self {
            Reply::Ok { value, rest, msg } => Reply::Ok { value, rest, msg: msg.expect(name) },
            Reply::Err { msg } => Reply::Err { msg: msg.expect(name) },
        }
    }
}

/// A reply tagged with whether input was consumed producing it.
///
/// The flag is authoritative: it is decided by the parser that produced the
/// reply, and `or`/`bind` branch on it alone.
pub enum Consumed<R> {
    /// At least one symbol was advanced past the entry cursor.
    Consumed(R),
    /// The cursor did not move.
    Empty(R),
}

impl<R> Consumed<R> {
    /// True for the `Consumed` case.
    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self, Consumed::Consumed(_))
    }

    /// Unwrap the reply, discarding the flag.
    #[inline]
    pub fn into_inner(self) -> R {
        match self {
            Consumed::Consumed(reply) | Consumed::Empty(reply) => reply,
        }
    }

    /// Map the wrapped reply, keeping the flag.
    #[inline]
    pub fn map<R2>(self, f: impl FnOnce(R) -> R2) -> Consumed<R2> {
        match self {
            Consumed::Consumed(reply) => Consumed::Consumed(f(reply)),
            Consumed::Empty(reply) => Consumed::Empty(f(reply)),
        }
    }

    /// Wrap `reply` under the given flag.
    #[inline]
    pub fn with_flag(consumed: bool, reply: R) -> Self {
        if consumed {
            Consumed::Consumed(reply)
        } else {
            Consumed::Empty(reply)
        }
    }
}

/// What a parser application returns.
pub type IResult<I, O> = Consumed<Reply<I, O>>;

/// A composable parser over inputs of type `I`.
///
/// Parsers are referentially transparent: running the same parser twice on
/// the same input yields the same reply, so a parser can be reused freely
/// (see [`Parser::by_ref`]).
///
/// Recursive grammars reference the producing function by name; any
/// `Fn() -> impl Parser` is itself a parser:
///
/// ```
/// use parsely::prelude::*;
///
/// // nested ::= '(' nested ')' | ""   (counts nesting depth)
/// fn nested<I: Input<Item = char>>() -> impl Parser<I, Output = usize> {
///     option(chr('(').then(nested).map(|n| n + 1).left(chr(')')), 0)
/// }
/// assert_eq!(nested.parse(from_str("((()))")), Ok(3));
/// assert!(nested.parse(from_str("((")).is_err());
/// ```
pub trait Parser<I: Input>: Sized {
    /// The value a successful parse produces.
    type Output;

    /// Apply the parser at the given cursor.
    fn run(&self, input: I) -> IResult<I, Self::Output>;

    /// Apply the parser followed by end-of-input, returning the value or a
    /// rendered error report.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// assert_eq!(digit().parse(from_str("7")), Ok('7'));
    /// assert!(digit().parse(from_str("7x")).is_err()); // trailing input
    /// ```
    fn parse(&self, input: I) -> Result<Self::Output, ParseError<I::Item>> {
        crate::parse::parse(self, input)
    }

    /// Borrow this parser as a parser, for reuse without moving it.
    fn by_ref(&self) -> RefParser<'_, Self> {
        RefParser(self)
    }

    /// Map the output value.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let upper = alpha().map(|c: char| c.to_ascii_uppercase());
    /// assert_eq!(upper.parse(from_str("q")), Ok('Q'));
    /// ```
    fn map<O, F: Fn(Self::Output) -> O>(self, f: F) -> Map<Self, F> {
        Map(self, f)
    }

    /// Replace the output with a constant.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// assert_eq!(chr('+').to(1).parse(from_str("+")), Ok(1));
    /// ```
    fn to<O: Clone>(self, value: O) -> To<Self, O> {
        To(self, value)
    }

    /// Monadic bind: feed the output into `f` to pick the next parser.
    ///
    /// If this parser consumed input, the combined parser reports consumption
    /// no matter what the second one does.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// // a digit, then exactly that many 'a's
    /// let p = digit().bind(|d| chr('a').count::<Vec<_>>(d.to_digit(10).unwrap() as usize));
    /// assert_eq!(p.parse(from_str("3aaa")), Ok(vec!['a', 'a', 'a']));
    /// assert!(p.parse(from_str("3aa")).is_err());
    /// ```
    fn bind<Q: Parser<I>, F: Fn(Self::Output) -> Q>(self, f: F) -> Bind<Self, F> {
        Bind(self, f)
    }

    /// Sequence, keeping the second output.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// assert_eq!(chr('-').then(digit()).parse(from_str("-5")), Ok('5'));
    /// ```
    fn then<Q: Parser<I>>(self, next: Q) -> Then<Self, Q> {
        Then(self, next)
    }

    /// Sequence, keeping the first output.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// assert_eq!(digit().left(chr(';')).parse(from_str("5;")), Ok('5'));
    /// ```
    fn left<Q: Parser<I>>(self, next: Q) -> Left<Self, Q> {
        Left(self, next)
    }

    /// Try this parser; on failure without consumption, try `other`.
    ///
    /// Once input has been consumed the choice is committed; wrap the first
    /// branch in [`attempt`](crate::prim::attempt) to get unbounded
    /// lookahead.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let p = string("foo").attempt().or(string("for"));
    /// assert_eq!(p.parse(from_str("for")), Ok("for".to_string()));
    /// ```
    fn or<Q: Parser<I, Output = Self::Output>>(self, other: Q) -> Or<Self, Q> {
        Or(self, other)
    }

    /// Pretend no input was consumed when this parser fails.
    fn attempt(self) -> Attempt<Self> {
        Attempt(self)
    }

    /// Name this parser in error messages.
    ///
    /// The name *replaces* whatever the parser would have reported, and only
    /// decorates outcomes that did not consume input.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let err = digit().label("exponent").parse(from_str("x")).unwrap_err();
    /// assert_eq!(err.expected, vec!["exponent".to_string()]);
    /// ```
    fn label(self, name: impl Into<Cow<'static, str>>) -> Label<Self> {
        Label(self, name.into())
    }

    /// This parser bracketed by `open` and `close`.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let p = digit().between(chr('('), chr(')'));
    /// assert_eq!(p.parse(from_str("(7)")), Ok('7'));
    /// ```
    fn between<Open: Parser<I>, Close: Parser<I>>(self, open: Open, close: Close) -> Between<Open, Self, Close> {
        Between(open, self, close)
    }

    /// Optionalize: `Some` on success, `None` on failure without consumption.
    fn or_not(self) -> OrNot<Self> {
        OrNot(self)
    }

    /// Accept this parser or nothing, discarding the value.
    fn optional(self) -> Optional<Self> {
        Optional(self)
    }

    /// Zero or more repetitions, collected in input order.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let p = digit().many::<String>().left(skip_many(alpha()));
    /// assert_eq!(p.parse(from_str("123abc")), Ok("123".to_string()));
    /// assert_eq!(digit().many::<String>().parse(from_str("")), Ok(String::new()));
    /// ```
    fn many<O: FromIterator<Self::Output>>(self) -> Many<Self, O> {
        many::many(self)
    }

    /// One or more repetitions.
    fn many1<O: FromIterator<Self::Output>>(self) -> Many1<Self, O> {
        many::many1(self)
    }

    /// Zero or more repetitions, discarding the values.
    fn skip_many(self) -> SkipMany<Self> {
        many::skip_many(self)
    }

    /// One or more repetitions, discarding the values.
    fn skip_many1(self) -> SkipMany1<Self> {
        many::skip_many1(self)
    }

    /// Exactly `n` repetitions; any failure fails the whole.
    fn count<O: FromIterator<Self::Output>>(self, n: usize) -> Count<Self, O> {
        many::count(self, n)
    }

    /// Zero or more occurrences separated by `sep`.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// let csv = digit().sep_by::<Vec<_>, _>(chr(','));
    /// assert_eq!(csv.parse(from_str("1,2,3")), Ok(vec!['1', '2', '3']));
    /// ```
    fn sep_by<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> SepBy<Self, Sep, O> {
        sep::sep_by(self, sep)
    }

    /// One or more occurrences separated by `sep`.
    fn sep_by1<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> SepBy1<Self, Sep, O> {
        sep::sep_by1(self, sep)
    }

    /// Like [`Parser::sep_by`], also accepting a trailing separator.
    fn sep_end_by<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> SepEndBy<Self, Sep, O> {
        sep::sep_end_by(self, sep)
    }

    /// Like [`Parser::sep_by1`], also accepting a trailing separator.
    fn sep_end_by1<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> SepEndBy1<Self, Sep, O> {
        sep::sep_end_by1(self, sep)
    }

    /// Zero or more occurrences, each terminated by `sep`.
    fn end_by<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> EndBy<Self, Sep, O> {
        sep::end_by(self, sep)
    }

    /// One or more occurrences, each terminated by `sep`.
    fn end_by1<O: FromIterator<Self::Output>, Sep: Parser<I>>(self, sep: Sep) -> EndBy1<Self, Sep, O> {
        sep::end_by1(self, sep)
    }

    /// Left-associative operator chain with at least one operand.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// fn sub(a: i64, b: i64) -> i64 { a - b }
    /// let p = lng().chainl1(chr('-').to(sub as fn(i64, i64) -> i64));
    /// assert_eq!(p.parse(from_str("1-2-3")), Ok(-4)); // (1 - 2) - 3
    /// ```
    fn chainl1<Op: Parser<I>>(self, op: Op) -> Chainl1<Self, Op> {
        chain::chainl1(self, op)
    }

    /// Right-associative operator chain with at least one operand.
    ///
    /// ```
    /// use parsely::prelude::*;
    ///
    /// fn sub(a: i64, b: i64) -> i64 { a - b }
    /// let p = lng().chainr1(chr('-').to(sub as fn(i64, i64) -> i64));
    /// assert_eq!(p.parse(from_str("1-2-3")), Ok(2)); // 1 - (2 - 3)
    /// ```
    fn chainr1<Op: Parser<I>>(self, op: Op) -> Chainr1<Self, Op> {
        chain::chainr1(self, op)
    }

    /// Left-associative operator chain; `default` on zero operands.
    fn chainl<Op: Parser<I>>(self, op: Op, default: Self::Output) -> Chainl<Self, Op, Self::Output> {
        chain::chainl(self, op, default)
    }

    /// Right-associative operator chain; `default` on zero operands.
    fn chainr<Op: Parser<I>>(self, op: Op, default: Self::Output) -> Chainr<Self, Op, Self::Output> {
        chain::chainr(self, op, default)
    }
}
