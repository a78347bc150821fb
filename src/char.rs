//! Parsers over character streams.
//!
//! Single-character classifiers, literal strings, a regex adapter, and the
//! numeric parsers built on top of it. Everything here works on any
//! `Input<Item = char>`; only the regex-based parsers need [`TextInput`].

use std::borrow::Cow;

use either::Either;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::{Message, Unexpected},
    input::{Input, TextInput},
    parser::{Consumed, IResult, Parser, Reply},
    prim::{fail_expecting, item, label, pure, satisfy, Item, Label},
};

/// True for Unicode space separators (and line/paragraph separators).
///
/// The standard library has no direct equivalent of this category test, so
/// the table is spelled out.
pub fn is_space_char(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{00a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// An alphabetic character.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(alpha().parse(from_str("a")), Ok('a'));
/// let err = alpha().parse(from_str("0")).unwrap_err();
/// assert!(err.expected.contains(&"alpha".to_string()));
/// ```
pub fn alpha<I: Input<Item = char>>() -> impl Parser<I, Output = char> {
    Parser::<I>::label(satisfy(|c: &char| c.is_alphabetic()), "alpha")
}

/// A numeric character.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(digit().parse(from_str("7")), Ok('7'));
/// assert!(digit().parse(from_str("x")).is_err());
/// ```
pub fn digit<I: Input<Item = char>>() -> impl Parser<I, Output = char> {
    Parser::<I>::label(satisfy(|c: &char| c.is_numeric()), "digit")
}

/// A space separator (not tabs or line breaks; see [`is_space_char`]).
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(space().parse(from_str(" ")), Ok(' '));
/// assert!(space().parse(from_str("\t")).is_err());
/// ```
pub fn space<I: Input<Item = char>>() -> impl Parser<I, Output = char> {
    Parser::<I>::label(satisfy(|c: &char| is_space_char(*c)), "space")
}

/// Any whitespace character.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(wspace().parse(from_str("\t")), Ok('\t'));
/// ```
pub fn wspace<I: Input<Item = char>>() -> impl Parser<I, Output = char> {
    Parser::<I>::label(satisfy(|c: &char| c.is_whitespace()), "whitespace")
}

/// Skip any amount of whitespace.
///
/// ```
/// use parsely::prelude::*;
///
/// let p = wspaces().then(digit());
/// assert_eq!(p.parse(from_str(" \t\n 1")), Ok('1'));
/// assert_eq!(p.parse(from_str("1")), Ok('1'));
/// ```
pub fn wspaces<I: Input<Item = char>>() -> impl Parser<I, Output = ()> {
    wspace().skip_many()
}

/// The single character `c`.
pub fn chr(c: char) -> Item<char> {
    item(c)
}

/// The literal string `value`.
///
/// Characters are matched one at a time, so a mismatch after the first
/// character is a *consuming* error; wrap in
/// [`attempt`](crate::prim::attempt) if the grammar needs to back out.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(string("hello").parse(from_str("hello")), Ok("hello".to_string()));
/// let p = string("foo").attempt().or(string("for"));
/// assert_eq!(p.parse(from_str("for")), Ok("for".to_string()));
/// ```
pub fn string(value: impl Into<String>) -> Label<Str> {
    let value = value.into();
    let quoted = format!("\"{}\"", value);
    let name = value.clone();
    label(Str { value, quoted: quoted.into() }, name)
}

/// Literal string parser. See [`string`].
#[derive(Clone)]
pub struct Str {
    value: String,
    quoted: Cow<'static, str>,
}
impl<I: Input<Item = char>> Parser<I> for Str {
    type Output = String;
    fn run(&self, input: I) -> IResult<I, String> {
        let mut rest = input;
        let mut consumed = false;
        for expected in self.value.chars() {
            match rest.current() {
                None => {
                    let msg = Message::end_of_input(rest.position(), Cow::Owned(self.value.clone()));
                    return Consumed::with_flag(consumed, Reply::Err { msg });
                }
                Some(c) if c == expected => {
                    rest = rest.advance(1);
                    consumed = true;
                }
                Some(c) => {
                    let msg = Message::of(rest.position(), Some(Unexpected::Token(c)), self.quoted.clone());
                    return Consumed::with_flag(consumed, Reply::Err { msg });
                }
            }
        }
        let msg = Message::empty(rest.position());
        Consumed::with_flag(consumed, Reply::Ok { value: self.value.clone(), rest, msg })
    }
}

/// A run of one or more alphanumeric characters, as a `String`.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(alpha_num().parse(from_str("ab12")), Ok("ab12".to_string()));
/// assert!(alpha_num().parse(from_str("!")).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct AlphaNum;
pub fn alpha_num() -> AlphaNum {
    AlphaNum
}
impl<I: Input<Item = char>> Parser<I> for AlphaNum {
    type Output = String;
    fn run(&self, input: I) -> IResult<I, String> {
        let position = input.position();
        match input.current() {
            None => Consumed::Empty(Reply::Err { msg: Message::end_of_input(position, "alphaNum") }),
            Some(c) if !c.is_alphabetic() && !c.is_numeric() => Consumed::Empty(Reply::Err {
                msg: Message::of(position, Some(Unexpected::Token(c)), "alphaNum"),
            }),
            Some(first) => {
                let mut text = String::new();
                text.push(first);
                let mut rest = input.advance(1);
                while let Some(c) = rest.current() {
                    if !c.is_alphabetic() && !c.is_numeric() {
                        break;
                    }
                    text.push(c);
                    rest = rest.advance(1);
                }
                let msg = Message::empty(rest.position());
                Consumed::Consumed(Reply::Ok { value: text, rest, msg })
            }
        }
    }
}

/// A prefix of the input matching a regular expression.
///
/// The pattern is matched against the *start* of the remaining input. A
/// match of length zero succeeds without consuming, so `many(regex("a*"))`
/// terminates (the reference implementation diverges here).
///
/// Panics if `pattern` is not a valid regular expression; compiling happens
/// once, when the parser is constructed.
///
/// ```
/// use parsely::prelude::*;
///
/// let ident = regex("[a-z_][a-z0-9_]*");
/// assert_eq!(ident.parse(from_str("snake_case1")), Ok("snake_case1".to_string()));
/// assert!(ident.parse(from_str("1x")).is_err());
/// ```
pub fn regex(pattern: &str) -> RegexParser {
    let re = Regex::new(&format!("^(?:{})", pattern)).expect("valid regular expression");
    RegexParser { re, expected: Cow::Owned(format!("Regex('{}')", pattern)) }
}

/// Regular-expression prefix parser. See [`regex`].
#[derive(Clone)]
pub struct RegexParser {
    re: Regex,
    expected: Cow<'static, str>,
}
impl<I: TextInput> Parser<I> for RegexParser {
    type Output = String;
    fn run(&self, input: I) -> IResult<I, String> {
        let position = input.position();
        let matched = {
            let text = input.remainder();
            self.re.find(text.as_ref()).map(|m| m.as_str().to_owned())
        };
        match matched {
            Some(text) => {
                let len = text.chars().count();
                if len == 0 {
                    Consumed::Empty(Reply::Ok { value: text, rest: input, msg: Message::empty(position) })
                } else {
                    let rest = input.advance(len);
                    Consumed::Consumed(Reply::Ok { value: text, rest, msg: Message::empty(position) })
                }
            }
            None => {
                let unexpected = match input.current() {
                    Some(c) => Unexpected::Token(c),
                    None => Unexpected::EndOfInput,
                };
                Consumed::Empty(Reply::Err { msg: Message::of(position, Some(unexpected), self.expected.clone()) })
            }
        }
    }
}

const INTEGER_PATTERN: &str = r"-?\d+";
const DOUBLE_PATTERN: &str = r"-?(\d+(\.\d*)?|\d*\.\d+)([eE][+-]?\d+)?[fFdD]?";

static INTEGER: Lazy<RegexParser> = Lazy::new(|| regex(INTEGER_PATTERN));
static DOUBLE: Lazy<RegexParser> = Lazy::new(|| regex(DOUBLE_PATTERN));

/// A signed 32-bit integer.
///
/// Overflow is an ordinary parse error, not a panic.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(intr().parse(from_str("-42")), Ok(-42));
/// let err = intr().parse(from_str("99999999999")).unwrap_err();
/// assert!(err.expected.contains(&"integer".to_string()));
/// ```
pub fn intr<I: TextInput>() -> impl Parser<I, Output = i32> {
    Parser::<I>::label(
        Parser::<I>::bind(INTEGER.clone(), |text: String| match text.parse::<i32>() {
            Ok(value) => Either::Left(pure(value)),
            Err(_) => Either::Right(fail_expecting::<i32>("integer")),
        }),
        "integer",
    )
}

/// A signed 64-bit integer.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(lng().parse(from_str("9007199254740993")), Ok(9007199254740993i64));
/// ```
pub fn lng<I: TextInput>() -> impl Parser<I, Output = i64> {
    Parser::<I>::label(
        Parser::<I>::bind(INTEGER.clone(), |text: String| match text.parse::<i64>() {
            Ok(value) => Either::Left(pure(value)),
            Err(_) => Either::Right(fail_expecting::<i64>("long")),
        }),
        "long",
    )
}

fn parse_double(text: &str) -> Result<f64, std::num::ParseFloatError> {
    // The grammar allows a trailing Java-style width suffix.
    text.trim_end_matches(|c| matches!(c, 'f' | 'F' | 'd' | 'D')).parse::<f64>()
}

/// A signed double-precision float.
///
/// Values too large for `f64` round to infinity rather than failing.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(dble().parse(from_str("12345.6789e12")), Ok(1.23456789e16));
/// assert_eq!(dble().parse(from_str(".5")), Ok(0.5));
/// ```
pub fn dble<I: TextInput>() -> impl Parser<I, Output = f64> {
    Parser::<I>::label(
        Parser::<I>::bind(DOUBLE.clone(), |text: String| match parse_double(&text) {
            Ok(value) => Either::Left(pure(value)),
            Err(_) => Either::Right(fail_expecting::<f64>("double")),
        }),
        "double",
    )
}

/// A number, as an integer when it is one.
///
/// Doubles that are exact integers in `i64` range come back as
/// `Either::Left`; everything else as `Either::Right`.
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(number().parse(from_str("42")), Ok(Either::Left(42)));
/// assert_eq!(number().parse(from_str("4.2")), Ok(Either::Right(4.2)));
/// ```
pub fn number<I: TextInput>() -> impl Parser<I, Output = Either<i64, f64>> {
    Parser::<I>::label(
        Parser::<I>::bind(DOUBLE.clone(), |text: String| match parse_double(&text) {
            Ok(value) => {
                let truncated = value as i64;
                Either::Left(pure(if truncated as f64 == value {
                    Either::Left(truncated)
                } else {
                    Either::Right(value)
                }))
            }
            Err(_) => Either::Right(fail_expecting::<Either<i64, f64>>("number")),
        }),
        "number",
    )
}

/// Raw text between two delimiter parsers.
///
/// After `open` matches, characters are collected verbatim until `close`
/// matches. Running out of input before `close` is a consuming error.
///
/// ```
/// use parsely::prelude::*;
///
/// let quoted = str_between(chr('\''), chr('\''));
/// assert_eq!(quoted.parse(from_str("'a b!'")), Ok("a b!".to_string()));
/// ```
#[derive(Clone, Copy)]
pub struct StrBetween<Open, Close>(Open, Close);
pub fn str_between<Open, Close>(open: Open, close: Close) -> StrBetween<Open, Close> {
    StrBetween(open, close)
}
impl<I: Input<Item = char>, Open: Parser<I>, Close: Parser<I>> Parser<I> for StrBetween<Open, Close> {
    type Output = String;
    fn run(&self, input: I) -> IResult<I, String> {
        let mut cur = match self.0.run(input) {
            Consumed::Consumed(Reply::Ok { rest, .. }) => rest,
            Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
            Consumed::Empty(Reply::Ok { rest, .. }) => rest,
            Consumed::Empty(Reply::Err { msg }) => return Consumed::Empty(Reply::Err { msg }),
        };
        let mut text = String::new();
        loop {
            if cur.end() {
                return Consumed::Consumed(Reply::Err { msg: Message::unexpected_end(cur.position()) });
            }
            if let Reply::Ok { rest, .. } = self.1.run(cur.clone()).into_inner() {
                let msg = Message::empty(rest.position());
                return Consumed::Consumed(Reply::Ok { value: text, rest, msg });
            }
            if let Some(c) = cur.current() {
                text.push(c);
            }
            cur = cur.advance(1);
        }
    }
}
