//! Parse error messages.
//!
//! During a parse, thousands of non-fatal errors are created and merged and
//! almost all of them are thrown away. [`Message`] is therefore built for
//! cheap construction and O(1) merging: the expected-name set is kept as an
//! unevaluated [`Expected`] tree and only flattened (with deduplication)
//! when a [`ParseError`] is actually rendered.

use std::{
    borrow::Cow,
    fmt,
    fmt::{Debug, Display},
};

/// The symbol a parser stumbled on, or the end of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unexpected<S> {
    Token(S),
    EndOfInput,
}
impl<S: Display> Display for Unexpected<S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unexpected::Token(token) => write!(fmt, "'{}'", token),
            Unexpected::EndOfInput => write!(fmt, "end of input"),
        }
    }
}

/// Unevaluated union of expected production names.
///
/// Merging two sets is a single node allocation; duplicates are removed when
/// the tree is flattened by [`Expected::names`].
#[derive(Clone, Debug)]
pub enum Expected {
    Empty,
    One(Cow<'static, str>),
    Either(Box<Expected>, Box<Expected>),
}
impl Expected {
    /// Flatten the tree into names, first occurrence first.
    pub fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect(&mut names);
        names
    }
    fn collect(&self, names: &mut Vec<String>) {
        match self {
            Expected::Empty => {}
            Expected::One(name) => {
                if !names.iter().any(|seen| seen.as_str() == name.as_ref()) {
                    names.push(name.clone().into_owned());
                }
            }
            Expected::Either(left, right) => {
                left.collect(names);
                right.collect(names);
            }
        }
    }
}

/// A parse error description: position, offending symbol, expected names.
///
/// Messages ride along inside every [`crate::parser::Reply`]; only the one
/// that survives to the end of a failed parse is ever rendered.
#[derive(Clone, Debug)]
pub struct Message<S> {
    position: usize,
    unexpected: Option<Unexpected<S>>,
    expected: Expected,
}

impl<S> Message<S> {
    /// A message with no content at `position`.
    pub fn empty(position: usize) -> Self {
        Message { position, unexpected: None, expected: Expected::Empty }
    }
    /// A message with an offending symbol and a single expected name.
    pub fn of(position: usize, unexpected: Option<Unexpected<S>>, expected: impl Into<Cow<'static, str>>) -> Self {
        Message { position, unexpected, expected: Expected::One(expected.into()) }
    }
    /// "Ran into the end of the input while expecting `expected`".
    pub fn end_of_input(position: usize, expected: impl Into<Cow<'static, str>>) -> Self {
        Message::of(position, Some(Unexpected::EndOfInput), expected)
    }
    /// An unlabeled failure on `token`.
    pub fn unexpected(position: usize, token: S) -> Self {
        Message { position, unexpected: Some(Unexpected::Token(token)), expected: Expected::Empty }
    }
    /// An unlabeled failure at the end of the input.
    pub fn unexpected_end(position: usize) -> Self {
        Message { position, unexpected: Some(Unexpected::EndOfInput), expected: Expected::Empty }
    }

    /// Replace the expected set with `{name}`.
    ///
    /// This is the `label` discipline: replacement, not union.
    pub fn expect(self, name: impl Into<Cow<'static, str>>) -> Self {
        Message { expected: Expected::One(name.into()), ..self }
    }

    /// Merge two messages.
    ///
    /// The later position wins outright; on a tie the expected sets are
    /// unioned and `self`'s offending symbol is preferred.
    pub fn merge(self, other: Self) -> Self {
        use std::cmp::Ordering::*;
        match self.position.cmp(&other.position) {
            Greater => self,
            Less => other,
            Equal => Message {
                position: self.position,
                unexpected: self.unexpected.or(other.unexpected),
                expected: Expected::Either(Box::new(self.expected), Box::new(other.expected)),
            },
        }
    }

    /// Symbol offset the message points at.
    pub fn position(&self) -> usize {
        self.position
    }
    /// The offending symbol, if one was recorded.
    pub fn unexpected_symbol(&self) -> Option<&Unexpected<S>> {
        self.unexpected.as_ref()
    }
    /// Flattened expected names.
    pub fn expected_names(&self) -> Vec<String> {
        self.expected.names()
    }

    /// Force the message into a user-facing report.
    pub fn into_report(self) -> ParseError<S> {
        ParseError { position: self.position, expected: self.expected.names(), unexpected: self.unexpected }
    }
}

/// The error handed to callers of [`crate::parse::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError<S> {
    /// Symbol offset of the furthest point the parse reached.
    pub position: usize,
    /// The symbol found there, if any.
    pub unexpected: Option<Unexpected<S>>,
    /// Names of the productions that would have been accepted there.
    pub expected: Vec<String>,
}

impl<S: Display> Display for ParseError<S> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut before = false;
        if let Some(unexpected) = &self.unexpected {
            write!(fmt, "unexpected {}", unexpected)?;
            before = true;
        }
        if !self.expected.is_empty() {
            if before {
                write!(fmt, ", ")?;
            }
            write!(fmt, "expecting ")?;
            join(fmt, self.expected.iter(), "or")?;
            before = true;
        }
        if !before {
            write!(fmt, "parse failed")?;
        }
        write!(fmt, " at {}", self.position)
    }
}
impl<S: Display + Debug> std::error::Error for ParseError<S> {}

fn join(fmt: &mut fmt::Formatter, mut items: impl Iterator<Item = impl Display>, conj: &str) -> fmt::Result {
    match items.next() {
        None => Ok(()),
        Some(first) => {
            first.fmt(fmt)?;
            match items.next() {
                None => Ok(()),
                Some(mut buffer) => {
                    for item in items {
                        write!(fmt, ", {}", buffer)?;
                        buffer = item;
                    }
                    write!(fmt, " {} {}", conj, buffer)
                }
            }
        }
    }
}
