//! Separator combinators.
//!
//! `sep_by` parses `p (sep p)*`, `end_by` parses `(p sep)*`, and the
//! `sep_end_by` pair tolerates a trailing separator. All of them ride on the
//! iterative loop from [`crate::parser::many`].

use std::marker::PhantomData;

use crate::{
    error::Message,
    input::Input,
    parser::{
        many::{head_tail, Repeat},
        then::{Left, Then},
        Consumed, IResult, Parser, Reply,
    },
    prim::RefParser,
};

/// Zero or more `p`, separated by `sep`. See [`Parser::sep_by`].
///
/// ```
/// use parsely::prelude::*;
///
/// let csv = sep_by::<_, _, Vec<_>>(intr(), chr(','));
/// assert_eq!(csv.parse(from_str("1,2,3")), Ok(vec![1, 2, 3]));
/// assert_eq!(csv.parse(from_str("")), Ok(vec![]));
/// ```
pub struct SepBy<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for SepBy<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        SepBy(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn sep_by<P, Sep, O>(parser: P, sep: Sep) -> SepBy<P, Sep, O> {
    SepBy(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for SepBy<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let tail = Then(RefParser(&self.1), RefParser(&self.0));
        match head_tail(&self.0, &tail, input.clone()) {
            Consumed::Empty(Reply::Err { msg }) => {
                Consumed::Empty(Reply::Ok { value: std::iter::empty().collect(), rest: input, msg })
            }
            other => other,
        }
    }
}

/// One or more `p`, separated by `sep`. See [`Parser::sep_by1`].
///
/// ```
/// use parsely::prelude::*;
///
/// let path = sep_by1::<_, _, Vec<_>>(alpha_num(), chr('/'));
/// assert_eq!(path.parse(from_str("usr/local/bin")),
///            Ok(vec!["usr".to_string(), "local".to_string(), "bin".to_string()]));
/// assert!(path.parse(from_str("")).is_err());
/// ```
pub struct SepBy1<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for SepBy1<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        SepBy1(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn sep_by1<P, Sep, O>(parser: P, sep: Sep) -> SepBy1<P, Sep, O> {
    SepBy1(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for SepBy1<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let tail = Then(RefParser(&self.1), RefParser(&self.0));
        head_tail(&self.0, &tail, input)
    }
}

/// Zero or more `p` separated by `sep`, tolerating a trailing `sep`. See
/// [`Parser::sep_end_by`].
///
/// ```
/// use parsely::prelude::*;
///
/// let lines = sep_end_by::<_, _, Vec<_>>(alpha_num(), chr(';'));
/// assert_eq!(lines.parse(from_str("a;b;")), Ok(vec!["a".to_string(), "b".to_string()]));
/// assert_eq!(lines.parse(from_str("a;b")), Ok(vec!["a".to_string(), "b".to_string()]));
/// ```
pub struct SepEndBy<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for SepEndBy<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        SepEndBy(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn sep_end_by<P, Sep, O>(parser: P, sep: Sep) -> SepEndBy<P, Sep, O> {
    SepEndBy(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for SepEndBy<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        match SepEndBy1(RefParser(&self.0), RefParser(&self.1), PhantomData).run(input.clone()) {
            Consumed::Empty(Reply::Err { msg }) => {
                Consumed::Empty(Reply::Ok { value: std::iter::empty().collect(), rest: input, msg })
            }
            other => other,
        }
    }
}

/// One or more `p` separated by `sep`, tolerating a trailing `sep`. See
/// [`Parser::sep_end_by1`].
pub struct SepEndBy1<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for SepEndBy1<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        SepEndBy1(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn sep_end_by1<P, Sep, O>(parser: P, sep: Sep) -> SepEndBy1<P, Sep, O> {
    SepEndBy1(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for SepEndBy1<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let mut values = Vec::new();
        let (mut input, mut consumed) = match self.0.run(input) {
            Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
                values.push(value);
                (rest, true)
            }
            Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
            Consumed::Empty(Reply::Ok { value, rest, .. }) => {
                values.push(value);
                (rest, false)
            }
            Consumed::Empty(Reply::Err { msg }) => return Consumed::Empty(Reply::Err { msg }),
        };
        loop {
            let (sep_rest, sep_consumed, sep_msg) = match self.1.run(input.clone()) {
                Consumed::Consumed(Reply::Ok { rest, msg, .. }) => (rest, true, msg),
                Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
                Consumed::Empty(Reply::Ok { rest, msg, .. }) => (rest, false, msg),
                // No further separator: stop in front of it.
                Consumed::Empty(Reply::Err { msg }) => {
                    return Consumed::with_flag(consumed, Reply::Ok {
                        value: values.into_iter().collect(),
                        rest: input,
                        msg,
                    });
                }
            };
            match self.0.run(sep_rest.clone()) {
                Consumed::Consumed(Reply::Ok { value, rest, .. }) => {
                    values.push(value);
                    input = rest;
                    consumed = true;
                }
                Consumed::Consumed(Reply::Err { msg }) => return Consumed::Consumed(Reply::Err { msg }),
                Consumed::Empty(Reply::Ok { value, rest, .. }) => {
                    values.push(value);
                    consumed |= sep_consumed;
                    // Neither side advanced: stop rather than spin.
                    if !sep_consumed && rest.position() == input.position() {
                        let msg = Message::empty(rest.position());
                        return Consumed::with_flag(consumed, Reply::Ok {
                            value: values.into_iter().collect(),
                            rest,
                            msg,
                        });
                    }
                    input = rest;
                }
                // The separator turned out to be trailing; keep it consumed.
                Consumed::Empty(Reply::Err { msg }) => {
                    let reply = Reply::Ok { value: values.into_iter().collect(), rest: sep_rest, msg: sep_msg.merge(msg) };
                    return Consumed::with_flag(consumed || sep_consumed, reply);
                }
            }
        }
    }
}

/// Zero or more `p`, each terminated by `sep`. See [`Parser::end_by`].
///
/// ```
/// use parsely::prelude::*;
///
/// let stmts = end_by::<_, _, Vec<_>>(alpha_num(), chr(';'));
/// assert_eq!(stmts.parse(from_str("a;b;")), Ok(vec!["a".to_string(), "b".to_string()]));
/// assert!(stmts.parse(from_str("a;b")).is_err()); // missing terminator
/// ```
pub struct EndBy<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for EndBy<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        EndBy(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn end_by<P, Sep, O>(parser: P, sep: Sep) -> EndBy<P, Sep, O> {
    EndBy(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for EndBy<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let unit = Left(RefParser(&self.0), RefParser(&self.1));
        let mut repeat = Repeat::new(&unit, input);
        let values: O = repeat.by_ref().collect();
        repeat.finish(values)
    }
}

/// One or more `p`, each terminated by `sep`. See [`Parser::end_by1`].
pub struct EndBy1<P, Sep, O>(P, Sep, PhantomData<fn() -> O>);
impl<P: Clone, Sep: Clone, O> Clone for EndBy1<P, Sep, O> {
    #[inline]
    fn clone(&self) -> Self {
        EndBy1(self.0.clone(), self.1.clone(), PhantomData)
    }
}
#[inline]
pub fn end_by1<P, Sep, O>(parser: P, sep: Sep) -> EndBy1<P, Sep, O> {
    EndBy1(parser, sep, PhantomData)
}
impl<I: Input, P: Parser<I>, Sep: Parser<I>, O: FromIterator<P::Output>> Parser<I> for EndBy1<P, Sep, O> {
    type Output = O;
    fn run(&self, input: I) -> IResult<I, O> {
        let unit = Left(RefParser(&self.0), RefParser(&self.1));
        head_tail(&unit, &unit, input)
    }
}
