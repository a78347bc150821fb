//! Running parsers.

use crate::{
    error::ParseError,
    input::Input,
    parser::{Parser, Reply},
    prim::eof,
};

/// Apply `parser` followed by end-of-input, and force the reply.
///
/// This is the ordinary public boundary: the reply's internal message is
/// rendered into a [`ParseError`] only on failure. Also available as
/// [`Parser::parse`].
///
/// ```
/// use parsely::prelude::*;
///
/// assert_eq!(parse(&string("ok"), from_str("ok")), Ok("ok".to_string()));
///
/// let err = parse(&string("ok"), from_str("o!")).unwrap_err();
/// assert_eq!(err.position, 1);
/// assert_eq!(format!("{}", err), "unexpected '!', expecting \"ok\" at 1");
/// ```
pub fn parse<I: Input, P: Parser<I>>(parser: &P, input: I) -> Result<P::Output, ParseError<I::Item>> {
    match parser.by_ref().left(eof()).run(input).into_inner() {
        Reply::Ok { value, .. } => Ok(value),
        Reply::Err { msg } => Err(msg.into_report()),
    }
}
