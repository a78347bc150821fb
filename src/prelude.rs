//! A convenience prelude: `use parsely::prelude::*;` pulls in the traits,
//! input constructors and every parser-building function.

pub use either::Either;

pub use crate::{
    char::{
        alpha, alpha_num, chr, dble, digit, intr, is_space_char, lng, number, regex, space, str_between, string,
        wspace, wspaces,
    },
    error::{Message, ParseError, Unexpected},
    input::{from_chars, from_slice, from_str, CharsInput, Input, SliceInput, StrInput, TextInput},
    parse::parse,
    parser::{
        chain::{chainl, chainl1, chainr, chainr1},
        choice::{choice, option, optional, or_not},
        many::{count, many, many1, skip_many, skip_many1},
        sep::{end_by, end_by1, sep_by, sep_by1, sep_end_by, sep_end_by1},
        then::{between, bind, left, map, then, to},
        Consumed, IResult, Parser, Reply,
    },
    prim::{
        any, attempt, eof, fail, fail_expecting, item, item_to, label, none_of, one_of, parser, pure, satisfy,
    },
};
