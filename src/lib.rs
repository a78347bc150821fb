#![doc = include_str!("../README.md")]

pub mod char;
pub mod error;
pub mod input;
pub mod parse;
pub mod parser;
pub mod prelude;
pub mod prim;

pub use error::{Message, ParseError, Unexpected};
pub use input::{from_chars, from_slice, from_str, Input, TextInput};
pub use parser::{Consumed, IResult, Parser, Reply};
