mod bracket_parser;
mod parse_error;
mod stack_parser;

pub use bracket_parser::{parse_postfix, parse_prefix, Notation};
pub use parse_error::ParseError;
pub use stack_parser::parse;
