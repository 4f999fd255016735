//! Parser for `key=value` assignment sources

mod grammar;
pub mod lexer;

pub use grammar::parse;
pub use lexer::{tokenize, Token, Tokenizer};

use crate::config::Config;
use crate::error::ParseError;
use crate::store::VariableStore;

/// Tokenize and parse an assignment source in one step
pub fn parse_variables(source: &str, config: &Config) -> Result<VariableStore, ParseError> {
    parse(tokenize(source, &config.delimiters), config.trailing)
}
