//! The frontend module is in charge of taking an
//! IPPcode20 source file and producing a Program from the
//! AST submodule, which can then be measured by the stats
//! submodule or rendered by the xml submodule.
//!
//! It does this with a line-at-a-time tokenizer and a
//! single-pass parser with no lookahead beyond the current line.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod operand;
pub mod parser;
pub mod stats;
pub mod xml;

use std::io::BufRead;

use self::ast::Program;
use self::error::ParseError;
use self::lexer::LineSource;
use self::parser::Parser;

/// Parses a whole source file. Nothing is returned unless every line
/// is valid.
pub fn parse<R: BufRead>(reader: R) -> Result<Program, ParseError> {
    Parser::new(LineSource::new(reader)).run()
}
