//! Parse failures. Every failure is fatal: the first one aborts the run.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The first line is missing or is not `.IPPcode20`.
    InvalidHeader,
    /// The first token of a line is not a known opcode.
    InvalidOpcode,
    /// The number of operands differs from what the opcode expects.
    WrongOperandCount,
    /// An operand does not match the lexical form expected in its position.
    InvalidOperandType,
}

impl ErrorKind {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::InvalidHeader      => 21,
            ErrorKind::InvalidOpcode      => 22,
            ErrorKind::WrongOperandCount  => 23,
            ErrorKind::InvalidOperandType => 24,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ErrorKind::InvalidHeader      => "invalid header",
            ErrorKind::InvalidOpcode      => "invalid opcode",
            ErrorKind::WrongOperandCount  => "wrong operand count",
            ErrorKind::InvalidOperandType => "invalid operand type",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
    kind: ErrorKind,
    line: Option<usize>,
    message: String,
}

impl ParseError {
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        ParseError { kind, line: None, message: message.into() }
    }

    /// Attaches the 1-based source line the error was found on.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self.line {
            Some(line) => write!(f, "{} on line {}: {}", self.kind.describe(), line, self.message),
            None => write!(f, "{}: {}", self.kind.describe(), self.message),
        }
    }
}
