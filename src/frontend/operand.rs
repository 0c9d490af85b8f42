//! Operand classification.
//!
//! A raw token is checked against the lexical form its position expects.
//! For `Symb` positions the forms in [`SYMBOL_FORMS`] are tried in order
//! and the first match decides the concrete kind.
use lazy_static::lazy_static;
use regex::Regex;

use super::ast::{Arg, ArgKind, ExpectedKind};
use super::error::{ErrorKind, ParseError};

lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r"^(?P<frame>GF|LF|TF)@(?P<name>.+)$").unwrap();
    static ref STRING: Regex = Regex::new(r"^string@(?P<payload>.*)$").unwrap();
    static ref INT: Regex = Regex::new(r"^int@(?P<payload>[+-]?[0-9]+)$").unwrap();
    static ref BOOL: Regex = Regex::new(r"^bool@(?P<payload>true|false)$").unwrap();
    static ref NIL: Regex = Regex::new(r"^nil@(?P<payload>nil)$").unwrap();
    static ref TYPE: Regex = Regex::new(r"^(int|bool|string)$").unwrap();
}

type Extractor = fn(&str) -> Option<String>;

/// Forms accepted in a `Symb` position, highest priority first.
pub const SYMBOL_FORMS: [(ArgKind, Extractor); 5] = [
    (ArgKind::Var, variable),
    (ArgKind::String, string_literal),
    (ArgKind::Int, int_literal),
    (ArgKind::Bool, bool_literal),
    (ArgKind::Nil, nil_literal),
];

/// Classifies `token` against the kind expected in its position.
pub fn classify(expected: ExpectedKind, token: &str) -> Result<Arg, ParseError> {
    let arg = match expected {
        ExpectedKind::Var => variable(token).map(|content| Arg::new(ArgKind::Var, content)),
        ExpectedKind::Label => Some(Arg::new(ArgKind::Label, token)),
        ExpectedKind::Type => type_keyword(token).map(|content| Arg::new(ArgKind::Type, content)),
        ExpectedKind::Symb => symbol(token),
    };

    arg.ok_or_else(|| {
        ParseError::new(
            ErrorKind::InvalidOperandType,
            format!("expected a {}, got `{}`", expected, token),
        )
    })
}

fn symbol(token: &str) -> Option<Arg> {
    SYMBOL_FORMS
        .iter()
        .find_map(|(kind, extract)| extract(token).map(|content| Arg::new(*kind, content)))
}

/// `GF@name`, `LF@name` or `TF@name`. The frame is matched in upper case
/// only; the name is kept verbatim.
pub fn variable(token: &str) -> Option<String> {
    VARIABLE.captures(token).map(|caps| {
        format!("{}@{}", caps["frame"].to_uppercase(), &caps["name"])
    })
}

/// `string@payload`; the payload may be empty and escapes pass through.
pub fn string_literal(token: &str) -> Option<String> {
    payload(&STRING, token)
}

/// `int@digits` with an optional sign.
pub fn int_literal(token: &str) -> Option<String> {
    payload(&INT, token)
}

pub fn bool_literal(token: &str) -> Option<String> {
    payload(&BOOL, token)
}

pub fn nil_literal(token: &str) -> Option<String> {
    payload(&NIL, token)
}

pub fn type_keyword(token: &str) -> Option<String> {
    if TYPE.is_match(token) {
        Some(token.to_owned())
    } else {
        None
    }
}

fn payload(re: &Regex, token: &str) -> Option<String> {
    re.captures(token).map(|caps| caps["payload"].to_owned())
}
