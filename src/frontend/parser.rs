//! The Parser module pulls token lines from a LineSource
//! and converts them into a Program.
use std::io::BufRead;

use super::ast::*;
use super::error::{ErrorKind, ParseError};
use super::lexer::LineSource;
use super::operand::classify;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum State {
    ExpectHeader,
    Accumulating,
    Done,
}

pub struct Parser<R> {
    source: LineSource<R>,
    state: State,
    instructions: Vec<Instruction>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(source: LineSource<R>) -> Self {
        Parser { source, state: State::ExpectHeader, instructions: Vec::new() }
    }

    /// Run the parser, consuming itself and returning the program.
    /// Stops at the first error.
    pub fn run(mut self) -> Result<Program, ParseError> {
        'mainloop: loop {
            self.state = match self.state {
                State::ExpectHeader => self.header()?,
                State::Accumulating => self.instruction()?,
                State::Done => break 'mainloop,
            };
        }

        info!(
            "parsed {} instruction(s), {} comment(s)",
            self.instructions.len(),
            self.source.comments_seen()
        );
        Ok(Program::new(self.instructions, self.source.comments_seen()))
    }

    fn header(&mut self) -> Result<State, ParseError> {
        match self.source.next_nonempty_line() {
            Some(ref tokens) if tokens.len() == 1 && tokens[0] == HEADER => Ok(State::Accumulating),
            Some(tokens) => Err(ParseError::new(
                ErrorKind::InvalidHeader,
                format!("expected `{}`, got `{}`", HEADER, tokens.join(" ")),
            )
            .at_line(self.source.line_number())),
            None => Err(ParseError::new(
                ErrorKind::InvalidHeader,
                format!("expected `{}`, got end of input", HEADER),
            )),
        }
    }

    fn instruction(&mut self) -> Result<State, ParseError> {
        let tokens = match self.source.next_nonempty_line() {
            Some(tokens) => tokens,
            // No lines left means we're out of instructions.
            None => return Ok(State::Done),
        };

        let line = self.source.line_number();
        let ins = build_line(&tokens).map_err(|e| e.at_line(line))?;
        debug!("line {}: {}", line, ins);
        self.instructions.push(ins);
        Ok(State::Accumulating)
    }
}

/// Builds an instruction from a non-empty token line. The first token is
/// the opcode and is upper-cased before lookup.
pub fn build_line(tokens: &[String]) -> Result<Instruction, ParseError> {
    let (mnemonic, operands) = match tokens.split_first() {
        Some(split) => split,
        None => return Err(ParseError::new(ErrorKind::InvalidOpcode, "empty instruction line")),
    };

    let opcode = Opcode::lookup(&mnemonic.to_uppercase()).ok_or_else(|| {
        ParseError::new(ErrorKind::InvalidOpcode, format!("unknown opcode `{}`", mnemonic))
    })?;

    build_instruction(opcode, operands)
}

/// Checks arity, then classifies each operand against its position.
pub fn build_instruction(opcode: Opcode, operands: &[String]) -> Result<Instruction, ParseError> {
    let expected = opcode.operands();
    if operands.len() != expected.len() {
        return Err(ParseError::new(
            ErrorKind::WrongOperandCount,
            format!("{} takes {} operand(s), got {}", opcode, expected.len(), operands.len()),
        ));
    }

    let args = expected
        .iter()
        .zip(operands.iter())
        .map(|(kind, token)| classify(*kind, token))
        .collect::<Result<Vec<Arg>, ParseError>>()?;

    Ok(Instruction::new(opcode, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Program, ParseError> {
        Parser::new(LineSource::new(src.as_bytes())).run()
    }

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_build_instruction() {
        assert_eq!(
            build_instruction(Opcode::MOVE, &tokens("GF@x int@42")),
            Ok(Instruction::new(Opcode::MOVE, vec![
                Arg::new(ArgKind::Var, "GF@x"),
                Arg::new(ArgKind::Int, "42"),
            ]))
        );
        assert_eq!(
            build_instruction(Opcode::JUMPIFEQ, &tokens("end LF@a nil@nil")),
            Ok(Instruction::new(Opcode::JUMPIFEQ, vec![
                Arg::new(ArgKind::Label, "end"),
                Arg::new(ArgKind::Var, "LF@a"),
                Arg::new(ArgKind::Nil, "nil"),
            ]))
        );
        assert_eq!(
            build_instruction(Opcode::READ, &tokens("TF@in bool")),
            Ok(Instruction::new(Opcode::READ, vec![
                Arg::new(ArgKind::Var, "TF@in"),
                Arg::new(ArgKind::Type, "bool"),
            ]))
        );
        assert_eq!(build_instruction(Opcode::CREATEFRAME, &[]), Ok(Instruction::new(Opcode::CREATEFRAME, vec![])));
    }

    #[test]
    fn test_build_instruction_arity() {
        let err = build_instruction(Opcode::MOVE, &tokens("GF@x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongOperandCount);

        let err = build_instruction(Opcode::MOVE, &tokens("GF@x int@1 int@2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongOperandCount);

        let err = build_instruction(Opcode::BREAK, &tokens("GF@x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongOperandCount);
    }

    #[test]
    fn test_build_instruction_operand_type() {
        let err = build_instruction(Opcode::MOVE, &tokens("GF@x notaliteral")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperandType);

        // The destination of MOVE must be a variable.
        let err = build_instruction(Opcode::MOVE, &tokens("int@1 GF@x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperandType);
    }

    #[test]
    fn test_build_line() {
        assert_eq!(
            build_line(&tokens("move GF@x bool@true")),
            Ok(Instruction::new(Opcode::MOVE, vec![
                Arg::new(ArgKind::Var, "GF@x"),
                Arg::new(ArgKind::Bool, "true"),
            ]))
        );
        assert_eq!(build_line(&tokens("UNKNOWNOP GF@x")).unwrap_err().kind(), ErrorKind::InvalidOpcode);
        assert_eq!(build_line(&[]).unwrap_err().kind(), ErrorKind::InvalidOpcode);
    }

    #[test]
    fn test_run() {
        let program = parse("\
.IPPcode20
DEFVAR GF@x
MOVE GF@x int@42
LABEL loop
JUMP loop
").unwrap();

        let opcodes: Vec<Opcode> = program.instructions().iter().map(|ins| ins.opcode()).collect();
        assert_eq!(opcodes, vec![Opcode::DEFVAR, Opcode::MOVE, Opcode::LABEL, Opcode::JUMP]);
        assert_eq!(program.comment_count(), 0);
        assert_eq!(program.instructions()[3].operands(), &[Arg::new(ArgKind::Label, "loop")]);
    }

    #[test]
    fn test_run_counts_comments() {
        let program = parse("\
# program start
.IPPcode20 # header
DEFVAR GF@x
   # nothing here

WRITE GF@x # print it
").unwrap();
        assert_eq!(program.instructions().len(), 2);
        assert_eq!(program.comment_count(), 4);
    }

    #[test]
    fn test_run_header_only() {
        let program = parse(".IPPcode20\n").unwrap();
        assert!(program.instructions().is_empty());
        assert_eq!(program.language(), "IPPcode20");
    }

    #[test]
    fn test_run_header_with_surrounding_whitespace() {
        assert!(parse("   .IPPcode20  \t\nBREAK\n").is_ok());
    }

    #[test]
    fn test_run_skips_blank_lines_before_header() {
        let program = parse("\n  \t\n\n.IPPcode20\nBREAK\n").unwrap();
        assert_eq!(program.instructions().len(), 1);
        assert_eq!(program.comment_count(), 0);

        let err = parse("\n\nBREAK\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHeader);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_run_invalid_header() {
        let err = parse("DEFVAR GF@x\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHeader);
        assert_eq!(err.line(), Some(1));

        assert_eq!(parse("").unwrap_err().kind(), ErrorKind::InvalidHeader);
        assert_eq!(parse(".ippcode20\n").unwrap_err().kind(), ErrorKind::InvalidHeader);
        assert_eq!(parse(".IPPcode20 extra\n").unwrap_err().kind(), ErrorKind::InvalidHeader);
        assert_eq!(parse(".IPPcode19\n").unwrap_err().kind(), ErrorKind::InvalidHeader);
    }

    #[test]
    fn test_run_stops_at_first_error() {
        let err = parse("\
.IPPcode20
DEFVAR GF@x
UNKNOWNOP GF@x
MOVE GF@x
").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOpcode);
        assert_eq!(err.line(), Some(3));

        let err = parse(".IPPcode20\nMOVE GF@x\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongOperandCount);
        assert_eq!(err.line(), Some(2));

        let err = parse(".IPPcode20\nMOVE GF@x notaliteral\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperandType);
    }
}
