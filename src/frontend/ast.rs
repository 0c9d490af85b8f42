//! This AST describes a parsed IPPcode20 program.
//!
//! Execution begins with the first instruction in the file.
//! Comments start with a hash (#) and run to the end of the line.
//! Instructions are delimited by newlines, operands by whitespace.
//!
//! Example source file:
//!
//! ```text
//! .IPPcode20
//! DEFVAR GF@counter      # variables live in GF, LF or TF
//! MOVE GF@counter int@0
//! LABEL loop
//! ADD GF@counter GF@counter int@1
//! JUMPIFNEQ loop GF@counter int@10
//! WRITE string@done\010
//! ```
//!
//! The opcode table lives in [`Opcode::operands`]. Every opcode lists the
//! kinds of operand it expects, in order; `Symb` stands for any variable
//! or typed literal.

use std::fmt;

/// Language name written into the canonical document.
pub const LANGUAGE: &str = "IPPcode20";

/// The only accepted first line of a source file.
pub const HEADER: &str = ".IPPcode20";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Program {
    language: String,
    instructions: Vec<Instruction>,
    comment_count: usize,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, comment_count: usize) -> Self {
        Program {
            language: LANGUAGE.to_owned(),
            instructions,
            comment_count,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Instructions in source order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn comment_count(&self) -> usize {
        self.comment_count
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    opcode: Opcode,
    operands: Vec<Arg>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Arg>) -> Self {
        Instruction { opcode, operands }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn operands(&self) -> &[Arg] {
        &self.operands
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for arg in self.operands.iter() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A single classified operand.
///
/// For `Var` the content is `FRAME@name`. For literals it is the payload
/// following the `kind@` prefix, exactly as written. Labels and types keep
/// the raw token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Arg {
    kind: ArgKind,
    content: String,
}

impl Arg {
    pub fn new<S: Into<String>>(kind: ArgKind, content: S) -> Self {
        Arg { kind, content: content.into() }
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.content)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArgKind {
    Int,
    Bool,
    String,
    Nil,
    Label,
    Type,
    Var,
}

impl ArgKind {
    /// Name used in the `type` attribute of the canonical document.
    pub fn name(&self) -> &'static str {
        use ArgKind::*;
        match self {
            Int    => "int",
            Bool   => "bool",
            String => "string",
            Nil    => "nil",
            Label  => "label",
            Type   => "type",
            Var    => "var",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an opcode expects in a given operand position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExpectedKind {
    Var,
    Label,
    Type,
    /// Any variable or typed literal.
    Symb,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExpectedKind::Var   => f.write_str("variable"),
            ExpectedKind::Label => f.write_str("label"),
            ExpectedKind::Type  => f.write_str("type"),
            ExpectedKind::Symb  => f.write_str("variable or literal"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Opcode {
    // Frames and function calls
    MOVE,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    CALL,
    RETURN,
    // Data stack
    PUSHS,
    POPS,
    // Arithmetic, relational, boolean and conversion
    ADD,
    SUB,
    MUL,
    IDIV,
    LT,
    GT,
    EQ,
    AND,
    OR,
    NOT,
    INT2CHAR,
    STRI2INT,
    // Input/output
    READ,
    WRITE,
    // Strings
    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,
    // Types
    TYPE,
    // Control flow
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    EXIT,
    // Debugging
    DPRINT,
    BREAK,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Opcode {
    pub const ALL: [Opcode; 35] = {
        use Opcode::*;
        [
            MOVE, CREATEFRAME, PUSHFRAME, POPFRAME, DEFVAR, CALL, RETURN,
            PUSHS, POPS,
            ADD, SUB, MUL, IDIV, LT, GT, EQ, AND, OR, NOT, INT2CHAR, STRI2INT,
            READ, WRITE,
            CONCAT, STRLEN, GETCHAR, SETCHAR,
            TYPE,
            LABEL, JUMP, JUMPIFEQ, JUMPIFNEQ, EXIT,
            DPRINT, BREAK,
        ]
    };

    /// Looks up an opcode by its mnemonic. The lookup is case-sensitive;
    /// callers upper-case the mnemonic first.
    pub fn lookup(name: &str) -> Option<Opcode> {
        use Opcode::*;
        match name {
            "MOVE"        => Some(MOVE),
            "CREATEFRAME" => Some(CREATEFRAME),
            "PUSHFRAME"   => Some(PUSHFRAME),
            "POPFRAME"    => Some(POPFRAME),
            "DEFVAR"      => Some(DEFVAR),
            "CALL"        => Some(CALL),
            "RETURN"      => Some(RETURN),
            "PUSHS"       => Some(PUSHS),
            "POPS"        => Some(POPS),
            "ADD"         => Some(ADD),
            "SUB"         => Some(SUB),
            "MUL"         => Some(MUL),
            "IDIV"        => Some(IDIV),
            "LT"          => Some(LT),
            "GT"          => Some(GT),
            "EQ"          => Some(EQ),
            "AND"         => Some(AND),
            "OR"          => Some(OR),
            "NOT"         => Some(NOT),
            "INT2CHAR"    => Some(INT2CHAR),
            "STRI2INT"    => Some(STRI2INT),
            "READ"        => Some(READ),
            "WRITE"       => Some(WRITE),
            "CONCAT"      => Some(CONCAT),
            "STRLEN"      => Some(STRLEN),
            "GETCHAR"     => Some(GETCHAR),
            "SETCHAR"     => Some(SETCHAR),
            "TYPE"        => Some(TYPE),
            "LABEL"       => Some(LABEL),
            "JUMP"        => Some(JUMP),
            "JUMPIFEQ"    => Some(JUMPIFEQ),
            "JUMPIFNEQ"   => Some(JUMPIFNEQ),
            "EXIT"        => Some(EXIT),
            "DPRINT"      => Some(DPRINT),
            "BREAK"       => Some(BREAK),
            _             => None,
        }
    }

    /// Returns the operand kinds the opcode expects, in order.
    /// This is the only place arity is defined.
    pub fn operands(&self) -> &'static [ExpectedKind] {
        use ExpectedKind::*;
        use Opcode::*;
        match self {
            CREATEFRAME | PUSHFRAME | POPFRAME |
            RETURN      | BREAK                   => &[],

            DEFVAR | POPS                         => &[Var],
            CALL   | LABEL | JUMP                 => &[Label],
            PUSHS  | WRITE | EXIT | DPRINT        => &[Symb],

            MOVE   | NOT   | INT2CHAR |
            STRLEN | TYPE                         => &[Var, Symb],
            READ                                  => &[Var, Type],

            ADD    | SUB     | MUL     | IDIV |
            LT     | GT      | EQ      |
            AND    | OR      |
            STRI2INT | CONCAT | GETCHAR | SETCHAR => &[Var, Symb, Symb],

            JUMPIFEQ | JUMPIFNEQ                  => &[Label, Symb, Symb],
        }
    }

    /// Control-transfer instructions, as counted by the `jumps` statistic.
    pub fn is_jump(&self) -> bool {
        use Opcode::*;
        matches!(self, CALL | RETURN | JUMP | JUMPIFEQ | JUMPIFNEQ)
    }
}
