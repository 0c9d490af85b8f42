//! Renders a Program as the canonical XML document consumed by the
//! interpreter.
//!
//! ```text
//! <program language="IPPcode20">
//!   <instruction order="1" opcode="MOVE">
//!     <arg1 type="var">GF@x</arg1>
//!     <arg2 type="string">hello</arg2>
//!   </instruction>
//! </program>
//! ```
use super::ast::{Instruction, Program};

pub fn serialize(program: &Program) -> String {
    let mut out = String::with_capacity(64 + program.instructions().len() * 96);
    out.push_str(&format!("<program language=\"{}\">\n", escape(program.language())));
    for (idx, ins) in program.instructions().iter().enumerate() {
        write_instruction(&mut out, idx + 1, ins);
    }
    out.push_str("</program>\n");
    out
}

fn write_instruction(out: &mut String, order: usize, ins: &Instruction) {
    out.push_str(&format!("  <instruction order=\"{}\" opcode=\"{}\">\n", order, ins.opcode()));
    for (idx, arg) in ins.operands().iter().enumerate() {
        out.push_str(&format!(
            "    <arg{n} type=\"{}\">{}</arg{n}>\n",
            arg.kind(),
            escape(arg.content()),
            n = idx + 1
        ));
    }
    out.push_str("  </instruction>\n");
}

/// Replaces the five reserved markup characters with entities.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _    => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ast::{Arg, ArgKind, Opcode};

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape(""), "");
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape("\\032ěšč"), "\\032ěšč");
    }

    #[test]
    fn test_serialize() {
        let program = Program::new(vec![
            Instruction::new(Opcode::MOVE, vec![
                Arg::new(ArgKind::Var, "GF@x"),
                Arg::new(ArgKind::String, "hello"),
            ]),
            Instruction::new(Opcode::BREAK, vec![]),
        ], 0);

        assert_eq!(serialize(&program), "\
<program language=\"IPPcode20\">
  <instruction order=\"1\" opcode=\"MOVE\">
    <arg1 type=\"var\">GF@x</arg1>
    <arg2 type=\"string\">hello</arg2>
  </instruction>
  <instruction order=\"2\" opcode=\"BREAK\">
  </instruction>
</program>
");
    }

    #[test]
    fn test_serialize_escapes_content() {
        let program = Program::new(vec![
            Instruction::new(Opcode::WRITE, vec![Arg::new(ArgKind::String, "<a&b>")]),
            Instruction::new(Opcode::PUSHS, vec![Arg::new(ArgKind::String, "")]),
        ], 0);
        let xml = serialize(&program);
        assert!(xml.contains("<arg1 type=\"string\">&lt;a&amp;b&gt;</arg1>"));
        assert!(xml.contains("<arg1 type=\"string\"></arg1>"));
    }

    #[test]
    fn test_serialize_empty_program() {
        assert_eq!(
            serialize(&Program::new(vec![], 0)),
            "<program language=\"IPPcode20\">\n</program>\n"
        );
    }
}
