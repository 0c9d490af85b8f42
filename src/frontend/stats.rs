//! Program statistics.
use std::collections::HashSet;
use std::io::{self, Write};

use super::ast::{ArgKind, Program};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Stats {
    pub instruction_count: usize,
    pub comment_count: usize,
    pub distinct_label_count: usize,
    pub jump_count: usize,
}

/// One requested statistic, named after its command-line flag.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stat {
    Loc,
    Comments,
    Labels,
    Jumps,
}

impl Stat {
    pub fn value(&self, stats: &Stats) -> usize {
        match self {
            Stat::Loc      => stats.instruction_count,
            Stat::Comments => stats.comment_count,
            Stat::Labels   => stats.distinct_label_count,
            Stat::Jumps    => stats.jump_count,
        }
    }
}

/// Label operands are pooled across every instruction and position;
/// each distinct label text counts once.
pub fn extract(program: &Program) -> Stats {
    let labels: HashSet<&str> = program
        .instructions()
        .iter()
        .flat_map(|ins| ins.operands().iter())
        .filter(|arg| arg.kind() == ArgKind::Label)
        .map(|arg| arg.content())
        .collect();

    Stats {
        instruction_count: program.instructions().len(),
        comment_count: program.comment_count(),
        distinct_label_count: labels.len(),
        jump_count: program.instructions().iter().filter(|ins| ins.opcode().is_jump()).count(),
    }
}

/// Writes the requested values one per line, in the order requested.
pub fn write_stats<W: Write>(out: &mut W, stats: &Stats, requested: &[Stat]) -> io::Result<()> {
    for stat in requested {
        writeln!(out, "{}", stat.value(stats))?;
    }
    Ok(())
}
