//! This lexer splits IPPcode20 source into token lines.
use std::io::BufRead;

/// Reads physical lines and hands out the non-empty ones as tokens.
///
/// Everything from the first `#` on a line is a comment and is dropped
/// before tokenizing. Every line containing a `#` bumps the comment count,
/// including lines that are otherwise blank.
pub struct LineSource<R> {
    reader: R,
    line: usize,
    comments: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource { reader, line: 0, comments: 0 }
    }

    /// Returns the tokens of the next line that has any, or None once
    /// the input is exhausted. A read failure counts as end of input.
    pub fn next_nonempty_line(&mut self) -> Option<Vec<String>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            match self.reader.read_line(&mut buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => {
                    warn!("unable to read line {}, treating it as end of input: {}", self.line + 1, e);
                    return None;
                }
            }

            let (code, had_comment) = strip_comment(&buf);
            if had_comment {
                self.comments += 1;
            }

            let tokens = tokenize_line(code);
            if !tokens.is_empty() {
                return Some(tokens);
            }
        }
    }

    pub fn comments_seen(&self) -> usize {
        self.comments
    }

    /// 1-based number of the last physical line read.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

/// Cuts the line at the first `#`. The flag is set if a comment was cut.
pub fn strip_comment(line: &str) -> (&str, bool) {
    match line.find('#') {
        Some(idx) => (&line[..idx], true),
        None => (line, false),
    }
}

/// Splits on runs of whitespace, never producing empty tokens.
pub fn tokenize_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}
