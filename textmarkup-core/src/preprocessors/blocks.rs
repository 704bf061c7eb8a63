// Block splitter: the boundary between raw text input and classification.
//
// A block is a run of non-blank lines, trimmed as a whole so internal
// newlines (and indentation of inner lines) survive. Everything after this
// point works with block strings and never sees the reader.

use std::io::{self, BufRead};

/// Lazy, forward-only sequence of blocks read from `R`.
///
/// Never yields an empty block. End of input flushes whatever block is
/// pending, so a missing trailing blank line loses nothing. A read error is
/// yielded once and ends the sequence.
pub struct Blocks<R> {
    reader: R,
    line: String,
    pending: String,
    done: bool,
}

impl<R: BufRead> Blocks<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pending: String::new(),
            done: false,
        }
    }

    fn flush(&mut self) -> Option<io::Result<String>> {
        if self.pending.is_empty() {
            return None;
        }
        let block = self.pending.trim().to_string();
        self.pending.clear();
        Some(Ok(block))
    }
}

impl<R: BufRead> Iterator for Blocks<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.done = true;
                    return self.flush();
                }
                Ok(_) if self.line.trim().is_empty() => {
                    if let Some(block) = self.flush() {
                        return Some(block);
                    }
                }
                Ok(_) => self.pending.push_str(&self.line),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

pub fn blocks<R: BufRead>(reader: R) -> Blocks<R> {
    Blocks::new(reader)
}

pub fn blocks_from_str(text: &str) -> Blocks<&[u8]> {
    Blocks::new(text.as_bytes())
}
