use crate::Position;

/// Read position over an immutable source buffer.
///
/// Tracks the byte offset alongside the 1-based line and column so every
/// token can be stamped without rescanning. A newline moves to the next line
/// and resets the column.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Cursor<'src> {
        Cursor {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Source text from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remainder().chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remainder().starts_with(prefix)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    /// Consumes `n` characters, stopping early at end of input.
    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consumes `len` bytes. `len` must land on a character boundary, which
    /// holds for lengths taken from regex matches on the remainder.
    pub fn advance_bytes(&mut self, len: usize) {
        let target = self.pos + len;
        while self.pos < target && self.bump().is_some() {}
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.bump();
        }
        self.pos - start
    }
}
