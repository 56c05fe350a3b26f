//! Character cursor with line/column bookkeeping.
//!
//! Positions are 1-based. A `\n` advances the line and resets the column;
//! every other character (including `\r`) advances the column by one.

use rill_ir::Position;

#[derive(Clone)]
pub(crate) struct Cursor<'src> {
    src: &'src str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(src: &'src str, start: Position) -> Self {
        Cursor {
            src,
            offset: 0,
            line: start.line.max(1),
            column: start.column.max(1),
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'src str {
        &self.src[self.offset..]
    }

    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'src str {
        &self.src[start..self.offset]
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `c` if it is next.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Skip to (not past) the next newline, or to end of input.
    pub(crate) fn skip_line(&mut self) {
        let rest = self.rest();
        let len = memchr::memchr(b'\n', rest.as_bytes()).unwrap_or(rest.len());
        self.advance_over(len);
    }

    /// Skip past the next occurrence of `needle`. Returns `false` (having
    /// consumed everything) when it never occurs.
    pub(crate) fn skip_past(&mut self, needle: &str) -> bool {
        let rest = self.rest();
        match memchr::memmem::find(rest.as_bytes(), needle.as_bytes()) {
            Some(at) => {
                self.advance_over(at + needle.len());
                true
            }
            None => {
                self.advance_over(rest.len());
                false
            }
        }
    }

    /// Last character before the cursor that is not a space or tab.
    pub(crate) fn previous_significant(&self) -> Option<char> {
        self.src[..self.offset]
            .chars()
            .rev()
            .find(|c| *c != ' ' && *c != '\t')
    }

    /// Advance over `len` bytes of known-ASCII-boundary text, fixing up the
    /// line and column.
    fn advance_over(&mut self, len: usize) {
        let skipped = &self.src[self.offset..self.offset + len];
        let bytes = skipped.as_bytes();
        match memchr::memrchr(b'\n', bytes) {
            Some(last) => {
                let newlines = memchr::memchr_iter(b'\n', bytes).count();
                self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
                let tail = skipped[last + 1..].chars().count();
                self.column = 1 + u32::try_from(tail).unwrap_or(u32::MAX);
            }
            None => {
                let chars = skipped.chars().count();
                self.column += u32::try_from(chars).unwrap_or(u32::MAX);
            }
        }
        self.offset += len;
    }
}
