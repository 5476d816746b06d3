use macro_common::{Checkpoint, Position};

/// A character cursor over lexer input.
#[derive(Debug, Clone)]
pub struct Cursor<'input> {
    input: &'input str,
    current: usize,
    position: Position,
}

impl<'input> Cursor<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            current: 0,
            position: Position::new(),
        }
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    pub fn is_eof(&self) -> bool {
        self.current >= self.input.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the character `n` places ahead without advancing.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position.advance(ch);
        self.current += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `prefix` if the input continues with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if !self.starts_with(prefix) {
            return false;
        }
        for _ in prefix.chars() {
            self.advance();
        }
        true
    }

    /// Consumes characters while the predicate returns true.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> &'input str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.current;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        &self.input[start..self.current]
    }

    /// Input consumed since `start` (a byte offset taken from [`Cursor::offset`]).
    pub fn slice_from(&self, start: usize) -> &'input str {
        &self.input[start..self.current]
    }

    pub fn remaining(&self) -> &'input str {
        &self.input[self.current..]
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current, self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.index();
        self.position = checkpoint.position();
    }
}
