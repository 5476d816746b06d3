use crate::error::LexError;
use crate::lexer::lex;
use crate::token::Token;
use macro_common::{Checkpoint, Position};
use std::fmt;
use std::rc::Rc;

/// A read-only token sequence with a cursor.
///
/// The cursor always rests on a significant token or at the end; trivia
/// (whitespace and comments) stays in the sequence so the stream still
/// stringifies to the exact source, but [`current`](TokenStream::current) and
/// [`next`](TokenStream::next) never stop on it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Rc<[Token]>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut stream = Self {
            tokens: tokens.into(),
            cursor: 0,
        };
        stream.skip_trivia();
        stream
    }

    /// Lexes `source` into a fresh stream.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::new(lex(source)?))
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.cursor)
            .is_some_and(|token| token.is_trivia())
        {
            self.cursor += 1;
        }
    }

    /// The token under the cursor, or `None` once the stream is exhausted.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Moves past the current token. A no-op at the end.
    pub fn next(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
            self.skip_trivia();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Raw index of the cursor into [`tokens`](TokenStream::tokens).
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Source position of the cursor; the end of the last token when exhausted.
    pub fn position(&self) -> Position {
        match self.current() {
            Some(token) => token.position(),
            None => self
                .tokens
                .last()
                .map(|token| token.position().after(token.lexeme()))
                .unwrap_or_default(),
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.cursor, self.position())
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.index().min(self.tokens.len());
    }

    /// Tokens consumed since `start`, without the trivia that trails them.
    pub fn span_from(&self, start: usize) -> Vec<Token> {
        let mut end = self.cursor.min(self.tokens.len());
        while end > start && self.tokens[end - 1].is_trivia() {
            end -= 1;
        }
        if end <= start {
            return Vec::new();
        }
        self.tokens[start..end].to_vec()
    }

    /// The trivia run directly in front of the cursor.
    pub fn trivia_before(&self) -> &[Token] {
        let mut start = self.cursor.min(self.tokens.len());
        while start > 0 && self.tokens[start - 1].is_trivia() {
            start -= 1;
        }
        &self.tokens[start..self.cursor.min(self.tokens.len())]
    }

    /// Significant tokens from the cursor to the end, without moving it.
    pub fn remaining(&self) -> impl Iterator<Item = &Token> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.is_trivia())
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens.iter() {
            f.write_str(token.lexeme())?;
        }
        Ok(())
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
