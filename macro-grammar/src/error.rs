use macro_lexer::{LexError, Position, TokenStream};
use thiserror::Error;

/// A parser did not match at the cursor. An ordinary outcome, absorbed by
/// `optional` and `either`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} at {position}, found {}", .found.as_deref().unwrap_or("end of input"))]
pub struct Mismatch {
    pub expected: String,
    pub found: Option<String>,
    pub position: Position,
}

impl Mismatch {
    /// A mismatch at the stream's cursor.
    pub fn at(stream: &TokenStream, expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            found: stream.current().map(|token| token.lexeme().to_string()),
            position: stream.position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("capture label `{label}` appears twice at the same level")]
    DuplicateLabel { label: String },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Mismatch(#[from] Mismatch),
}
