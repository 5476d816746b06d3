use macro_common::Position;
use thiserror::Error;

/// Failures raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("unterminated {what} starting at {position}")]
    Unterminated {
        what: &'static str,
        position: Position,
    },
}
