//! Shared building blocks for the lexer and the grammar combinators.

pub mod checkpoint;
pub mod position;

pub use checkpoint::Checkpoint;
pub use position::Position;
