//! Tokens, the rule-based lexer that produces them, and the cursor-addressable
//! [`TokenStream`] every grammar combinator and expander reads.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod rules;
pub mod stream;
pub mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{lex, Lexer};
pub use macro_common::{Checkpoint, Position};
pub use rules::{
    default_rules, CommentRule, LexingRule, NumberRule, PunctRule, StringRule, TagRule,
    VariableRule, WhitespaceRule, WordRule,
};
pub use stream::TokenStream;
pub use token::{is_keyword, Token, TokenKind, KEYWORDS};
