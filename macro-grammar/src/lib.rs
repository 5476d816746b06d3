//! Composable, backtracking grammar combinators over a
//! [`TokenStream`](macro_lexer::TokenStream), the capture tree they build,
//! and the class-member grammars assembled from them.

pub mod capture;
pub mod combinators;
pub mod error;
pub mod grammar;
pub mod grammars;
pub mod label;
pub mod traits;

pub use capture::{Capture, CaptureTree, Node};
pub use combinators::{
    buffer, chain, either, expression, layer, ls, ns, optional, repeat, token, Buffer, Chain,
    Either, Expression, Labeled, Layer, Ls, Ns, Optional, Repeat, TokenOf,
};
pub use error::{GrammarError, Mismatch};
pub use grammar::{validate, Grammar};
pub use label::Label;
pub use traits::{BoxedParser, ParseResult, Parser, ParserExt};
