use crate::capture::Capture;
use crate::combinators::Labeled;
use crate::error::Mismatch;
use crate::label::Label;
use macro_lexer::{Token, TokenStream};
use std::fmt;
use std::rc::Rc;

pub type ParseResult = Result<Capture, Mismatch>;

/// A shared, type-erased parser.
pub type BoxedParser = Rc<dyn Parser>;

/// A grammar rule over a [`TokenStream`].
///
/// Parsers compose; nothing is ever subclassed. Every implementation must
/// leave the cursor where it found it when it returns `Err`.
pub trait Parser: fmt::Debug {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult;

    /// Quick check: can this parser possibly match at `current`?
    ///
    /// - `Some(true)`  - it might match
    /// - `Some(false)` - it definitely won't match
    /// - `None`        - unknown, run the full parse
    #[inline]
    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        let _ = current;
        None
    }

    /// Short human-readable description used in mismatch reports.
    fn expected(&self) -> String {
        "a match".to_string()
    }

    /// Labels this parser contributes to the enclosing capture tree level.
    fn labels(&self) -> Vec<Label> {
        Vec::new()
    }

    /// Direct sub-parsers.
    fn children(&self) -> Vec<&dyn Parser> {
        Vec::new()
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        (**self).parse(stream)
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        (**self).quick_check(current)
    }

    fn expected(&self) -> String {
        (**self).expected()
    }

    fn labels(&self) -> Vec<Label> {
        (**self).labels()
    }

    fn children(&self) -> Vec<&dyn Parser> {
        (**self).children()
    }
}

pub trait ParserExt: Parser + Sized + 'static {
    /// Records this parser's capture under `label` (`.as(label)` elsewhere).
    fn labeled(self, label: impl Into<Label>) -> Labeled<Self> {
        Labeled::new(self, label.into())
    }

    fn boxed(self) -> BoxedParser {
        Rc::new(self)
    }
}

impl<P: Parser + Sized + 'static> ParserExt for P {}
