//! Primitive and composite parsers.
//!
//! Backtracking is purely positional: a parser that fails restores the
//! checkpoint it took on entry, so alternatives can be retried from the same
//! cursor without any memoization.

use crate::capture::{Capture, CaptureTree};
use crate::error::Mismatch;
use crate::label::Label;
use crate::traits::{BoxedParser, ParseResult, Parser};
use log::{trace, warn};
use macro_lexer::{Token, TokenKind, TokenStream};

/// Builds a [`Chain`] from heterogeneous parsers.
#[macro_export]
macro_rules! chain {
    ($($parser:expr),+ $(,)?) => {
        $crate::combinators::chain(vec![$($crate::ParserExt::boxed($parser)),+])
    };
}

/// Builds an [`Either`] from heterogeneous parsers.
#[macro_export]
macro_rules! either {
    ($($parser:expr),+ $(,)?) => {
        $crate::combinators::either(vec![$($crate::ParserExt::boxed($parser)),+])
    };
}

/// Matches one token of the given kind.
#[derive(Debug, Clone)]
pub struct TokenOf {
    kind: TokenKind,
}

pub fn token(kind: TokenKind) -> TokenOf {
    TokenOf { kind }
}

impl Parser for TokenOf {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        match stream.current() {
            Some(token) if token.kind() == self.kind => {
                let token = token.clone();
                stream.next();
                Ok(Capture::leaf(vec![token]))
            }
            _ => Err(Mismatch::at(stream, self.expected())),
        }
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        Some(current.is_some_and(|token| token.kind() == self.kind))
    }

    fn expected(&self) -> String {
        self.kind.name().to_string()
    }
}

/// Matches one token by its exact lexeme.
#[derive(Debug, Clone)]
pub struct Buffer {
    literal: String,
}

pub fn buffer(literal: impl Into<String>) -> Buffer {
    Buffer {
        literal: literal.into(),
    }
}

impl Parser for Buffer {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        match stream.current() {
            Some(token) if token.lexeme() == self.literal => {
                let token = token.clone();
                stream.next();
                Ok(Capture::leaf(vec![token]))
            }
            _ => Err(Mismatch::at(stream, self.expected())),
        }
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        Some(current.is_some_and(|token| token.lexeme() == self.literal))
    }

    fn expected(&self) -> String {
        format!("`{}`", self.literal)
    }
}

/// All parsers in order, atomically.
#[derive(Debug, Clone)]
pub struct Chain {
    parsers: Vec<BoxedParser>,
}

pub fn chain(parsers: Vec<BoxedParser>) -> Chain {
    Chain { parsers }
}

impl Parser for Chain {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();
        let start = stream.index();
        let mut tree = CaptureTree::default();

        for parser in &self.parsers {
            match parser.parse(stream) {
                Ok(capture) => tree.absorb(capture),
                Err(mismatch) => {
                    stream.restore(checkpoint);
                    return Err(mismatch);
                }
            }
        }

        Ok(Capture::tree(stream.span_from(start), tree))
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        self.parsers.first()?.quick_check(current)
    }

    fn expected(&self) -> String {
        self.parsers
            .first()
            .map(|parser| parser.expected())
            .unwrap_or_else(|| "nothing".to_string())
    }

    fn labels(&self) -> Vec<Label> {
        self.parsers.iter().flat_map(|parser| parser.labels()).collect()
    }

    fn children(&self) -> Vec<&dyn Parser> {
        self.parsers.iter().map(|parser| &**parser).collect()
    }
}

/// The first alternative that matches, tried strictly left to right.
#[derive(Debug, Clone)]
pub struct Either {
    alternatives: Vec<BoxedParser>,
}

pub fn either(alternatives: Vec<BoxedParser>) -> Either {
    Either { alternatives }
}

impl Parser for Either {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();

        for (index, alternative) in self.alternatives.iter().enumerate() {
            if let Some(false) = alternative.quick_check(stream.current()) {
                continue;
            }
            match alternative.parse(stream) {
                Ok(capture) => return Ok(capture),
                Err(mismatch) => {
                    trace!("either: alternative {index} rejected: {mismatch}");
                    stream.restore(checkpoint);
                }
            }
        }

        Err(Mismatch::at(stream, self.expected()))
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        let mut verdict = Some(false);
        for alternative in &self.alternatives {
            match alternative.quick_check(current) {
                Some(false) => {}
                Some(true) => return Some(true),
                None => verdict = None,
            }
        }
        verdict
    }

    fn expected(&self) -> String {
        let options: Vec<String> = self.alternatives.iter().map(|a| a.expected()).collect();
        format!("one of {}", options.join(", "))
    }

    fn labels(&self) -> Vec<Label> {
        let mut labels: Vec<Label> = Vec::new();
        for label in self.alternatives.iter().flat_map(|a| a.labels()) {
            if !labels.iter().any(|known| known.name() == label.name()) {
                labels.push(label);
            }
        }
        labels
    }

    fn children(&self) -> Vec<&dyn Parser> {
        self.alternatives.iter().map(|parser| &**parser).collect()
    }
}

/// Never fails: a miss becomes an empty capture.
#[derive(Debug, Clone)]
pub struct Optional<P> {
    inner: P,
}

pub fn optional<P: Parser>(inner: P) -> Optional<P> {
    Optional { inner }
}

impl<P: Parser> Parser for Optional<P> {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();
        match self.inner.parse(stream) {
            Ok(capture) => Ok(capture),
            Err(mismatch) => {
                trace!("optional: absorbed {mismatch}");
                stream.restore(checkpoint);
                Ok(Capture::empty())
            }
        }
    }

    fn expected(&self) -> String {
        self.inner.expected()
    }

    fn labels(&self) -> Vec<Label> {
        self.inner.labels()
    }

    fn children(&self) -> Vec<&dyn Parser> {
        vec![&self.inner as &dyn Parser]
    }
}

/// Zero or more matches, collected as sibling captures.
#[derive(Debug, Clone)]
pub struct Repeat<P> {
    inner: P,
}

pub fn repeat<P: Parser>(inner: P) -> Repeat<P> {
    Repeat { inner }
}

impl<P: Parser> Parser for Repeat<P> {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let start = stream.index();
        let mut items = Vec::new();

        loop {
            let checkpoint = stream.checkpoint();
            match self.inner.parse(stream) {
                Ok(_) if stream.index() == checkpoint.index() => {
                    warn!("repeat: stopping on a match that consumed nothing");
                    break;
                }
                Ok(capture) => items.push(capture),
                Err(_) => {
                    stream.restore(checkpoint);
                    break;
                }
            }
        }

        Ok(Capture::list(stream.span_from(start), items))
    }

    fn expected(&self) -> String {
        self.inner.expected()
    }

    fn children(&self) -> Vec<&dyn Parser> {
        vec![&self.inner as &dyn Parser]
    }
}

/// One or more matches of `item` separated by `separator`. A trailing
/// separator is left unconsumed.
#[derive(Debug, Clone)]
pub struct Ls<P, S> {
    item: P,
    separator: S,
}

pub fn ls<P: Parser, S: Parser>(item: P, separator: S) -> Ls<P, S> {
    Ls { item, separator }
}

impl<P: Parser, S: Parser> Parser for Ls<P, S> {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let start = stream.index();
        let mut items = vec![self.item.parse(stream)?];

        loop {
            let checkpoint = stream.checkpoint();
            if self.separator.parse(stream).is_err() {
                break;
            }
            match self.item.parse(stream) {
                Ok(capture) => items.push(capture),
                Err(_) => {
                    stream.restore(checkpoint);
                    break;
                }
            }
        }

        Ok(Capture::list(stream.span_from(start), items))
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        self.item.quick_check(current)
    }

    fn expected(&self) -> String {
        self.item.expected()
    }

    fn children(&self) -> Vec<&dyn Parser> {
        vec![&self.item as &dyn Parser, &self.separator]
    }
}

enum Delimiter {
    Open(&'static str),
    Close(&'static str),
    Other,
}

fn classify(token: &Token) -> Delimiter {
    if token.kind() != TokenKind::Punct {
        return Delimiter::Other;
    }
    match token.lexeme() {
        "(" => Delimiter::Open(")"),
        "[" => Delimiter::Open("]"),
        "{" => Delimiter::Open("}"),
        ")" => Delimiter::Close(")"),
        "]" => Delimiter::Close("]"),
        "}" => Delimiter::Close("}"),
        _ => Delimiter::Other,
    }
}

/// Advances over a delimiter-balanced run. Stops before an unbalanced closer,
/// before any of `terminators` at depth zero, or at the end of the stream.
fn scan_balanced(stream: &mut TokenStream, terminators: &[&str]) -> Result<(), Mismatch> {
    let mut open: Vec<&'static str> = Vec::new();

    while let Some(token) = stream.current() {
        if open.is_empty() && terminators.iter().any(|t| *t == token.lexeme()) {
            return Ok(());
        }
        match classify(token) {
            Delimiter::Open(closer) => open.push(closer),
            Delimiter::Close(closer) => match open.last() {
                None => return Ok(()),
                Some(&expected) if expected == closer => {
                    open.pop();
                }
                Some(&expected) => return Err(Mismatch::at(stream, format!("`{expected}`"))),
            },
            Delimiter::Other => {}
        }
        stream.next();
    }

    match open.last() {
        Some(&expected) => Err(Mismatch::at(stream, format!("`{expected}`"))),
        None => Ok(()),
    }
}

/// An opaque, delimiter-balanced block such as a function body. May be empty.
#[derive(Debug, Clone, Default)]
pub struct Layer;

pub fn layer() -> Layer {
    Layer
}

impl Parser for Layer {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();
        let start = stream.index();
        if let Err(mismatch) = scan_balanced(stream, &[]) {
            stream.restore(checkpoint);
            return Err(mismatch);
        }
        Ok(Capture::leaf(stream.span_from(start)))
    }

    fn expected(&self) -> String {
        "a balanced block".to_string()
    }
}

/// A namespace-qualified name such as `\Foo\Bar\Baz`.
#[derive(Debug, Clone, Default)]
pub struct Ns;

pub fn ns() -> Ns {
    Ns
}

fn is_separator(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.is(TokenKind::Punct, "\\"))
}

fn is_identifier(token: Option<&Token>) -> bool {
    token.is_some_and(|t| t.kind() == TokenKind::Identifier)
}

impl Parser for Ns {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();
        let start = stream.index();

        if is_separator(stream.current()) {
            stream.next();
        }
        if !is_identifier(stream.current()) {
            let mismatch = Mismatch::at(stream, self.expected());
            stream.restore(checkpoint);
            return Err(mismatch);
        }
        stream.next();

        while is_separator(stream.current()) {
            let segment = stream.checkpoint();
            stream.next();
            if !is_identifier(stream.current()) {
                stream.restore(segment);
                break;
            }
            stream.next();
        }

        Ok(Capture::leaf(stream.span_from(start)))
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        Some(is_separator(current) || is_identifier(current))
    }

    fn expected(&self) -> String {
        "a qualified name".to_string()
    }
}

/// A non-empty, delimiter-balanced expression ending before `,`, `;` or an
/// unbalanced closer.
#[derive(Debug, Clone, Default)]
pub struct Expression;

pub fn expression() -> Expression {
    Expression
}

impl Parser for Expression {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let checkpoint = stream.checkpoint();
        let start = stream.index();

        if let Err(mismatch) = scan_balanced(stream, &[",", ";"]) {
            stream.restore(checkpoint);
            return Err(mismatch);
        }
        if stream.index() == start {
            return Err(Mismatch::at(stream, self.expected()));
        }
        Ok(Capture::leaf(stream.span_from(start)))
    }

    fn expected(&self) -> String {
        "an expression".to_string()
    }
}

/// Records the inner capture under a label.
#[derive(Debug, Clone)]
pub struct Labeled<P> {
    inner: P,
    label: Label,
}

impl<P: Parser> Labeled<P> {
    pub fn new(inner: P, label: Label) -> Self {
        Self { inner, label }
    }
}

impl<P: Parser> Parser for Labeled<P> {
    fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        let capture = self.inner.parse(stream)?;
        Ok(Capture::labeled(self.label.clone(), capture))
    }

    fn quick_check(&self, current: Option<&Token>) -> Option<bool> {
        self.inner.quick_check(current)
    }

    fn expected(&self) -> String {
        self.inner.expected()
    }

    fn labels(&self) -> Vec<Label> {
        vec![self.label.clone()]
    }

    fn children(&self) -> Vec<&dyn Parser> {
        vec![&self.inner as &dyn Parser]
    }
}
