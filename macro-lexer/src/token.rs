use macro_common::Position;
use std::fmt;
use std::rc::Rc;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Comment,
    /// `<?php`, `<?=` and `?>`.
    Tag,
    /// `$name`
    Variable,
    Identifier,
    Keyword,
    Number,
    /// A complete quoted literal, interpolation included.
    String,
    Punct,
}

impl TokenKind {
    /// Trivia is kept in the stream for verbatim output but skipped by the cursor.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Tag => "tag",
            TokenKind::Variable => "variable",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Punct => "punctuation",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words. Scalar type names (`string`, `int`, ...) are deliberately
/// absent so they lex as identifiers and match `ns()`.
pub const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "enum",
    "extends", "final", "finally", "fn", "for", "foreach", "function", "global", "goto", "if",
    "implements", "include", "include_once", "instanceof", "insteadof", "interface", "match",
    "namespace", "new", "or", "print", "private", "protected", "public", "readonly", "require",
    "require_once", "return", "static", "switch", "throw", "trait", "try", "use", "var",
    "while", "xor", "yield",
];

/// Keywords are case-insensitive.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// An immutable lexical token. Cloning is cheap: the lexeme is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: Rc<str>,
    position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<Rc<str>>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// A token that never appeared in source, such as a spliced `null`.
    pub fn synthetic(kind: TokenKind, lexeme: impl Into<Rc<str>>) -> Self {
        Self::new(kind, lexeme, Position::default())
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && &*self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case() {
        assert!(is_keyword("function"));
        assert!(is_keyword("INSTEADOF"));
        assert!(!is_keyword("string"));
    }

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Punct.is_trivia());
    }

    #[test]
    fn display_prints_lexeme() {
        let token = Token::synthetic(TokenKind::Variable, "$name");
        assert_eq!(token.to_string(), "$name");
        assert!(token.is(TokenKind::Variable, "$name"));
    }
}
