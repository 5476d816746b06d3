use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{is_keyword, Token, TokenKind};

/// A lexing rule tried by the [`Lexer`](crate::Lexer) at the cursor.
pub trait LexingRule {
    /// Attempts to match and consume a token at the cursor.
    ///
    /// `Ok(None)` means "not mine"; the lexer rewinds the cursor and tries the
    /// next rule. An error aborts lexing altogether.
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError>;

    /// Higher priority rules are tried first.
    fn priority(&self) -> i32 {
        0
    }

    /// Cheap pre-filter on the first character.
    ///
    /// - `Some(true)`  - this rule might match
    /// - `Some(false)` - this rule definitely won't match
    /// - `None`        - unknown, try the full match
    #[inline]
    fn quick_check(&self, first_char: char) -> Option<bool> {
        let _ = first_char;
        None
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || (!ch.is_ascii() && !ch.is_whitespace())
}

fn is_word_continue(ch: char) -> bool {
    is_word_start(ch) || ch.is_ascii_digit()
}

/// Runs of whitespace, newlines included.
pub struct WhitespaceRule;

impl LexingRule for WhitespaceRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let value = cursor.consume_while(char::is_whitespace);
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(Token::new(TokenKind::Whitespace, value, position)))
    }

    fn priority(&self) -> i32 {
        1
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char.is_whitespace())
    }
}

/// `// line`, `# line` and `/* block */` comments. `#[` is left for attributes.
pub struct CommentRule;

impl LexingRule for CommentRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();

        if cursor.eat("/*") {
            while !cursor.eat("*/") {
                if cursor.advance().is_none() {
                    return Err(LexError::Unterminated {
                        what: "block comment",
                        position,
                    });
                }
            }
        } else if cursor.eat("//") || (cursor.peek_nth(1) != Some('[') && cursor.eat("#")) {
            cursor.consume_while(|c| c != '\n');
        } else {
            return Ok(None);
        }

        Ok(Some(Token::new(
            TokenKind::Comment,
            cursor.slice_from(start),
            position,
        )))
    }

    fn priority(&self) -> i32 {
        30
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char == '/' || first_char == '#')
    }
}

/// Open and close tags.
pub struct TagRule;

impl LexingRule for TagRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();
        if cursor.eat("<?php") || cursor.eat("<?=") || cursor.eat("?>") {
            return Ok(Some(Token::new(
                TokenKind::Tag,
                cursor.slice_from(start),
                position,
            )));
        }
        Ok(None)
    }

    fn priority(&self) -> i32 {
        40
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char == '<' || first_char == '?')
    }
}

/// `$name` variables.
pub struct VariableRule;

impl LexingRule for VariableRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();
        if cursor.peek() != Some('$') || !cursor.peek_nth(1).is_some_and(is_word_start) {
            return Ok(None);
        }
        cursor.advance();
        cursor.consume_while(is_word_continue);
        Ok(Some(Token::new(
            TokenKind::Variable,
            cursor.slice_from(start),
            position,
        )))
    }

    fn priority(&self) -> i32 {
        20
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char == '$')
    }
}

/// Identifiers and keywords.
pub struct WordRule;

impl LexingRule for WordRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        if !cursor.peek().is_some_and(is_word_start) {
            return Ok(None);
        }
        let word = cursor.consume_while(is_word_continue);
        let kind = if is_keyword(word) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Ok(Some(Token::new(kind, word, position)))
    }

    fn priority(&self) -> i32 {
        10
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(is_word_start(first_char))
    }
}

/// Integer and float literals, including `0x`, `0b` and `1_000` forms.
pub struct NumberRule;

impl LexingRule for NumberRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();
        if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        cursor.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if cursor.peek() == Some('.') && cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            cursor.advance();
            cursor.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
        }
        Ok(Some(Token::new(
            TokenKind::Number,
            cursor.slice_from(start),
            position,
        )))
    }

    fn priority(&self) -> i32 {
        10
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char.is_ascii_digit())
    }
}

/// Single- and double-quoted strings, kept whole.
pub struct StringRule;

impl LexingRule for StringRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();
        let quote = match cursor.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Ok(None),
        };
        cursor.advance();

        loop {
            match cursor.advance() {
                Some('\\') => {
                    cursor.advance();
                }
                Some(ch) if ch == quote => break,
                Some(_) => {}
                None => {
                    return Err(LexError::Unterminated {
                        what: "string literal",
                        position,
                    })
                }
            }
        }

        Ok(Some(Token::new(
            TokenKind::String,
            cursor.slice_from(start),
            position,
        )))
    }

    fn priority(&self) -> i32 {
        20
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char == '"' || first_char == '\'')
    }
}

/// Operators and delimiters, longest match first.
pub struct PunctRule;

const OPERATORS: &[&str] = &[
    "<=>", "**=", "===", "!==", "??=", "?->", "<<=", ">>=", "...", "::", "=>", "->", "==", "!=",
    "<>", "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", ".=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

impl LexingRule for PunctRule {
    fn try_match(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let position = cursor.position();
        let start = cursor.offset();

        if !OPERATORS.iter().any(|op| cursor.eat(op)) {
            match cursor.peek() {
                Some(ch) if ch.is_ascii_punctuation() => {
                    cursor.advance();
                }
                _ => return Ok(None),
            }
        }

        Ok(Some(Token::new(
            TokenKind::Punct,
            cursor.slice_from(start),
            position,
        )))
    }

    fn quick_check(&self, first_char: char) -> Option<bool> {
        Some(first_char.is_ascii_punctuation())
    }
}

/// The rule set for PHP-flavoured source.
pub fn default_rules() -> Vec<Box<dyn LexingRule>> {
    vec![
        Box::new(TagRule),
        Box::new(CommentRule),
        Box::new(StringRule),
        Box::new(VariableRule),
        Box::new(NumberRule),
        Box::new(WordRule),
        Box::new(WhitespaceRule),
        Box::new(PunctRule),
    ]
}
