use crate::cursor::Cursor;
use crate::error::LexError;
use crate::rules::{default_rules, LexingRule};
use crate::token::Token;
use log::warn;
use std::cmp::Reverse;

/// A lexer that applies rules in priority order.
pub struct Lexer {
    rules: Vec<Box<dyn LexingRule>>,
}

impl Lexer {
    /// Creates a lexer from the given rules, highest priority first.
    pub fn new(rules: Vec<Box<dyn LexingRule>>) -> Self {
        let mut sorted_rules = rules;
        sorted_rules.sort_by_key(|rule| Reverse(rule.priority()));
        Self {
            rules: sorted_rules,
        }
    }

    /// Tries every rule at the cursor and returns the first token produced.
    ///
    /// Rules whose `quick_check` rules them out are skipped without a checkpoint.
    fn next_token(&self, cursor: &mut Cursor<'_>) -> Result<Option<Token>, LexError> {
        let Some(first_char) = cursor.peek() else {
            return Ok(None);
        };

        for rule in &self.rules {
            if let Some(false) = rule.quick_check(first_char) {
                continue;
            }

            let checkpoint = cursor.checkpoint();
            match rule.try_match(cursor)? {
                Some(token) if cursor.offset() > checkpoint.index() => return Ok(Some(token)),
                Some(_) => {
                    warn!(
                        "lexing rule produced a token without progress at {}",
                        checkpoint.position()
                    );
                    cursor.restore(checkpoint);
                }
                None => cursor.restore(checkpoint),
            }
        }

        Err(LexError::UnexpectedCharacter {
            ch: first_char,
            position: cursor.position(),
        })
    }

    /// Lexes the whole input, trivia included.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let mut cursor = Cursor::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token(&mut cursor)? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Lexes `input` with the default rule set.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::default().tokenize(input)
}
