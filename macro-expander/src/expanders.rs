//! Built-in expanders.
//!
//! Textual rewrites (`trim`, `studly`, `collapse`) stringify the region and
//! re-expand the new text. Structural ones rebuild a token sequence and hand
//! it to [`MacroEngine::resubmit`].

use crate::engine::{Expander, GcMode, MacroEngine};
use crate::error::ExpandError;
use macro_lexer::{Token, TokenKind, TokenStream};
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s+\n").unwrap());
static TRIPLE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3}").unwrap());

pub fn default_expanders() -> Vec<(&'static str, Expander)> {
    vec![
        ("trim", trim as Expander),
        ("studly", studly as Expander),
        ("collapse", collapse as Expander),
        ("visibilityModifiers", visibility_modifiers as Expander),
        ("argument", argument as Expander),
        ("returnType", return_type as Expander),
    ]
}

fn reexpand(source: &str, engine: &mut dyn MacroEngine) -> Result<TokenStream, ExpandError> {
    let expanded = engine.expand(source, "", GcMode::Disabled)?;
    engine.from_source(&expanded)
}

/// `tokens` separated by single spaces, except that `[` directly followed by
/// `]` stays joined.
fn spaced(tokens: &[Token]) -> Vec<Token> {
    let mut spaced: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        let empty_brackets = token.lexeme() == "]"
            && spaced.last().is_some_and(|previous| previous.lexeme() == "[");
        if !spaced.is_empty() && !empty_brackets {
            spaced.push(Token::synthetic(TokenKind::Whitespace, " "));
        }
        spaced.push(token.clone());
    }
    spaced
}

fn significant(mut stream: TokenStream) -> Vec<Token> {
    let mut tokens = Vec::new();
    while let Some(token) = stream.current() {
        tokens.push(token.clone());
        stream.next();
    }
    tokens
}

pub fn trim(stream: TokenStream, engine: &mut dyn MacroEngine) -> Result<TokenStream, ExpandError> {
    reexpand(stream.to_string().trim(), engine)
}

/// `some-thing_here` becomes `SomeThingHere`.
pub fn studly_text(text: &str) -> String {
    text.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn studly(stream: TokenStream, engine: &mut dyn MacroEngine) -> Result<TokenStream, ExpandError> {
    reexpand(&studly_text(&stream.to_string()), engine)
}

/// Folds whitespace-only lines and newline runs into single blank lines.
pub fn collapse_text(text: &str) -> String {
    let folded = BLANK_LINE.replace_all(text, "\n\n");
    TRIPLE_NEWLINE.replace_all(&folded, "\n\n").into_owned()
}

pub fn collapse(stream: TokenStream, engine: &mut dyn MacroEngine) -> Result<TokenStream, ExpandError> {
    reexpand(&collapse_text(&stream.to_string()), engine)
}

/// Re-serializes a region as its tokens joined by single spaces.
pub fn visibility_modifiers(
    stream: TokenStream,
    engine: &mut dyn MacroEngine,
) -> Result<TokenStream, ExpandError> {
    let tokens = significant(stream);
    let joined: Vec<Token> = tokens
        .iter()
        .enumerate()
        .flat_map(|(i, token)| {
            let separator = (i > 0).then(|| Token::synthetic(TokenKind::Whitespace, " "));
            separator.into_iter().chain(std::iter::once(token.clone()))
        })
        .collect();
    engine.resubmit(&joined, "")
}

#[derive(Debug, Clone)]
pub struct ArgumentExpansion {
    pub stream: TokenStream,
    /// Set when the default value was replaced by `null`.
    pub nullable: bool,
}

/// Rewrites an argument whose default cannot be evaluated at expansion time.
///
/// Scanning stops at `new` or at a `(` directly after an identifier. The
/// keyword, or the called name and its parenthesis, are dropped along with
/// everything after them, and `null` takes their place.
pub fn argument_with_nullability(
    stream: TokenStream,
    engine: &mut dyn MacroEngine,
) -> Result<ArgumentExpansion, ExpandError> {
    let mut kept: Vec<Token> = Vec::new();
    let mut nullable = false;

    for token in significant(stream) {
        match token.kind() {
            TokenKind::Keyword if token.lexeme().eq_ignore_ascii_case("new") => {
                nullable = true;
                break;
            }
            TokenKind::Punct
                if token.lexeme() == "("
                    && kept.last().map(Token::kind) == Some(TokenKind::Identifier) =>
            {
                kept.pop();
                nullable = true;
                break;
            }
            _ => kept.push(token),
        }
    }

    if nullable {
        kept.push(Token::synthetic(TokenKind::Identifier, "null"));
    }

    Ok(ArgumentExpansion {
        stream: engine.resubmit(&spaced(&kept), "")?,
        nullable,
    })
}

pub fn argument(stream: TokenStream, engine: &mut dyn MacroEngine) -> Result<TokenStream, ExpandError> {
    Ok(argument_with_nullability(stream, engine)?.stream)
}

/// Skips the leading `:` and re-emits `: ` followed by the next token. An
/// empty region stays empty.
pub fn return_type(
    stream: TokenStream,
    engine: &mut dyn MacroEngine,
) -> Result<TokenStream, ExpandError> {
    let mut tokens = significant(stream).into_iter().peekable();
    if tokens.peek().is_none() {
        return reexpand("", engine);
    }
    tokens.next_if(|token| token.is(TokenKind::Punct, ":"));

    let source = match tokens.next() {
        Some(token) => format!(": {token}"),
        None => ": ".to_string(),
    };
    reexpand(&source, engine)
}
