use crate::capture::Capture;
use crate::error::GrammarError;
use crate::label::Label;
use crate::traits::{BoxedParser, ParseResult, Parser};
use macro_lexer::TokenStream;
use std::rc::Rc;

/// A top-level rule whose capture labels have been checked for collisions.
#[derive(Debug, Clone)]
pub struct Grammar {
    rule: BoxedParser,
}

impl Grammar {
    pub fn new(rule: impl Parser + 'static) -> Result<Self, GrammarError> {
        validate(&rule)?;
        Ok(Self {
            rule: Rc::new(rule),
        })
    }

    pub fn rule(&self) -> &dyn Parser {
        &*self.rule
    }

    /// Parses at the cursor. Each call builds a fresh capture tree.
    pub fn parse(&self, stream: &mut TokenStream) -> ParseResult {
        self.rule.parse(stream)
    }

    /// Lexes `source` and parses from its first significant token.
    pub fn parse_source(&self, source: &str) -> Result<Capture, GrammarError> {
        let mut stream = TokenStream::from_source(source)?;
        Ok(self.parse(&mut stream)?)
    }

    /// Every label the rule can produce, at any depth.
    pub fn labels(&self) -> Vec<Label> {
        let mut labels = Vec::new();
        collect_labels(&*self.rule, &mut labels);
        labels
    }
}

/// Rejects any level of `parser` whose sibling labels render to the same name.
pub fn validate(parser: &dyn Parser) -> Result<(), GrammarError> {
    let labels = parser.labels();
    for (i, label) in labels.iter().enumerate() {
        let name = label.name();
        if labels[..i].iter().any(|earlier| earlier.name() == name) {
            return Err(GrammarError::DuplicateLabel { label: name });
        }
    }
    parser
        .children()
        .into_iter()
        .try_for_each(|child| validate(child))
}

fn collect_labels(parser: &dyn Parser, out: &mut Vec<Label>) {
    for label in parser.labels() {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    for child in parser.children() {
        collect_labels(child, out);
    }
}
