use crate::error::ExpandError;
use crate::template::Template;
use macro_grammar::Grammar;

/// A named rewrite: wherever `pattern` matches, the match is replaced by
/// `template` rendered against the pattern's captures.
#[derive(Debug, Clone)]
pub struct Macro {
    name: String,
    pattern: Grammar,
    template: Template,
}

impl Macro {
    pub fn new(
        name: impl Into<String>,
        pattern: Grammar,
        template: &str,
    ) -> Result<Self, ExpandError> {
        Ok(Self {
            name: name.into(),
            pattern,
            template: Template::parse(template)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Grammar {
        &self.pattern
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Checks that every placeholder names a capture the pattern can produce.
    pub(crate) fn check_labels(&self) -> Result<(), ExpandError> {
        let known: Vec<String> = self.pattern.labels().iter().map(|l| l.name()).collect();
        match self.template.labels().find(|label| !known.iter().any(|k| k == label)) {
            Some(label) => Err(ExpandError::UnknownCapture {
                macro_name: self.name.clone(),
                label: label.to_string(),
            }),
            None => Ok(()),
        }
    }
}
