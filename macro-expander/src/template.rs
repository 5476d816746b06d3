//! Macro output templates.
//!
//! A template is literal source text with placeholders. `$(name)` inserts the
//! capture labelled `name`; `$(name | trim | studly)` first pipes the capture
//! through the listed expanders, left to right.

use crate::error::ExpandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Capture { label: String, expanders: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

fn is_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, ExpandError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(start) = rest.find("$(") {
            text.push_str(&rest[..start]);
            let offset = source.len() - rest.len() + start;
            let body = &rest[start + 2..];
            let end = body.find(')').ok_or_else(|| ExpandError::Template {
                offset,
                message: "unterminated placeholder".to_string(),
            })?;

            let mut parts = body[..end].split('|').map(str::trim);
            let label = parts.next().unwrap_or_default();
            if !is_name(label) {
                return Err(ExpandError::Template {
                    offset,
                    message: format!("`{label}` is not a capture name"),
                });
            }
            let expanders: Vec<String> = parts.map(str::to_string).collect();
            if let Some(bad) = expanders.iter().find(|name| !is_name(name)) {
                return Err(ExpandError::Template {
                    offset,
                    message: format!("`{bad}` is not an expander name"),
                });
            }

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Capture {
                label: label.to_string(),
                expanders,
            });
            rest = &body[end + 1..];
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every capture name the template refers to.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Capture { label, .. } => Some(label.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn expanders(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Capture { expanders, .. } => Some(expanders),
                Segment::Text(_) => None,
            })
            .flatten()
            .map(String::as_str)
    }
}
