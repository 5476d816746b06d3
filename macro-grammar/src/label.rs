use std::fmt;

/// A capture label: a path of scoped segments.
///
/// Reusing a sub-grammar under a prefix appends a segment instead of gluing
/// strings together, so `classFunction` + `argumentName` stays two segments
/// while still rendering as `classFunctionArgumentName` for template lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    segments: Vec<String>,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// `name` scoped under `prefix`, or a bare label when there is no prefix.
    pub fn scoped(prefix: Option<&Label>, name: impl Into<String>) -> Self {
        match prefix {
            Some(prefix) => prefix.child(name),
            None => Self::new(name),
        }
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The flat camel-case name templates refer to.
    pub fn name(&self) -> String {
        let mut rendered = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 {
                rendered.push_str(segment);
                continue;
            }
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                rendered.extend(first.to_uppercase());
                rendered.push_str(chars.as_str());
            }
        }
        rendered
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name() == name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_label_renders_title_cased_segments() {
        let prefix = Label::new("classFunction");
        let label = Label::scoped(Some(&prefix), "argumentName");
        assert_eq!(label.name(), "classFunctionArgumentName");
        assert_eq!(label.segments().len(), 2);
    }

    #[test]
    fn unscoped_label_is_the_bare_name() {
        assert_eq!(Label::scoped(None, "type").to_string(), "type");
    }

    #[test]
    fn nested_scopes_chain() {
        let label = Label::new("classFunction").child("argument").child("type");
        assert!(label.matches("classFunctionArgumentType"));
    }

    #[test]
    fn structurally_different_labels_can_render_alike() {
        let a = Label::new("argument").child("type");
        let b = Label::new("argumentType");
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
    }
}
