use crate::label::Label;
use macro_lexer::{Token, TokenStream};

/// The result of a successful parse: the tokens it covered plus whatever
/// structure its combinator recorded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Capture {
    tokens: Vec<Token>,
    node: Node,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// A single token or an opaque run of tokens.
    #[default]
    Leaf,
    /// Labeled entries, in match order.
    Tree(CaptureTree),
    /// Sibling captures from `repeat` or `ls`.
    List(Vec<Capture>),
}

impl Capture {
    /// What `optional` yields when its parser misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn leaf(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            node: Node::Leaf,
        }
    }

    pub fn tree(tokens: Vec<Token>, tree: CaptureTree) -> Self {
        Self {
            tokens,
            node: Node::Tree(tree),
        }
    }

    pub fn list(tokens: Vec<Token>, items: Vec<Capture>) -> Self {
        Self {
            tokens,
            node: Node::List(items),
        }
    }

    /// Wraps `inner` as the single entry `label`.
    pub fn labeled(label: Label, inner: Capture) -> Self {
        let tokens = inner.tokens.clone();
        let mut tree = CaptureTree::default();
        tree.insert(label, inner);
        Self::tree(tokens, tree)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The covered source, interior whitespace and comments included.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::lexeme).collect()
    }

    /// A fresh stream over the covered tokens.
    pub fn stream(&self) -> TokenStream {
        TokenStream::new(self.tokens.clone())
    }

    pub fn entries(&self) -> &[(Label, Capture)] {
        match &self.node {
            Node::Tree(tree) => tree.entries(),
            _ => &[],
        }
    }

    pub fn items(&self) -> &[Capture] {
        match &self.node {
            Node::List(items) => items,
            _ => &[],
        }
    }

    /// A direct entry by rendered label name.
    pub fn get(&self, name: &str) -> Option<&Capture> {
        match &self.node {
            Node::Tree(tree) => tree.get(name),
            _ => None,
        }
    }

    /// Depth-first search through entries and list items.
    pub fn find(&self, name: &str) -> Option<&Capture> {
        if let Some(found) = self.get(name) {
            return Some(found);
        }
        match &self.node {
            Node::Leaf => None,
            Node::Tree(tree) => tree.iter().find_map(|(_, capture)| capture.find(name)),
            Node::List(items) => items.iter().find_map(|item| item.find(name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureTree {
    entries: Vec<(Label, Capture)>,
}

impl CaptureTree {
    pub fn insert(&mut self, label: Label, capture: Capture) {
        self.entries.push((label, capture));
    }

    /// Merges a child's entries into this tree; leaves and lists carry no
    /// entries and are dropped.
    pub fn absorb(&mut self, capture: Capture) {
        if let Node::Tree(tree) = capture.node {
            self.entries.extend(tree.entries);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Capture> {
        self.entries
            .iter()
            .find(|(label, _)| label.matches(name))
            .map(|(_, capture)| capture)
    }

    pub fn entries(&self) -> &[(Label, Capture)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Label, Capture)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
