//! Stylesheet tree nodes.
//!
//! Every node keeps the raw whitespace that surrounded it in the source so
//! that an untouched tree prints back byte-identical. Containers own their
//! children in a plain `Vec<Node>`; sibling lookups are index arithmetic.

use std::path::PathBuf;

/// Where a node came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Path of the stylesheet file, when it was loaded from one.
    pub file: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub column: u32,
}

/// A node of the stylesheet tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A style rule (`selector { ... }`).
    Rule(Rule),
    /// An at-rule (`@media ... { ... }` or `@import ...;`).
    AtRule(AtRule),
    /// A `property: value` pair.
    Declaration(Declaration),
    /// A `/* ... */` comment.
    Comment(Comment),
}

impl Node {
    /// Raw whitespace preceding the node.
    pub fn before(&self) -> &str {
        match self {
            Node::Rule(rule) => &rule.before,
            Node::AtRule(at_rule) => &at_rule.before,
            Node::Declaration(decl) => &decl.before,
            Node::Comment(comment) => &comment.before,
        }
    }

    /// Source location of the node.
    pub fn source(&self) -> &Source {
        match self {
            Node::Rule(rule) => &rule.source,
            Node::AtRule(at_rule) => &at_rule.source,
            Node::Declaration(decl) => &decl.source,
            Node::Comment(comment) => &comment.source,
        }
    }

    /// Returns true for comment nodes.
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    /// Get the declaration if this node is one.
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Get the declaration mutably if this node is one.
    pub fn as_declaration_mut(&mut self) -> Option<&mut Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Get the comment if this node is one.
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Get the rule if this node is one.
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    /// Get the at-rule if this node is one.
    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Node::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl From<AtRule> for Node {
    fn from(at_rule: AtRule) -> Self {
        Node::AtRule(at_rule)
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Declaration(decl)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name, as written.
    pub prop: String,
    /// Value text, including any `!important` flag.
    pub value: String,
    /// Whitespace before the property.
    pub before: String,
    /// Text between property and value (the colon and its spacing).
    pub between: String,
    /// Whitespace between the value and the terminating `;`.
    pub after: String,
    /// Source location.
    pub source: Source,
}

impl Declaration {
    /// Create a declaration with default spacing.
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            before: " ".to_string(),
            between: ": ".to_string(),
            after: String::new(),
            source: Source::default(),
        }
    }

    /// Clone this declaration with a different value, keeping its spacing.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }
}

/// A `/* ... */` comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Comment text with surrounding whitespace removed.
    pub text: String,
    /// Whitespace before the comment.
    pub before: String,
    /// Whitespace between `/*` and the text.
    pub left: String,
    /// Whitespace between the text and `*/`.
    pub right: String,
    /// Source location.
    pub source: Source,
}

impl Comment {
    /// Create a comment with default spacing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            before: " ".to_string(),
            left: " ".to_string(),
            right: " ".to_string(),
            source: Source::default(),
        }
    }

    /// Build a comment from the raw text between `/*` and `*/`.
    pub(crate) fn from_raw(raw: &str, before: String, source: Source) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Self {
                text: String::new(),
                before,
                left: raw.to_string(),
                right: String::new(),
                source,
            };
        }
        let left_len = raw.len() - raw.trim_start().len();
        let right_start = left_len + text.len();
        Self {
            text: text.to_string(),
            before,
            left: raw[..left_len].to_string(),
            right: raw[right_start..].to_string(),
            source,
        }
    }

    /// Returns true if a line break separates the comment from the node
    /// before it.
    pub fn is_on_own_line(&self) -> bool {
        self.before.contains('\n')
    }
}

/// A style rule: a selector and a block of declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Selector text, as written.
    pub selector: String,
    /// Children in source order.
    pub nodes: Vec<Node>,
    /// Whitespace before the selector.
    pub before: String,
    /// Whitespace between the selector and `{`.
    pub between: String,
    /// Whitespace between the last child and `}`.
    pub after: String,
    /// Whether the last declaration is followed by `;`.
    pub semicolon: bool,
    /// Source location.
    pub source: Source,
}

impl Rule {
    /// Create an empty rule with default spacing.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: vec![],
            before: String::new(),
            between: " ".to_string(),
            after: " ".to_string(),
            semicolon: false,
            source: Source::default(),
        }
    }

    /// Clone the rule without any of its children.
    pub fn clone_empty(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            nodes: vec![],
            before: self.before.clone(),
            between: self.between.clone(),
            after: self.after.clone(),
            semicolon: self.semicolon,
            source: self.source.clone(),
        }
    }

    /// Append a child node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Iterate over the direct child declarations.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(Node::as_declaration)
    }

    /// Returns true if a direct child declaration has exactly this property
    /// and value.
    pub fn has_declaration(&self, prop: &str, value: &str) -> bool {
        self.declarations()
            .any(|decl| decl.prop == prop && decl.value == value)
    }

    /// Get the source file path, if the rule was parsed from a file.
    pub fn file(&self) -> Option<&std::path::Path> {
        self.source.file.as_deref()
    }
}

/// An at-rule such as `@media (min-width: 500px) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    /// Parameter text (the media query for `@media`).
    pub params: String,
    /// Block children, or `None` for statement at-rules like `@import`.
    pub nodes: Option<Vec<Node>>,
    /// Whitespace before the `@`.
    pub before: String,
    /// Whitespace between the name and the params.
    pub after_name: String,
    /// Whitespace between the params and `{` (or `;`).
    pub between: String,
    /// Whitespace between the last child and `}`.
    pub after: String,
    /// Whether the last declaration in the block is followed by `;`.
    pub semicolon: bool,
    /// Source location.
    pub source: Source,
}

impl AtRule {
    /// Create an `@media` block with the given query and no children.
    pub fn media(params: impl Into<String>) -> Self {
        Self {
            name: "media".to_string(),
            params: params.into(),
            nodes: Some(vec![]),
            before: String::new(),
            after_name: " ".to_string(),
            between: " ".to_string(),
            after: " ".to_string(),
            semicolon: false,
            source: Source::default(),
        }
    }

    /// Append a child node, turning a statement at-rule into a block.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.get_or_insert_with(Vec::new).push(node.into());
    }
}
