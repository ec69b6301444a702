//! Stylesheet tree: parsing, walking and printing.

mod node;
mod parser;
mod printer;

pub use node::{AtRule, Comment, Declaration, Node, Rule, Source};

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A parsed stylesheet: the root of the tree.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::ast::Stylesheet;
///
/// let sheet = Stylesheet::parse(".rule { font-size: 16px }", None).unwrap();
/// assert_eq!(sheet.nodes.len(), 1);
/// assert_eq!(sheet.to_string(), ".rule { font-size: 16px }");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Top-level nodes in source order.
    pub nodes: Vec<Node>,
    /// Whitespace after the last node.
    pub after: String,
    /// Whether the last top-level statement is followed by `;`.
    pub semicolon: bool,
    /// Path the stylesheet was loaded from.
    pub source: Option<PathBuf>,
}

impl Stylesheet {
    /// Parse CSS text. `from` is the file the text came from, if any.
    pub fn parse(css: &str, from: Option<&Path>) -> Result<Self> {
        parser::parse_stylesheet(css, from)
    }

    /// Load and parse a stylesheet file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, Some(path))
    }

    /// Append a node at the end of the stylesheet.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Visit every style rule depth-first in source order.
    ///
    /// The callback also receives the params of the at-rule directly
    /// enclosing the rule, or `None` when the parent is the root or another
    /// rule. Nodes appended by the callback's caller after the walk are not
    /// visited.
    pub fn walk_rules_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Rule, Option<&str>),
    {
        walk_rules_in(&mut self.nodes, None, &mut f);
    }

    /// Count the style rules in the tree.
    pub fn rule_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Rule(rule) => 1 + count(&rule.nodes),
                    Node::AtRule(at_rule) => at_rule.nodes.as_deref().map_or(0, count),
                    _ => 0,
                })
                .sum()
        }
        count(&self.nodes)
    }
}

fn walk_rules_in<F>(nodes: &mut [Node], parent_params: Option<&str>, f: &mut F)
where
    F: FnMut(&mut Rule, Option<&str>),
{
    for node in nodes.iter_mut() {
        match node {
            Node::Rule(rule) => {
                f(rule, parent_params);
                walk_rules_in(&mut rule.nodes, None, f);
            }
            Node::AtRule(AtRule {
                params,
                nodes: Some(children),
                ..
            }) => walk_rules_in(children, Some(params.as_str()), f),
            _ => {}
        }
    }
}
