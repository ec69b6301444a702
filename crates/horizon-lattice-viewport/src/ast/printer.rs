//! Printing the tree back to CSS text.
//!
//! A declaration or statement at-rule is followed by `;` unless it is the
//! last non-comment child of a container whose `semicolon` flag is unset.

use std::fmt::{self, Write};

use super::Stylesheet;
use super::node::{AtRule, Comment, Declaration, Node, Rule};

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_body(f, &self.nodes, self.semicolon)?;
        f.write_str(&self.after)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, false)
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, nodes: &[Node], semicolon: bool) -> fmt::Result {
    let last = nodes.iter().rposition(|node| !node.is_comment());
    for (index, node) in nodes.iter().enumerate() {
        write_node(f, node, Some(index) != last || semicolon)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, terminate: bool) -> fmt::Result {
    match node {
        Node::Declaration(decl) => write_declaration(f, decl, terminate),
        Node::Comment(comment) => write_comment(f, comment),
        Node::Rule(rule) => write_rule(f, rule),
        Node::AtRule(at_rule) => write_at_rule(f, at_rule, terminate),
    }
}

fn write_declaration(f: &mut fmt::Formatter<'_>, decl: &Declaration, terminate: bool) -> fmt::Result {
    write!(f, "{}{}{}{}{}", decl.before, decl.prop, decl.between, decl.value, decl.after)?;
    if terminate {
        f.write_char(';')?;
    }
    Ok(())
}

fn write_comment(f: &mut fmt::Formatter<'_>, comment: &Comment) -> fmt::Result {
    write!(f, "{}/*{}{}{}*/", comment.before, comment.left, comment.text, comment.right)
}

fn write_rule(f: &mut fmt::Formatter<'_>, rule: &Rule) -> fmt::Result {
    write!(f, "{}{}{}{{", rule.before, rule.selector, rule.between)?;
    write_body(f, &rule.nodes, rule.semicolon)?;
    write!(f, "{}}}", rule.after)
}

fn write_at_rule(f: &mut fmt::Formatter<'_>, at_rule: &AtRule, terminate: bool) -> fmt::Result {
    write!(
        f,
        "{}@{}{}{}{}",
        at_rule.before, at_rule.name, at_rule.after_name, at_rule.params, at_rule.between
    )?;
    match &at_rule.nodes {
        Some(children) => {
            f.write_char('{')?;
            write_body(f, children, at_rule.semicolon)?;
            write!(f, "{}}}", at_rule.after)
        }
        None if terminate => f.write_char(';'),
        None => Ok(()),
    }
}
